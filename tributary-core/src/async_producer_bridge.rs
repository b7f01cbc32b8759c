// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::bounded_handoff::DEFAULT_CAPACITY;
use crate::producer::FnProducer;
use crate::{
    BoundedHandoff, Characteristics, InterruptHandle, Producer, ProducerSink, ProducerTask,
    PullSequence, SizeEstimate,
};
use std::sync::Arc;
use tributary_error::Result;

/// Lets an independently scheduled producer act as the source of a [`PullSequence`].
///
/// The bridge is the consumer half of a [`BoundedHandoff`]. Its producer half is the
/// [`ProducerTask`] returned alongside it, which the caller launches on a thread or
/// pool of its choice. Production and consumption then run in parallel, decoupled by the
/// buffer.
///
/// The bridge is consumed by one thread at a time (it needs `&mut self` to advance) and
/// cannot be split. Once the sequence reports exhaustion it is finished for good.
///
/// # Example
///
/// ```
/// use std::thread;
/// use tributary_core::{AsyncProducerBridge, PullSequence, SizeEstimate};
///
/// let (mut bridge, task) = AsyncProducerBridge::from_fn(1, |sink| {
///     for reading in [20.5, 21.0, 21.25] {
///         sink.enqueue(reading)?;
///     }
///     Ok(())
/// })
/// .unwrap();
///
/// thread::spawn(move || task.run());
///
/// let mut total = 0.0;
/// bridge.for_each_remaining(|reading| total += reading).unwrap();
/// assert_eq!(total, 62.75);
/// assert_eq!(bridge.estimate_size(), SizeEstimate::Unknown);
/// ```
#[derive(Debug)]
pub struct AsyncProducerBridge<T> {
    handoff: Arc<BoundedHandoff<T>>,
    estimate: SizeEstimate,
    characteristics: Characteristics,
}

impl<T: Send + 'static> AsyncProducerBridge<T> {
    /// Creates a bridge with room for `capacity` buffered items, fed by `producer`.
    ///
    /// The producer's size estimate and characteristics are captured here; the producer
    /// itself moves into the returned task.
    ///
    /// # Errors
    ///
    /// Returns [`TributaryError::InvalidArgument`](tributary_error::TributaryError::InvalidArgument)
    /// if `capacity` is zero.
    pub fn new<P>(capacity: usize, producer: P) -> Result<(Self, ProducerTask)>
    where
        P: Producer<T>,
    {
        let handoff = Arc::new(BoundedHandoff::new(capacity)?);
        let bridge = Self {
            handoff: Arc::clone(&handoff),
            estimate: producer.estimate_size(),
            characteristics: producer.characteristics(),
        };
        Ok((bridge, ProducerTask::for_producer(producer, handoff)))
    }

    /// Same as [`new`](Self::new) with a single-slot buffer.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature mirrors [`new`](Self::new).
    pub fn with_default_capacity<P>(producer: P) -> Result<(Self, ProducerTask)>
    where
        P: Producer<T>,
    {
        Self::new(DEFAULT_CAPACITY, producer)
    }

    /// Creates a bridge whose producer is a closure receiving the sink.
    ///
    /// # Errors
    ///
    /// Returns [`TributaryError::InvalidArgument`](tributary_error::TributaryError::InvalidArgument)
    /// if `capacity` is zero.
    pub fn from_fn<F>(capacity: usize, body: F) -> Result<(Self, ProducerTask)>
    where
        F: FnOnce(&ProducerSink<T>) -> Result<()> + Send + 'static,
    {
        Self::new(capacity, FnProducer::new(body))
    }
}

impl<T> AsyncProducerBridge<T> {
    /// Returns a handle that interrupts this bridge from another thread.
    #[must_use]
    pub fn interrupt_handle(&self) -> InterruptHandle
    where
        T: Send + 'static,
    {
        InterruptHandle::new(self.handoff.clone())
    }

    /// Number of items produced but not yet pulled.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.handoff.len()
    }

    /// Capacity of the underlying handoff.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.handoff.capacity()
    }
}

impl<T> PullSequence for AsyncProducerBridge<T> {
    type Item = T;

    fn try_advance<F>(&mut self, action: F) -> Result<bool>
    where
        F: FnOnce(T),
    {
        match self.handoff.try_take_one()? {
            Some(item) => {
                action(item);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn estimate_size(&self) -> SizeEstimate {
        self.estimate
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}
