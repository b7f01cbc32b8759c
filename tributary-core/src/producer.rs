// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The producer side of an [`AsyncProducerBridge`](crate::AsyncProducerBridge).
//!
//! A [`Producer`] describes *what* to produce. The bridge wraps it in a [`ProducerTask`],
//! an entry point the caller launches on whatever thread or pool it chooses. Inside the
//! task the producer sees only a [`ProducerSink`], the two hooks that feed the consumer:
//! [`enqueue`](ProducerSink::enqueue) and [`complete`](ProducerSink::complete).

use crate::{BoundedHandoff, Characteristics, SizeEstimate};
use core::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tributary_error::{Result, TributaryError};

/// Produces the items of an [`AsyncProducerBridge`](crate::AsyncProducerBridge).
///
/// `produce` runs on the producer task, never on the consuming thread. Returning `Ok`
/// completes the sequence; returning `Err` delivers the failure to the consumer after the
/// items enqueued so far, even if [`ProducerSink::complete`] was already called.
pub trait Producer<T>: Send + 'static {
    /// Produces every item through `sink`.
    ///
    /// # Errors
    ///
    /// Any failure that should terminate the sequence.
    fn produce(self, sink: &ProducerSink<T>) -> Result<()>;

    /// Expected item count, captured by the bridge before the producer moves into its task.
    fn estimate_size(&self) -> SizeEstimate {
        SizeEstimate::Unknown
    }

    /// Descriptive properties, captured like [`estimate_size`](Self::estimate_size).
    fn characteristics(&self) -> Characteristics {
        Characteristics::empty()
    }
}

/// A [`Producer`] backed by a closure.
pub struct FnProducer<F> {
    body: F,
    estimate: SizeEstimate,
    characteristics: Characteristics,
}

impl<F> FnProducer<F> {
    pub fn new(body: F) -> Self {
        Self {
            body,
            estimate: SizeEstimate::Unknown,
            characteristics: Characteristics::empty(),
        }
    }

    #[must_use]
    pub fn with_estimate(mut self, estimate: SizeEstimate) -> Self {
        self.estimate = estimate;
        self
    }

    #[must_use]
    pub fn with_characteristics(mut self, characteristics: Characteristics) -> Self {
        self.characteristics = characteristics;
        self
    }
}

impl<T, F> Producer<T> for FnProducer<F>
where
    F: FnOnce(&ProducerSink<T>) -> Result<()> + Send + 'static,
{
    fn produce(self, sink: &ProducerSink<T>) -> Result<()> {
        (self.body)(sink)
    }

    fn estimate_size(&self) -> SizeEstimate {
        self.estimate
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

/// Producer-side hooks into a bridge's handoff.
///
/// The sequence ends when [`Producer::produce`] returns, not when
/// [`complete`](Self::complete) is called: an `Err` returned after `complete` still
/// reaches the consumer.
pub struct ProducerSink<T> {
    handoff: Arc<BoundedHandoff<T>>,
    completed: AtomicBool,
}

impl<T> ProducerSink<T> {
    pub(crate) fn new(handoff: Arc<BoundedHandoff<T>>) -> Self {
        Self {
            handoff,
            completed: AtomicBool::new(false),
        }
    }

    /// Hands `item` to the consumer, blocking while the buffer is full.
    ///
    /// # Errors
    ///
    /// - [`TributaryError::InvalidState`] after [`complete`](Self::complete).
    /// - Otherwise see [`BoundedHandoff::enqueue`].
    pub fn enqueue(&self, item: T) -> Result<()> {
        if self.completed.load(Ordering::Acquire) {
            return Err(TributaryError::invalid_state(
                "enqueue called after the producer completed",
            ));
        }
        self.handoff.enqueue(item)
    }

    /// Declares that no further items will be enqueued. Idempotent.
    ///
    /// The consumer sees the end of the sequence once the producer returns; returning
    /// `Err` afterwards turns it into a failure.
    pub fn complete(&self) {
        self.completed.store(true, Ordering::Release);
    }

    /// Returns `true` once [`complete`](Self::complete) was called.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// Returns `true` once the consumer side was interrupted.
    ///
    /// Long-running producers can poll this between expensive steps.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.handoff.is_interrupted()
    }
}

impl<T> fmt::Debug for ProducerSink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerSink")
            .field("handoff", &self.handoff)
            .field("completed", &self.is_completed())
            .finish()
    }
}

type TaskBody = Box<dyn FnOnce() -> Result<()> + Send>;
type AbandonHook = Box<dyn FnOnce() + Send>;

/// The body of a producer, ready to be launched on a thread or pool of the caller's choice.
///
/// The task must be [`run`](Self::run) exactly once, on a thread other than the consumer's.
/// Dropping it without running it fails the sequence with
/// [`TributaryError::InvalidState`], so the consumer is not left waiting forever.
///
/// # Example
///
/// ```
/// use std::thread;
/// use tributary_core::{AsyncProducerBridge, PullSequence};
///
/// let (bridge, task) = AsyncProducerBridge::from_fn(2, |sink| {
///     for word in ["alpha", "beta"] {
///         sink.enqueue(word)?;
///     }
///     Ok(())
/// })
/// .unwrap();
///
/// let producer = thread::spawn(move || task.run());
/// let words: Vec<_> = bridge.into_items().collect::<Result<_, _>>().unwrap();
/// producer.join().unwrap().unwrap();
/// assert_eq!(words, vec!["alpha", "beta"]);
/// ```
pub struct ProducerTask {
    body: Option<TaskBody>,
    abandon: Option<AbandonHook>,
}

impl ProducerTask {
    pub(crate) fn for_producer<T, P>(producer: P, handoff: Arc<BoundedHandoff<T>>) -> Self
    where
        T: Send + 'static,
        P: Producer<T>,
    {
        let sink = ProducerSink::new(Arc::clone(&handoff));
        Self {
            body: Some(Box::new(move || drive(producer, &sink))),
            abandon: Some(Box::new(move || {
                handoff.fail(TributaryError::invalid_state(
                    "producer task was dropped before it ran",
                ));
            })),
        }
    }

    /// Runs the producer to completion on the calling thread.
    ///
    /// On success the sequence is completed. On failure, including a panic inside the
    /// producer, the consumer receives the failure after the items already enqueued, and
    /// the same failure is returned here.
    ///
    /// # Errors
    ///
    /// The producer's failure, or [`TributaryError::CallbackPanic`] if it panicked.
    pub fn run(mut self) -> Result<()> {
        self.abandon = None;
        match self.body.take() {
            Some(body) => body(),
            None => Ok(()),
        }
    }
}

impl Drop for ProducerTask {
    fn drop(&mut self) {
        if let Some(abandon) = self.abandon.take() {
            warn!("producer task dropped without running; failing its sequence");
            abandon();
        }
    }
}

impl fmt::Debug for ProducerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerTask")
            .field("pending", &self.body.is_some())
            .finish()
    }
}

fn drive<T, P>(producer: P, sink: &ProducerSink<T>) -> Result<()>
where
    P: Producer<T>,
{
    debug!("producer task started");
    let outcome = catch_unwind(AssertUnwindSafe(|| producer.produce(sink)))
        .unwrap_or_else(|payload| Err(TributaryError::from_panic("producer task", payload)));

    match outcome {
        Ok(()) => {
            sink.handoff.mark_done();
            debug!("producer task finished");
            Ok(())
        }
        Err(failure) => {
            error!("producer task failed: {}", failure);
            sink.handoff.fail(failure.clone());
            Err(failure)
        }
    }
}
