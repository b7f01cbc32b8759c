// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turns push-style `next`/`error`/`complete` calls into a pull sequence.
//!
//! Every push is recorded as a [`DeferredAction`] in a queue and replayed when the consumer
//! pulls. With the default unbounded queue pushing never blocks, so a single thread can
//! push a batch of events and then drain them. A [`bounded`](PushToPullAdapter::bounded)
//! queue blocks a push while it is full. Draining before anything was pushed on the same
//! thread blocks forever; the adapter does not detect that misuse.
//!
//! A failure pushed with `error` is not raised at push time: it is queued like any other
//! event and raised to the consumer when it reaches the front of the queue.
//!
//! # Example
//!
//! ```
//! use tributary_core::{Observer, PullSequence, PushToPullAdapter};
//!
//! let mut adapter = PushToPullAdapter::new();
//! adapter.next("x").unwrap();
//! adapter.complete().unwrap();
//!
//! assert_eq!(adapter.next_item().unwrap(), Some("x"));
//! assert_eq!(adapter.next_item().unwrap(), None);
//! ```

use crate::interrupt::Interruptible;
use crate::{Characteristics, InterruptHandle, Observer, PullSequence, SizeEstimate};
use async_channel::{Receiver, Sender};
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;
use tributary_error::{Result, TributaryError};

/// One recorded push event, replayed against the consumer on pull.
#[derive(Debug, Clone)]
pub enum DeferredAction<T> {
    /// An item for the consumer.
    Next(T),
    /// A terminal failure, raised to the consumer.
    Error(TributaryError),
    /// Normal termination.
    Complete,
}

impl<T> DeferredAction<T> {
    /// Returns `true` for [`Error`](Self::Error) and [`Complete`](Self::Complete).
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }
}

/// The push half of a [`PushToPullAdapter`], cloneable and sendable to producer threads.
///
/// At most one terminal event is accepted across all clones; later pushes are rejected
/// with [`TributaryError::InvalidState`]. Pushes from several clones are serialized, so
/// no item is ever queued behind the terminal event.
pub struct AdapterObserver<T> {
    sender: Sender<DeferredAction<T>>,
    terminated: Arc<Mutex<bool>>,
}

impl<T> AdapterObserver<T> {
    fn push(&self, action: DeferredAction<T>) -> Result<()> {
        let mut terminated = self.terminated.lock();
        if *terminated {
            warn!("push after a terminal event rejected");
            return Err(TributaryError::invalid_state(
                "event pushed after error or complete",
            ));
        }
        if action.is_terminal() {
            *terminated = true;
        }

        // Blocks only while a bounded queue is full.
        self.sender
            .send_blocking(action)
            .map_err(|_| TributaryError::invalid_state("the pull side was interrupted"))
    }
}

impl<T> Clone for AdapterObserver<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            terminated: Arc::clone(&self.terminated),
        }
    }
}

impl<T> fmt::Debug for AdapterObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterObserver")
            .field("queued", &self.sender.len())
            .field("capacity", &self.sender.capacity())
            .field("terminated", &*self.terminated.lock())
            .finish()
    }
}

impl<T: Send> Observer<T> for AdapterObserver<T> {
    fn next(&self, item: T) -> Result<()> {
        self.push(DeferredAction::Next(item))
    }

    fn error(&self, error: TributaryError) -> Result<()> {
        self.push(DeferredAction::Error(error))
    }

    fn complete(&self) -> Result<()> {
        self.push(DeferredAction::Complete)
    }
}

struct QueueInterrupt<T> {
    receiver: Receiver<DeferredAction<T>>,
}

impl<T: Send> Interruptible for QueueInterrupt<T> {
    fn interrupt(&self) {
        if self.receiver.close() {
            debug!("push-to-pull adapter interrupted");
        }
    }
}

/// Captures push events and replays them as a [`PullSequence`].
///
/// The adapter is itself an [`Observer`]; [`observer`](Self::observer) hands out extra
/// push handles for producers running on other threads.
///
/// [`try_advance`](PullSequence::try_advance) blocks only while nothing has been pushed
/// yet; then `Next` invokes the action and returns `Ok(true)`, `Complete` returns
/// `Ok(false)` and `Error` returns the pushed failure. After a terminal event every call
/// returns `Ok(false)` without blocking.
pub struct PushToPullAdapter<T> {
    observer: AdapterObserver<T>,
    receiver: Receiver<DeferredAction<T>>,
    finished: bool,
}

impl<T> PushToPullAdapter<T> {
    /// Creates an adapter with an empty, unbounded queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_channel(async_channel::unbounded())
    }

    /// Creates an adapter whose queue holds at most `capacity` unpulled events.
    ///
    /// A push on a full queue blocks until the consumer pulls.
    ///
    /// # Errors
    ///
    /// Returns [`TributaryError::InvalidArgument`] if `capacity` is zero.
    pub fn bounded(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TributaryError::invalid_argument(
                "adapter queue capacity must be at least 1",
            ));
        }
        Ok(Self::with_channel(async_channel::bounded(capacity)))
    }

    fn with_channel(
        (sender, receiver): (Sender<DeferredAction<T>>, Receiver<DeferredAction<T>>),
    ) -> Self {
        Self {
            observer: AdapterObserver {
                sender,
                terminated: Arc::new(Mutex::new(false)),
            },
            receiver,
            finished: false,
        }
    }

    /// Maximum number of unpulled events, `None` when unbounded.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.receiver.capacity()
    }

    /// Returns a push handle feeding this adapter.
    #[must_use]
    pub fn observer(&self) -> AdapterObserver<T> {
        self.observer.clone()
    }

    /// Returns a handle that interrupts a consumer blocked in `try_advance`.
    ///
    /// After the interrupt, pulls fail with [`TributaryError::Interrupted`] and pushes
    /// are rejected.
    #[must_use]
    pub fn interrupt_handle(&self) -> InterruptHandle
    where
        T: Send + 'static,
    {
        InterruptHandle::new(Arc::new(QueueInterrupt {
            receiver: self.receiver.clone(),
        }))
    }

    /// Number of events pushed but not yet pulled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl<T> Default for PushToPullAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PushToPullAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushToPullAdapter")
            .field("pending", &self.receiver.len())
            .field("finished", &self.finished)
            .finish()
    }
}

impl<T: Send> Observer<T> for PushToPullAdapter<T> {
    fn next(&self, item: T) -> Result<()> {
        self.observer.next(item)
    }

    fn error(&self, error: TributaryError) -> Result<()> {
        self.observer.error(error)
    }

    fn complete(&self) -> Result<()> {
        self.observer.complete()
    }
}

impl<T> PullSequence for PushToPullAdapter<T> {
    type Item = T;

    fn try_advance<F>(&mut self, action: F) -> Result<bool>
    where
        F: FnOnce(T),
    {
        if self.finished {
            return Ok(false);
        }
        if self.receiver.is_closed() {
            return Err(TributaryError::interrupted("try_advance"));
        }

        let deferred = self
            .receiver
            .recv_blocking()
            .map_err(|_| TributaryError::interrupted("try_advance"))?;

        match deferred {
            DeferredAction::Next(item) => {
                action(item);
                Ok(true)
            }
            DeferredAction::Complete => {
                self.finished = true;
                Ok(false)
            }
            DeferredAction::Error(error) => {
                self.finished = true;
                Err(error)
            }
        }
    }

    fn estimate_size(&self) -> SizeEstimate {
        SizeEstimate::Unknown
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::empty()
    }
}
