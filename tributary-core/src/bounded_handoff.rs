// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixed-capacity blocking handoff between one producer thread and one consumer thread.
//!
//! [`BoundedHandoff`] is the primitive every sequence in this crate is built on: a FIFO
//! buffer with blocking [`enqueue`](BoundedHandoff::enqueue) and
//! [`try_take_one`](BoundedHandoff::try_take_one), plus a one-way *done* latch that tells
//! the consumer no further items will arrive.
//!
//! Emptiness, fullness and the latch are all inspected under the same mutex, and every
//! wait sits in a loop that re-checks its condition. A producer finishing between the
//! consumer's "is it empty?" and "is it done?" checks can therefore neither lose an item
//! nor make the consumer report exhaustion early.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use tributary_core::BoundedHandoff;
//!
//! let handoff = Arc::new(BoundedHandoff::new(2).unwrap());
//! let producer = {
//!     let handoff = Arc::clone(&handoff);
//!     thread::spawn(move || {
//!         for i in 0..5 {
//!             handoff.enqueue(i).unwrap();
//!         }
//!         handoff.mark_done();
//!     })
//! };
//!
//! let mut seen = Vec::new();
//! while let Some(item) = handoff.try_take_one().unwrap() {
//!     seen.push(item);
//! }
//! producer.join().unwrap();
//! assert_eq!(seen, vec![0, 1, 2, 3, 4]);
//! ```

use crate::interrupt::Interruptible;
use core::fmt;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use tributary_error::{Result, TributaryError};

/// Buffer size used when a caller does not pick one.
pub const DEFAULT_CAPACITY: usize = 1;

struct State<T> {
    items: VecDeque<T>,
    done: bool,
    failure: Option<TributaryError>,
    interrupted: bool,
}

/// A bounded FIFO with blocking put/take and a latched end-of-stream flag.
///
/// Invariants:
/// - the number of buffered items never exceeds [`capacity`](Self::capacity), which is
///   at least 1 and never changes;
/// - `done` only ever goes from `false` to `true`; once set, enqueueing is rejected but
///   items already buffered stay consumable;
/// - an interrupt is sticky: every blocked call wakes with
///   [`TributaryError::Interrupted`] and every later call fails the same way.
pub struct BoundedHandoff<T> {
    capacity: usize,
    state: Mutex<State<T>>,
    changed: Condvar,
    not_full: Condvar,
}

impl<T> BoundedHandoff<T> {
    /// Creates an empty handoff holding at most `capacity` items.
    ///
    /// # Errors
    ///
    /// Returns [`TributaryError::InvalidArgument`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TributaryError::invalid_argument(
                "handoff capacity must be at least 1",
            ));
        }

        Ok(Self {
            capacity,
            state: Mutex::new(State {
                items: VecDeque::with_capacity(capacity),
                done: false,
                failure: None,
                interrupted: false,
            }),
            changed: Condvar::new(),
            not_full: Condvar::new(),
        })
    }

    /// Stores `item`, blocking the calling thread while the buffer is full.
    ///
    /// Items from a single producer thread are taken in the order they were enqueued.
    ///
    /// # Errors
    ///
    /// - [`TributaryError::InvalidState`] if the done latch is already set; the item is
    ///   dropped.
    /// - [`TributaryError::Interrupted`] if the handoff is interrupted before or while
    ///   waiting for space.
    pub fn enqueue(&self, item: T) -> Result<()> {
        let mut state = self.state.lock();
        loop {
            if state.interrupted {
                return Err(TributaryError::interrupted("enqueue"));
            }
            if state.done {
                return Err(TributaryError::invalid_state(
                    "enqueue called after the handoff was marked done",
                ));
            }
            if state.items.len() < self.capacity {
                state.items.push_back(item);
                self.changed.notify_one();
                return Ok(());
            }
            self.not_full.wait(&mut state);
        }
    }

    /// Takes the oldest buffered item, blocking while the buffer is empty and not done.
    ///
    /// Returns `Ok(Some(item))` when an item is available and `Ok(None)` once the done
    /// latch is set and every buffered item has been taken. It never returns `Ok(None)`
    /// just because the buffer is momentarily empty.
    ///
    /// # Errors
    ///
    /// - The failure recorded by [`fail`](Self::fail), returned once after the buffered
    ///   items are drained; later calls return `Ok(None)`.
    /// - [`TributaryError::Interrupted`] if the handoff is interrupted.
    pub fn try_take_one(&self) -> Result<Option<T>> {
        let mut state = self.state.lock();
        loop {
            if state.interrupted {
                return Err(TributaryError::interrupted("try_take_one"));
            }
            if let Some(item) = state.items.pop_front() {
                self.not_full.notify_one();
                return Ok(Some(item));
            }
            if state.done {
                return match state.failure.take() {
                    Some(failure) => Err(failure),
                    None => Ok(None),
                };
            }
            self.changed.wait(&mut state);
        }
    }

    /// Sets the done latch and wakes a consumer blocked in [`try_take_one`](Self::try_take_one).
    ///
    /// Idempotent: calling it again has no further effect.
    pub fn mark_done(&self) {
        let mut state = self.state.lock();
        if !state.done {
            state.done = true;
            debug!("handoff marked done with {} buffered items", state.items.len());
        }
        self.changed.notify_all();
    }

    /// Sets the done latch and records `failure` for the consumer.
    ///
    /// The consumer receives every item buffered so far and then the failure, exactly
    /// once. Returns `false` if the latch was already set, in which case `failure` is
    /// discarded.
    pub fn fail(&self, failure: TributaryError) -> bool {
        let mut state = self.state.lock();
        if state.done {
            return false;
        }
        state.done = true;
        state.failure = Some(failure);
        self.changed.notify_all();
        true
    }

    /// Interrupts the handoff, waking every blocked producer and consumer.
    ///
    /// Blocked and subsequent calls to [`enqueue`](Self::enqueue) and
    /// [`try_take_one`](Self::try_take_one) fail with [`TributaryError::Interrupted`].
    pub fn interrupt(&self) {
        let mut state = self.state.lock();
        if !state.interrupted {
            state.interrupted = true;
            debug!("handoff interrupted with {} buffered items", state.items.len());
        }
        self.changed.notify_all();
        self.not_full.notify_all();
    }

    /// Maximum number of buffered items.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Returns `true` if no item is currently buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Returns `true` once [`mark_done`](Self::mark_done) or [`fail`](Self::fail) was called.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state.lock().done
    }

    /// Returns `true` once [`interrupt`](Self::interrupt) was called.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.state.lock().interrupted
    }
}

impl<T: Send> Interruptible for BoundedHandoff<T> {
    fn interrupt(&self) {
        BoundedHandoff::interrupt(self);
    }
}

impl<T> fmt::Debug for BoundedHandoff<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BoundedHandoff")
            .field("capacity", &self.capacity)
            .field("len", &state.items.len())
            .field("done", &state.done)
            .field("interrupted", &state.interrupted)
            .finish()
    }
}
