// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tributary_core::{PullSequence, TributaryError};

/// Drains `sequence` on the calling thread, returning the items and the failure, if any.
pub fn drain<S: PullSequence>(mut sequence: S) -> (Vec<S::Item>, Option<TributaryError>) {
    let mut items = Vec::new();
    let failure = sequence.for_each_remaining(|item| items.push(item)).err();
    (items, failure)
}

/// A call running on a helper thread, for asserting that it blocks.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tributary_core::BoundedHandoff;
/// use tributary_test_utils::BlockedCall;
///
/// let handoff = Arc::new(BoundedHandoff::<i32>::new(1).unwrap());
/// let consumer = Arc::clone(&handoff);
/// let call = BlockedCall::spawn(move || consumer.try_take_one());
///
/// call.assert_blocked_for(Duration::from_millis(50));
/// handoff.mark_done();
/// assert_eq!(call.wait(Duration::from_secs(5)).unwrap(), None);
/// ```
pub struct BlockedCall<R> {
    result: Receiver<R>,
    handle: JoinHandle<()>,
}

impl<R: Send + 'static> BlockedCall<R> {
    pub fn spawn<F>(call: F) -> Self
    where
        F: FnOnce() -> R + Send + 'static,
    {
        let (tx, result) = mpsc::channel();
        let handle = thread::spawn(move || {
            let _ = tx.send(call());
        });
        Self { result, handle }
    }

    /// Panics if the call returns within `duration`.
    pub fn assert_blocked_for(&self, duration: Duration) {
        match self.result.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(_) => panic!("call returned while it was expected to block"),
            Err(RecvTimeoutError::Disconnected) => panic!("blocked call panicked"),
        }
    }

    /// Waits up to `timeout` for the call to return.
    ///
    /// # Panics
    ///
    /// Panics if the call is still blocked after `timeout` or panicked.
    pub fn wait(self, timeout: Duration) -> R {
        let result = self
            .result
            .recv_timeout(timeout)
            .expect("blocked call did not return in time");
        self.handle.join().expect("blocked call thread panicked");
        result
    }
}
