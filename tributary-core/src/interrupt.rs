// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cross-thread interruption of blocked pull and push calls.

use core::fmt;
use std::sync::Arc;

/// Something whose blocked callers can be woken with an interrupt failure.
pub trait Interruptible: Send + Sync {
    /// Wakes every blocked caller; they and all later blocking calls fail with
    /// [`TributaryError::Interrupted`](tributary_error::TributaryError::Interrupted).
    fn interrupt(&self);
}

/// A cloneable handle that interrupts one sequence from any thread.
///
/// Interrupting is sticky and idempotent. A consumer blocked in `try_advance` returns
/// [`TributaryError::Interrupted`](tributary_error::TributaryError::Interrupted) instead
/// of waiting for data that may never come.
///
/// # Example
///
/// ```
/// use std::thread;
/// use std::time::Duration;
/// use tributary_core::{AsyncProducerBridge, PullSequence};
///
/// let (mut bridge, _task) = AsyncProducerBridge::<u32>::from_fn(1, |_sink| Ok(())).unwrap();
/// let handle = bridge.interrupt_handle();
///
/// let interrupter = thread::spawn(move || {
///     thread::sleep(Duration::from_millis(20));
///     handle.interrupt();
/// });
///
/// // The producer task was never launched, so only the interrupt can wake us.
/// let err = bridge.next_item().unwrap_err();
/// assert!(err.is_interrupted());
/// interrupter.join().unwrap();
/// ```
#[derive(Clone)]
pub struct InterruptHandle {
    target: Arc<dyn Interruptible>,
}

impl InterruptHandle {
    pub(crate) fn new(target: Arc<dyn Interruptible>) -> Self {
        Self { target }
    }

    /// Interrupts the sequence this handle was obtained from.
    pub fn interrupt(&self) {
        self.target.interrupt();
    }
}

impl fmt::Debug for InterruptHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterruptHandle").finish_non_exhaustive()
    }
}
