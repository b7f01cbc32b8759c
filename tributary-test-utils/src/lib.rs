// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the tributary workspace.
//!
//! Not intended for production code.
//!
//! - [`RecordingObserver`]: an [`Observer`](tributary_core::Observer) that records every
//!   event it receives, for asserting on what an emission delivered
//! - [`sleeping_task`] / [`failing_task`]: tasks with a fixed duration, for completion-order
//!   scenarios
//! - [`drain`] and [`BlockedCall`]: draining a sequence, and asserting that a call blocks

pub mod blocking;
pub mod recording_observer;
pub mod tasks;

pub use blocking::{drain, BlockedCall};
pub use recording_observer::{RecordedEvent, RecordingObserver};
pub use tasks::{failing_task, sleeping_task};
