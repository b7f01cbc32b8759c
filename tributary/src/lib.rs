// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! # Tributary
//!
//! Hands items from an independently scheduled producer to a synchronous consumer that
//! pulls them one at a time.
//!
//! ## Overview
//!
//! - [`AsyncProducerBridge`]: a pull sequence fed by a producer running on another thread,
//!   through a bounded blocking buffer
//! - [`PushToPullAdapter`]: an observer whose pushed events can be pulled back out, in order
//! - [`ParallelFanIn`]: runs a batch of [`Task`]s on an [`Executor`] and yields their results
//!   in completion order
//! - [`Observable`]: drains any pull sequence and broadcasts it to a set of observers
//!
//! Every blocking call can be interrupted through an [`InterruptHandle`]; the interrupted
//! side then reports [`TributaryError::Interrupted`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use tributary::prelude::*;
//! use tributary_test_utils::RecordingObserver;
//!
//! let (bridge, task) = AsyncProducerBridge::from_fn(4, |sink: &ProducerSink<u32>| {
//!     for n in 1..=3 {
//!         sink.enqueue(n * 10)?;
//!     }
//!     Ok(())
//! })
//! .unwrap();
//! thread::spawn(move || task.run());
//!
//! let observer = Arc::new(RecordingObserver::new());
//! let outcome = Observable::from_sequence(bridge)
//!     .subscribe(observer.clone())
//!     .build()
//!     .emit();
//!
//! assert!(outcome.is_completed());
//! assert_eq!(observer.items(), vec![10, 20, 30]);
//! ```

#[macro_use]
mod logging;

pub mod observable;

pub use observable::{EmitOutcome, Observable, ObservableBuilder, SubscribeStep};

// Re-export core types
pub use tributary_core::{
    AdapterObserver, AsyncProducerBridge, BoundedHandoff, Characteristics, DeferredAction,
    FnProducer, InterruptHandle, Interruptible, IterSequence, Observer, Producer,
    ProducerSink, ProducerTask, PullItems, PullSequence, PushToPullAdapter, SizeEstimate,
    DEFAULT_CAPACITY,
};
pub use tributary_core::{IntoTributaryError, Result, ResultExt, TributaryError};

// Re-export execution types
#[cfg(feature = "runtime-tokio")]
pub use tributary_exec::TokioExecutor;
pub use tributary_exec::{Executor, InlineExecutor, Job, ParallelFanIn, Task, ThreadExecutor};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::observable::{EmitOutcome, Observable};
    pub use tributary_core::{
        AsyncProducerBridge, Observer, Producer, ProducerSink, PullSequence, PushToPullAdapter,
        TributaryError,
    };
    pub use tributary_exec::{Executor, ParallelFanIn, Task, ThreadExecutor};
}
