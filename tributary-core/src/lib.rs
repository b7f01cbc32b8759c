// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core primitives for handing items from an independently scheduled producer to a
//! synchronous, pull-based consumer.
//!
//! - [`BoundedHandoff`]: fixed-capacity blocking buffer with a latched done flag
//! - [`AsyncProducerBridge`]: a [`PullSequence`] fed by a [`ProducerTask`]
//! - [`PushToPullAdapter`]: an [`Observer`] whose pushed events are pulled back out

#[macro_use]
mod logging;

pub mod async_producer_bridge;
pub mod bounded_handoff;
pub mod characteristics;
pub mod interrupt;
pub mod iter_sequence;
pub mod observer;
pub mod producer;
pub mod pull_sequence;
pub mod push_to_pull;
pub mod size_estimate;

pub use self::async_producer_bridge::AsyncProducerBridge;
pub use self::bounded_handoff::{BoundedHandoff, DEFAULT_CAPACITY};
pub use self::characteristics::Characteristics;
pub use self::interrupt::{InterruptHandle, Interruptible};
pub use self::iter_sequence::IterSequence;
pub use self::observer::Observer;
pub use self::producer::{FnProducer, Producer, ProducerSink, ProducerTask};
pub use self::pull_sequence::{PullItems, PullSequence};
pub use self::push_to_pull::{AdapterObserver, DeferredAction, PushToPullAdapter};
pub use self::size_estimate::SizeEstimate;
pub use tributary_error::{IntoTributaryError, Result, ResultExt, TributaryError};
