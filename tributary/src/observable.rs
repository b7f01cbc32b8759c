// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Emission fan-out: drains a pull sequence and broadcasts it to a set of observers.
//!
//! An [`Observable`] is the terminal consumer of a [`PullSequence`]. [`emit`](Observable::emit)
//! runs on the calling thread until the sequence ends:
//!
//! - every item is delivered to every observer's `next`, in registration order;
//! - if the sequence fails, every observer receives `error` once and no `complete`;
//! - otherwise every observer receives `complete` once.
//!
//! An observer that returns an error from one of its own callbacks is logged and skipped
//! for that event; it does not stop the broadcast to the others.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tributary::Observable;
//! use tributary_test_utils::RecordingObserver;
//!
//! let observer = Arc::new(RecordingObserver::new());
//!
//! let outcome = Observable::builder()
//!     .from_iter(["one", "two"])
//!     .subscribe(observer.clone())
//!     .build()
//!     .emit();
//!
//! assert!(outcome.is_completed());
//! assert_eq!(observer.items(), vec!["one", "two"]);
//! assert_eq!(observer.complete_count(), 1);
//! ```

use std::sync::Arc;
use tributary_core::{IterSequence, Observer, PullSequence, TributaryError};

/// How an [`Observable::emit`] run ended.
#[derive(Debug, Clone)]
pub enum EmitOutcome {
    /// The sequence was exhausted; observers received `complete`.
    Completed {
        /// Number of items broadcast.
        items: usize,
    },
    /// The sequence failed; observers received `error`.
    Failed {
        /// Number of items broadcast before the failure.
        items: usize,
        /// The failure raised by the sequence.
        error: TributaryError,
    },
}

impl EmitOutcome {
    /// Returns `true` if the run ended normally.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Number of items broadcast.
    #[must_use]
    pub const fn items(&self) -> usize {
        match self {
            Self::Completed { items } | Self::Failed { items, .. } => *items,
        }
    }

    /// The sequence failure, if the run failed.
    #[must_use]
    pub const fn error(&self) -> Option<&TributaryError> {
        match self {
            Self::Completed { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// A pull sequence bound to the observers it will be broadcast to.
pub struct Observable<S: PullSequence> {
    sequence: S,
    observers: Vec<Arc<dyn Observer<S::Item>>>,
}

impl Observable<IterSequence<std::iter::Empty<()>>> {
    /// Starts building an observable; the next step picks its source.
    #[must_use]
    pub const fn builder() -> ObservableBuilder {
        ObservableBuilder { _private: () }
    }
}

impl<S> Observable<S>
where
    S: PullSequence,
    S::Item: Clone,
{
    /// Shortcut for `Observable::builder().from_sequence(sequence)`.
    pub fn from_sequence(sequence: S) -> SubscribeStep<S> {
        ObservableBuilder::new().from_sequence(sequence)
    }

    /// Number of distinct observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Drains the sequence on the calling thread and broadcasts every event.
    ///
    /// Consumes the observable: a finished sequence cannot be replayed.
    pub fn emit(self) -> EmitOutcome {
        let Self {
            mut sequence,
            observers,
        } = self;
        let mut items = 0usize;

        let drained = sequence.for_each_remaining(|item| {
            items += 1;
            for observer in &observers {
                if let Err(e) = observer.next(item.clone()) {
                    warn!("observer rejected item {}: {}", items, e);
                }
            }
        });

        match drained {
            Ok(()) => {
                for observer in &observers {
                    if let Err(e) = observer.complete() {
                        warn!("observer failed to complete: {}", e);
                    }
                }
                EmitOutcome::Completed { items }
            }
            Err(error) => {
                debug!("sequence failed after {} items: {}", items, error);
                for observer in &observers {
                    if let Err(e) = observer.error(error.clone()) {
                        warn!("observer failed to handle error: {}", e);
                    }
                }
                EmitOutcome::Failed { items, error }
            }
        }
    }
}

/// First builder step: choose the source sequence.
#[derive(Debug, Default)]
pub struct ObservableBuilder {
    _private: (),
}

impl ObservableBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Uses `sequence` as the source.
    pub fn from_sequence<S>(self, sequence: S) -> SubscribeStep<S>
    where
        S: PullSequence,
        S::Item: Clone,
    {
        SubscribeStep {
            sequence,
            observers: Vec::new(),
        }
    }

    /// Uses an ordered, non-parallel sequence over `iter` as the source.
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(self, iter: I) -> SubscribeStep<IterSequence<I::IntoIter>>
    where
        I: IntoIterator,
        I::Item: Clone,
    {
        self.from_sequence(IterSequence::new(iter))
    }
}

/// Second builder step: register observers, then [`build`](Self::build).
pub struct SubscribeStep<S: PullSequence> {
    sequence: S,
    observers: Vec<Arc<dyn Observer<S::Item>>>,
}

impl<S> SubscribeStep<S>
where
    S: PullSequence,
    S::Item: Clone,
{
    /// Registers `observer` unless the same instance is already registered.
    #[must_use]
    pub fn subscribe<O>(mut self, observer: Arc<O>) -> Self
    where
        O: Observer<S::Item> + 'static,
    {
        let candidate = Arc::as_ptr(&observer).cast::<()>();
        let already_registered = self
            .observers
            .iter()
            .any(|existing| Arc::as_ptr(existing).cast::<()>() == candidate);
        if !already_registered {
            self.observers.push(observer);
        }
        self
    }

    /// Finishes the observable.
    #[must_use]
    pub fn build(self) -> Observable<S> {
        Observable {
            sequence: self.sequence,
            observers: self.observers,
        }
    }
}
