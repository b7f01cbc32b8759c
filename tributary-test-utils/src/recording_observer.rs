// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use tributary_core::{Observer, Result, TributaryError};

/// One event received by a [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent<T> {
    Next(T),
    /// The error's display string.
    Error(String),
    Complete,
}

/// An observer that records every call, in order.
///
/// # Example
///
/// ```rust
/// use tributary_core::Observer;
/// use tributary_test_utils::{RecordedEvent, RecordingObserver};
///
/// let observer = RecordingObserver::new();
/// observer.next(1).unwrap();
/// observer.complete().unwrap();
///
/// assert_eq!(observer.items(), vec![1]);
/// assert_eq!(observer.events().last(), Some(&RecordedEvent::Complete));
/// ```
#[derive(Debug)]
pub struct RecordingObserver<T> {
    events: Mutex<Vec<RecordedEvent<T>>>,
    reject_items: bool,
}

impl<T> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            reject_items: false,
        }
    }

    /// An observer that records items but answers every `next` with an error.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            reject_items: true,
        }
    }

    pub fn error_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, RecordedEvent::Error(_)))
            .count()
    }

    pub fn complete_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, RecordedEvent::Complete))
            .count()
    }
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> RecordingObserver<T> {
    pub fn events(&self) -> Vec<RecordedEvent<T>> {
        self.events.lock().clone()
    }

    /// Items received through `next`, in order.
    pub fn items(&self) -> Vec<T> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::Next(item) => Some(item.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<T: Send> Observer<T> for RecordingObserver<T> {
    fn next(&self, item: T) -> Result<()> {
        self.events.lock().push(RecordedEvent::Next(item));
        if self.reject_items {
            return Err(TributaryError::invalid_state("observer rejects items"));
        }
        Ok(())
    }

    fn error(&self, error: TributaryError) -> Result<()> {
        self.events.lock().push(RecordedEvent::Error(error.to_string()));
        Ok(())
    }

    fn complete(&self) -> Result<()> {
        self.events.lock().push(RecordedEvent::Complete);
        Ok(())
    }
}
