// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Tributary producer/consumer handoff library
//!
//! Every fallible operation in the workspace returns [`TributaryError`]. The variants
//! fall into three groups:
//!
//! - caller errors, raised synchronously at the call that broke a precondition
//!   ([`TributaryError::InvalidArgument`], [`TributaryError::InvalidState`])
//! - interruption of a blocked call ([`TributaryError::Interrupted`])
//! - failures reported by a producer or a task, surfaced to the consumer exactly once
//!   ([`TributaryError::TaskFailed`], [`TributaryError::ProducerError`],
//!   [`TributaryError::UserError`], [`TributaryError::CallbackPanic`])
//!
//! # Examples
//!
//! ```
//! use tributary_error::{TributaryError, Result};
//!
//! fn checked_capacity(capacity: usize) -> Result<usize> {
//!     if capacity == 0 {
//!         return Err(TributaryError::invalid_argument("capacity must be at least 1"));
//!     }
//!     Ok(capacity)
//! }
//!
//! assert!(checked_capacity(0).unwrap_err().is_caller_error());
//! ```

use std::any::Any;
use std::sync::Arc;

/// Root error type for all Tributary operations
///
/// Wrapped sources are shared behind `Arc`/`Box` so the error stays `Clone`; a single
/// sequence failure can then be handed to several observers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TributaryError {
    /// A precondition on an argument was violated
    ///
    /// Raised synchronously, never deferred to a later call.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Which argument was rejected and why
        message: String,
    },

    /// A blocked call was woken by an interrupt instead of by data
    ///
    /// The call is abandoned; it is not retried internally.
    #[error("Interrupted while blocked in {operation}")]
    Interrupted {
        /// The blocking operation that was interrupted
        operation: String,
    },

    /// The operation is not allowed in the current lifecycle state
    ///
    /// For example, enqueueing after the done latch was set, or pushing
    /// an event after a terminal event.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state
        message: String,
    },

    /// One task of a fan-in batch failed
    ///
    /// The whole run stops at the first failure.
    #[error("Task {index} failed: {source}")]
    TaskFailed {
        /// Submission index of the failed task
        index: usize,
        /// Failure reported by the task
        #[source]
        source: Box<TributaryError>,
    },

    /// A producer reported that it could not continue
    #[error("Producer error: {context}")]
    ProducerError {
        /// Description of what went wrong while producing
        context: String,
    },

    /// User-provided code panicked
    ///
    /// Panics inside producers and tasks are caught and converted to this variant.
    #[error("User callback panicked: {context}")]
    CallbackPanic {
        /// Information about the panic location and cause
        context: String,
    },

    /// A queue was closed before the expected value arrived
    #[error("Channel receive failed: {reason}")]
    ChannelReceiveError {
        /// Specific reason for the receive failure
        reason: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl TributaryError {
    /// Create an invalid argument error with the given message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an interrupted error for the given blocking operation
    pub fn interrupted(operation: impl Into<String>) -> Self {
        Self::Interrupted {
            operation: operation.into(),
        }
    }

    /// Create an invalid state error with the given message
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a producer error with the given context
    pub fn producer_error(context: impl Into<String>) -> Self {
        Self::ProducerError {
            context: context.into(),
        }
    }

    /// Create a callback panic error with the given context
    pub fn callback_panic(context: impl Into<String>) -> Self {
        Self::CallbackPanic {
            context: context.into(),
        }
    }

    /// Create a channel receive error with the given reason
    pub fn channel_receive_error(reason: impl Into<String>) -> Self {
        Self::ChannelReceiveError {
            reason: reason.into(),
        }
    }

    /// Wrap the failure of the task submitted at `index`
    #[must_use]
    pub fn task_failed(index: usize, source: TributaryError) -> Self {
        Self::TaskFailed {
            index,
            source: Box::new(source),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Convert a caught panic payload into a [`TributaryError::CallbackPanic`]
    ///
    /// String payloads (the common `panic!("...")` case) are kept verbatim.
    #[must_use]
    pub fn from_panic(context: &str, payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::callback_panic(format!("{context}: {message}"))
    }

    /// Check if this error comes from an interrupted blocking call
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }

    /// Check if this error reports a violated precondition
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::InvalidState { .. })
    }

    /// Check if this error was reported by a producer, a task or user code
    #[must_use]
    pub const fn is_producer_failure(&self) -> bool {
        matches!(
            self,
            Self::TaskFailed { .. }
                | Self::ProducerError { .. }
                | Self::CallbackPanic { .. }
                | Self::UserError(_)
        )
    }
}

/// Specialized Result type for Tributary operations
pub type Result<T> = std::result::Result<T, TributaryError>;

/// Extension trait for converting errors into `TributaryError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`, which lets
/// producers and tasks written against other error types report failures with `?`
/// after a single conversion call.
pub trait IntoTributaryError {
    /// Convert this error into a `TributaryError` with additional context
    fn into_tributary_error(self, context: &str) -> TributaryError;

    /// Convert this error into a `TributaryError` without additional context
    fn into_tributary(self) -> TributaryError
    where
        Self: Sized,
    {
        self.into_tributary_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoTributaryError for E {
    fn into_tributary_error(self, context: &str) -> TributaryError {
        if context.is_empty() {
            TributaryError::user_error(self)
        } else {
            TributaryError::producer_error(format!("{context}: {self}"))
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(TributaryError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(TributaryError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<TributaryError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach_context(context.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach_context(f(), e.into()))
    }
}

// Only opaque user errors are rewritten; structured variants keep their shape.
fn attach_context(context: String, error: TributaryError) -> TributaryError {
    match error {
        TributaryError::UserError(inner) => TributaryError::ProducerError {
            context: format!("{context}: {inner}"),
        },
        other => other,
    }
}
