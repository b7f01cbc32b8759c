// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The push-listener contract: a producer actively delivers items to a passive consumer.

use std::sync::Arc;
use tributary_error::{Result, TributaryError};

/// Receives items, a failure, or completion from a push-style producer.
///
/// A well-behaved producer calls [`next`](Self::next) any number of times followed by at
/// most one terminal call, either [`error`](Self::error) or [`complete`](Self::complete).
/// Methods take `&self` so one observer can be shared between the producer that pushes
/// and the code that inspects it.
pub trait Observer<T>: Send + Sync {
    /// The next item.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the adapters in this crate reject items pushed after a
    /// terminal event with [`TributaryError::InvalidState`].
    fn next(&self, item: T) -> Result<()>;

    /// The producer failed; no further events follow.
    ///
    /// # Errors
    ///
    /// Implementation-defined, as for [`next`](Self::next).
    fn error(&self, error: TributaryError) -> Result<()>;

    /// No further items are coming.
    ///
    /// # Errors
    ///
    /// Implementation-defined, as for [`next`](Self::next).
    fn complete(&self) -> Result<()>;
}

impl<T, O> Observer<T> for Arc<O>
where
    O: Observer<T> + ?Sized,
{
    fn next(&self, item: T) -> Result<()> {
        (**self).next(item)
    }

    fn error(&self, error: TributaryError) -> Result<()> {
        (**self).error(error)
    }

    fn complete(&self) -> Result<()> {
        (**self).complete()
    }
}
