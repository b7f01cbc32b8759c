// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Units of work for a [`ParallelFanIn`](crate::ParallelFanIn).

use core::fmt;
use core::future::Future;
use tributary_core::Result;

/// A unit of work producing one value of type `R` or failing.
///
/// A task is consumed by [`call`](Self::call), so it can run at most once.
pub struct Task<R> {
    body: Box<dyn FnOnce() -> Result<R> + Send>,
}

impl<R: Send + 'static> Task<R> {
    /// Wraps a fallible closure.
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce() -> Result<R> + Send + 'static,
    {
        Self {
            body: Box::new(body),
        }
    }

    /// Runs `action` for its side effects and then yields `result`.
    pub fn from_result<F>(action: F, result: R) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::new(move || {
            action();
            Ok(result)
        })
    }

    /// Adapts a future whose output is already being computed elsewhere, or can be
    /// computed by polling it.
    ///
    /// The thread that executes the task blocks until the future resolves.
    ///
    /// # Example
    ///
    /// ```
    /// use futures::channel::oneshot;
    /// use tributary_exec::Task;
    ///
    /// let (tx, rx) = oneshot::channel();
    /// let task = Task::from_future(async move {
    ///     rx.await.map_err(|_| tributary_core::TributaryError::producer_error("sender dropped"))
    /// });
    ///
    /// std::thread::spawn(move || tx.send(42).unwrap());
    /// assert_eq!(task.call().unwrap(), 42);
    /// ```
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        Self::new(move || futures::executor::block_on(future))
    }
}

impl<R> Task<R> {
    /// Runs the task on the calling thread.
    ///
    /// # Errors
    ///
    /// Whatever the task body reports.
    pub fn call(self) -> Result<R> {
        (self.body)()
    }
}

impl<R> fmt::Debug for Task<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}
