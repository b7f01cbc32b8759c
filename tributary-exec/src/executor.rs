// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Work-submission policies.
//!
//! An [`Executor`] decides where a submitted job runs. The default, [`InlineExecutor`],
//! runs it immediately on the submitting thread, which makes a fan-in strictly serial.
//! The other policies run jobs concurrently, so results arrive in completion order.
//!
//! | executor              | where jobs run                           | feature         |
//! |-----------------------|------------------------------------------|-----------------|
//! | [`InlineExecutor`]    | the submitting thread                    | always          |
//! | [`ThreadExecutor`]    | one new OS thread per job                | always          |
//! | `TokioExecutor`       | tokio's blocking thread pool             | `runtime-tokio` |
//! | `futures::executor::ThreadPool` | a futures thread pool          | `thread-pool`   |

use std::sync::Arc;
use std::thread;
use tributary_core::{IntoTributaryError, Result};

/// A job handed to an [`Executor`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs submitted jobs according to some policy.
pub trait Executor: Send + Sync {
    /// Submits `job` for execution.
    ///
    /// # Errors
    ///
    /// Returns an error if the job could not be accepted; it will then never run.
    fn execute(&self, job: Job) -> Result<()>;
}

impl<E> Executor for Arc<E>
where
    E: Executor + ?Sized,
{
    fn execute(&self, job: Job) -> Result<()> {
        (**self).execute(job)
    }
}

/// Runs each job to completion on the submitting thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, job: Job) -> Result<()> {
        job();
        Ok(())
    }
}

/// Spawns one named OS thread per job.
#[derive(Debug, Clone)]
pub struct ThreadExecutor {
    name: String,
}

impl ThreadExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::named("tributary-worker")
    }

    /// Threads are named `{name}`.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ThreadExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for ThreadExecutor {
    fn execute(&self, job: Job) -> Result<()> {
        thread::Builder::new()
            .name(self.name.clone())
            .spawn(job)
            .map(drop)
            .map_err(|e| e.into_tributary_error("spawning worker thread"))
    }
}

#[cfg(feature = "runtime-tokio")]
pub use self::tokio_executor::TokioExecutor;

#[cfg(feature = "runtime-tokio")]
mod tokio_executor {
    use super::{Executor, Job};
    use tokio::runtime::Handle;
    use tributary_core::{IntoTributaryError, Result};

    /// Runs jobs on a tokio runtime's blocking thread pool.
    ///
    /// Jobs may block freely; they never occupy the runtime's async worker threads.
    #[derive(Debug, Clone)]
    pub struct TokioExecutor {
        handle: Handle,
    }

    impl TokioExecutor {
        #[must_use]
        pub const fn new(handle: Handle) -> Self {
            Self { handle }
        }

        /// Uses the runtime the caller is running in.
        ///
        /// # Errors
        ///
        /// Returns an error when called outside a tokio runtime.
        pub fn current() -> Result<Self> {
            Handle::try_current()
                .map(Self::new)
                .map_err(|e| e.into_tributary_error("no tokio runtime"))
        }
    }

    impl Executor for TokioExecutor {
        fn execute(&self, job: Job) -> Result<()> {
            drop(self.handle.spawn_blocking(job));
            Ok(())
        }
    }
}

#[cfg(feature = "thread-pool")]
impl Executor for futures::executor::ThreadPool {
    fn execute(&self, job: Job) -> Result<()> {
        self.spawn_ok(async move { job() });
        Ok(())
    }
}
