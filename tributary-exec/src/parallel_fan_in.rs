// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runs a fixed batch of tasks and yields their results in completion order.
//!
//! [`ParallelFanIn`] is a [`Producer`]: its body submits every task to an [`Executor`],
//! then waits for completions one at a time and enqueues each value as soon as it is
//! available. With a concurrent executor the consumer therefore sees the fastest task
//! first, regardless of submission order.
//!
//! # Example
//!
//! ```
//! use std::thread;
//! use std::time::Duration;
//! use tributary_core::PullSequence;
//! use tributary_exec::{ParallelFanIn, Task, ThreadExecutor};
//!
//! let slow = Task::new(|| {
//!     thread::sleep(Duration::from_millis(200));
//!     Ok("slow")
//! });
//! let fast = Task::new(|| Ok("fast"));
//!
//! let (bridge, task) = ParallelFanIn::with_executor([slow, fast], ThreadExecutor::new())
//!     .into_bridge(2)
//!     .unwrap();
//! thread::spawn(move || task.run());
//!
//! let results: Vec<_> = bridge.into_items().collect::<Result<_, _>>().unwrap();
//! assert_eq!(results, vec!["fast", "slow"]);
//! ```

use crate::{Executor, InlineExecutor, Task};
use core::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tributary_core::{
    AsyncProducerBridge, Characteristics, Producer, ProducerSink, ProducerTask, Result,
    SizeEstimate, TributaryError,
};

/// Fan-in of independent tasks into a pull sequence, in completion order.
///
/// The first failing task stops the run: its failure, wrapped in
/// [`TributaryError::TaskFailed`], terminates the sequence after the values enqueued so
/// far. Nothing is retried. Tasks still running at that point finish on their executor
/// and their results are discarded.
pub struct ParallelFanIn<R> {
    tasks: Vec<Task<R>>,
    executor: Arc<dyn Executor>,
}

impl<R: Send + 'static> ParallelFanIn<R> {
    /// Runs the tasks serially on the thread that drives the producer task.
    ///
    /// Useful for tests; results then arrive in submission order.
    pub fn new(tasks: impl IntoIterator<Item = Task<R>>) -> Self {
        Self::with_executor(tasks, InlineExecutor)
    }

    /// Submits the tasks to `executor`.
    pub fn with_executor<E>(tasks: impl IntoIterator<Item = Task<R>>, executor: E) -> Self
    where
        E: Executor + 'static,
    {
        Self {
            tasks: tasks.into_iter().collect(),
            executor: Arc::new(executor),
        }
    }

    /// Wraps the fan-in in a bridge buffering up to `capacity` results.
    ///
    /// # Errors
    ///
    /// Returns [`TributaryError::InvalidArgument`] if `capacity` is zero.
    pub fn into_bridge(self, capacity: usize) -> Result<(AsyncProducerBridge<R>, ProducerTask)> {
        AsyncProducerBridge::new(capacity, self)
    }
}

impl<R> ParallelFanIn<R> {
    /// Number of tasks in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<R> fmt::Debug for ParallelFanIn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelFanIn")
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

impl<R: Send + 'static> Producer<R> for ParallelFanIn<R> {
    fn produce(self, sink: &ProducerSink<R>) -> Result<()> {
        let Self { tasks, executor } = self;
        let total = tasks.len();
        let (completed_tx, completed_rx) = async_channel::unbounded::<(usize, Result<R>)>();

        for (index, task) in tasks.into_iter().enumerate() {
            let completed_tx = completed_tx.clone();
            executor.execute(Box::new(move || {
                let outcome = catch_unwind(AssertUnwindSafe(|| task.call())).unwrap_or_else(
                    |payload| Err(TributaryError::from_panic(&format!("task {index}"), payload)),
                );
                // The run may already have stopped at an earlier failure.
                let _ = completed_tx.try_send((index, outcome));
            }))?;
        }
        drop(completed_tx);
        debug!("fan-in submitted {} tasks", total);

        for _ in 0..total {
            let (index, outcome) = completed_rx.recv_blocking().map_err(|_| {
                TributaryError::channel_receive_error("a submitted task never reported back")
            })?;
            match outcome {
                Ok(value) => sink.enqueue(value)?,
                Err(failure) => {
                    error!("fan-in task {} failed: {}", index, failure);
                    return Err(TributaryError::task_failed(index, failure));
                }
            }
        }

        sink.complete();
        Ok(())
    }

    fn estimate_size(&self) -> SizeEstimate {
        SizeEstimate::from(self.tasks.len())
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::empty()
    }
}
