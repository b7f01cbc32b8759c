// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]

#[macro_use]
mod logging;

pub mod executor;
pub mod parallel_fan_in;
pub mod task;

pub use executor::{Executor, InlineExecutor, Job, ThreadExecutor};
#[cfg(feature = "runtime-tokio")]
pub use executor::TokioExecutor;
pub use parallel_fan_in::ParallelFanIn;
pub use task::Task;
