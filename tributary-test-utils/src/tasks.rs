// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::thread;
use std::time::Duration;
use tributary_core::TributaryError;
use tributary_exec::Task;

/// A task that sleeps for `millis` and then returns `value`.
pub fn sleeping_task<R: Send + 'static>(millis: u64, value: R) -> Task<R> {
    Task::new(move || {
        thread::sleep(Duration::from_millis(millis));
        Ok(value)
    })
}

/// A task that sleeps for `millis` and then fails with a producer error carrying `message`.
pub fn failing_task<R: Send + 'static>(millis: u64, message: &str) -> Task<R> {
    let message = message.to_string();
    Task::new(move || {
        thread::sleep(Duration::from_millis(millis));
        Err(TributaryError::producer_error(message))
    })
}
