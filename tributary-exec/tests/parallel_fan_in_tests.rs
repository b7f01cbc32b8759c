// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tributary_core::{PullSequence, SizeEstimate, TributaryError};
use tributary_exec::{ParallelFanIn, Task, ThreadExecutor};
use tributary_test_utils::{drain, failing_task, sleeping_task};

#[test]
fn concurrent_policy_yields_completion_order() {
    let tasks = vec![
        sleeping_task(300, "a"),
        sleeping_task(50, "b"),
        sleeping_task(150, "c"),
    ];
    let (bridge, task) = ParallelFanIn::with_executor(tasks, ThreadExecutor::new())
        .into_bridge(1)
        .unwrap();
    let producer = thread::spawn(move || task.run());

    let (items, failure) = drain(bridge);

    producer.join().unwrap().unwrap();
    assert!(failure.is_none());
    assert_eq!(items, vec!["b", "c", "a"]);
}

#[test]
fn inline_policy_yields_submission_order() {
    let tasks = vec![
        sleeping_task(30, 1),
        sleeping_task(0, 2),
        sleeping_task(10, 3),
    ];
    let (bridge, task) = ParallelFanIn::new(tasks).into_bridge(1).unwrap();
    let producer = thread::spawn(move || task.run());

    let (items, failure) = drain(bridge);

    producer.join().unwrap().unwrap();
    assert!(failure.is_none());
    assert_eq!(items, vec![1, 2, 3]);
}

#[test]
fn estimate_is_the_task_count() {
    let fan_in = ParallelFanIn::new((0..5).map(|i| Task::new(move || Ok(i))));
    assert_eq!(fan_in.len(), 5);

    let (mut bridge, _task) = fan_in.into_bridge(2).unwrap();
    assert_eq!(bridge.estimate_size(), SizeEstimate::Exact(5));
    assert!(bridge.try_split().is_none());
}

#[test]
fn empty_batch_completes_immediately() {
    let fan_in = ParallelFanIn::<u8>::new(Vec::new());
    assert!(fan_in.is_empty());

    let (mut bridge, task) = fan_in.into_bridge(1).unwrap();
    task.run().unwrap();
    assert_eq!(bridge.next_item().unwrap(), None);
}

#[test]
fn first_failure_stops_the_run() {
    let tasks = vec![
        sleeping_task(10, "ok"),
        failing_task(60, "backend unavailable"),
        sleeping_task(400, "too late"),
    ];
    let (bridge, task) = ParallelFanIn::with_executor(tasks, ThreadExecutor::new())
        .into_bridge(4)
        .unwrap();
    let producer = thread::spawn(move || task.run());

    let (items, failure) = drain(bridge);

    let driver_err = producer.join().unwrap().unwrap_err();
    assert!(matches!(driver_err, TributaryError::TaskFailed { index: 1, .. }));
    assert_eq!(items, vec!["ok"]);
    let failure = failure.expect("the consumer sees the task failure");
    assert_eq!(
        failure.to_string(),
        "Task 1 failed: Producer error: backend unavailable"
    );
}

#[test]
fn panicking_task_is_reported_as_failure() {
    let tasks = vec![Task::<i32>::new(|| panic!("task blew up"))];
    let (bridge, task) = ParallelFanIn::new(tasks).into_bridge(1).unwrap();

    assert!(task.run().is_err());
    let (items, failure) = drain(bridge);

    assert!(items.is_empty());
    let failure = failure.unwrap();
    assert!(failure.to_string().contains("task blew up"));
}

#[test]
fn every_task_runs_exactly_once() {
    let runs = Arc::new(AtomicUsize::new(0));
    let tasks = (0..8).map(|i| {
        let runs = Arc::clone(&runs);
        Task::new(move || {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(i)
        })
    });
    let (bridge, task) = ParallelFanIn::with_executor(tasks, ThreadExecutor::named("fan-in-test"))
        .into_bridge(2)
        .unwrap();
    let producer = thread::spawn(move || task.run());

    let (mut items, _) = drain(bridge);
    producer.join().unwrap().unwrap();

    items.sort_unstable();
    assert_eq!(items, (0..8).collect::<Vec<_>>());
    assert_eq!(runs.load(Ordering::SeqCst), 8);
}
