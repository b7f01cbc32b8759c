// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-tokio")]

use tributary_exec::{ParallelFanIn, TokioExecutor};
use tributary_test_utils::{drain, sleeping_task};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn tokio_blocking_pool_yields_completion_order() {
    let executor = TokioExecutor::current().unwrap();
    let tasks = vec![
        sleeping_task(300, "a"),
        sleeping_task(50, "b"),
        sleeping_task(150, "c"),
    ];
    let (bridge, task) = ParallelFanIn::with_executor(tasks, executor)
        .into_bridge(1)
        .unwrap();

    let producer = tokio::task::spawn_blocking(move || task.run());
    let (items, failure) = tokio::task::spawn_blocking(move || drain(bridge))
        .await
        .unwrap();

    producer.await.unwrap().unwrap();
    assert!(failure.is_none());
    assert_eq!(items, vec!["b", "c", "a"]);
}

#[test]
fn current_fails_outside_a_runtime() {
    assert!(TokioExecutor::current().is_err());
}
