// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use std::thread;
use tributary::{AsyncProducerBridge, EmitOutcome, Observable, ProducerSink, TributaryError};
use tributary_test_utils::{RecordedEvent, RecordingObserver};

#[test]
fn every_observer_sees_every_item_then_complete() {
    let first = Arc::new(RecordingObserver::new());
    let second = Arc::new(RecordingObserver::new());

    let outcome = Observable::builder()
        .from_iter(vec![1, 2, 3])
        .subscribe(first.clone())
        .subscribe(second.clone())
        .build()
        .emit();

    assert!(outcome.is_completed());
    assert_eq!(outcome.items(), 3);
    for observer in [&first, &second] {
        assert_eq!(
            observer.events(),
            vec![
                RecordedEvent::Next(1),
                RecordedEvent::Next(2),
                RecordedEvent::Next(3),
                RecordedEvent::Complete,
            ]
        );
    }
}

#[test]
fn failure_is_broadcast_once_without_complete() -> anyhow::Result<()> {
    let (bridge, task) = AsyncProducerBridge::from_fn(2, |sink: &ProducerSink<&str>| {
        sink.enqueue("kept")?;
        Err(TributaryError::producer_error("source went away"))
    })?;
    let producer = thread::spawn(move || task.run());

    let first = Arc::new(RecordingObserver::new());
    let second = Arc::new(RecordingObserver::new());
    let outcome = Observable::from_sequence(bridge)
        .subscribe(first.clone())
        .subscribe(second.clone())
        .build()
        .emit();

    assert!(producer.join().unwrap().is_err());
    match outcome {
        EmitOutcome::Failed { items, error } => {
            assert_eq!(items, 1);
            assert!(error.is_producer_failure());
        }
        other => panic!("expected failure, got {other:?}"),
    }
    for observer in [&first, &second] {
        assert_eq!(observer.items(), vec!["kept"]);
        assert_eq!(observer.error_count(), 1);
        assert_eq!(observer.complete_count(), 0);
    }
    Ok(())
}

#[test]
fn failure_after_producer_completed_is_broadcast_as_error() -> anyhow::Result<()> {
    let (bridge, task) = AsyncProducerBridge::from_fn(2, |sink: &ProducerSink<u32>| {
        sink.enqueue(7)?;
        sink.complete();
        Err(TributaryError::producer_error("flush failed"))
    })?;
    let producer = thread::spawn(move || task.run());

    let observer = Arc::new(RecordingObserver::new());
    let outcome = Observable::from_sequence(bridge)
        .subscribe(observer.clone())
        .build()
        .emit();

    assert!(producer.join().unwrap().is_err());
    assert!(!outcome.is_completed());
    assert_eq!(
        observer.events(),
        vec![
            RecordedEvent::Next(7),
            RecordedEvent::Error("Producer error: flush failed".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn same_observer_registered_twice_is_notified_once() {
    let observer = Arc::new(RecordingObserver::new());

    let observable = Observable::builder()
        .from_iter(["x"])
        .subscribe(observer.clone())
        .subscribe(observer.clone())
        .build();
    assert_eq!(observable.observer_count(), 1);

    observable.emit();

    assert_eq!(observer.items(), vec!["x"]);
    assert_eq!(observer.complete_count(), 1);
}

#[test]
fn rejecting_observer_does_not_stop_the_broadcast() {
    let rejecting = Arc::new(RecordingObserver::rejecting());
    let healthy = Arc::new(RecordingObserver::new());

    let outcome = Observable::builder()
        .from_iter(1..=4)
        .subscribe(rejecting.clone())
        .subscribe(healthy.clone())
        .build()
        .emit();

    assert!(outcome.is_completed());
    assert_eq!(rejecting.items(), vec![1, 2, 3, 4]);
    assert_eq!(rejecting.complete_count(), 1);
    assert_eq!(healthy.items(), vec![1, 2, 3, 4]);
    assert_eq!(healthy.complete_count(), 1);
}

#[test]
fn no_observers_still_drains_the_sequence() {
    let outcome = Observable::builder().from_iter(0..10).build().emit();

    assert!(outcome.is_completed());
    assert_eq!(outcome.items(), 10);
    assert!(outcome.error().is_none());
}

#[test]
fn empty_source_only_completes() {
    let observer = Arc::new(RecordingObserver::<u8>::new());

    Observable::builder()
        .from_iter(Vec::<u8>::new())
        .subscribe(observer.clone())
        .build()
        .emit();

    assert_eq!(observer.events(), vec![RecordedEvent::Complete]);
}
