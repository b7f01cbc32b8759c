// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tributary_core::{
    AsyncProducerBridge, Characteristics, FnProducer, IntoTributaryError, Producer,
    ProducerSink, PullSequence, SizeEstimate, TributaryError,
};

struct Countdown {
    from: u64,
}

impl Producer<u64> for Countdown {
    fn produce(self, sink: &ProducerSink<u64>) -> tributary_core::Result<()> {
        for n in (1..=self.from).rev() {
            sink.enqueue(n)?;
        }
        sink.complete();
        Ok(())
    }

    fn estimate_size(&self) -> SizeEstimate {
        SizeEstimate::Exact(self.from)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED | Characteristics::DISTINCT | Characteristics::SIZED
    }
}

#[test]
fn delivers_items_produced_on_another_thread_in_order() {
    let (bridge, task) = AsyncProducerBridge::new(3, Countdown { from: 50 }).unwrap();
    let producer = thread::spawn(move || task.run());

    let items: Vec<u64> = bridge.into_items().collect::<Result<_, _>>().unwrap();

    producer.join().unwrap().unwrap();
    assert_eq!(items, (1..=50).rev().collect::<Vec<_>>());
}

#[test]
fn reports_captured_size_and_characteristics() {
    let (bridge, _task) = AsyncProducerBridge::new(1, Countdown { from: 4 }).unwrap();

    assert_eq!(bridge.estimate_size(), SizeEstimate::Exact(4));
    assert!(bridge
        .characteristics()
        .contains(Characteristics::ORDERED | Characteristics::SIZED));
    assert_eq!(bridge.capacity(), 1);
}

#[test]
fn closure_producer_defaults_to_unknown_size() {
    let (mut bridge, task) =
        AsyncProducerBridge::from_fn(2, |sink| sink.enqueue("only")).unwrap();

    assert_eq!(bridge.estimate_size(), SizeEstimate::Unknown);
    assert!(bridge.characteristics().is_empty());

    thread::spawn(move || task.run());
    assert_eq!(bridge.next_item().unwrap(), Some("only"));
    assert_eq!(bridge.next_item().unwrap(), None);
}

#[test]
fn fn_producer_carries_descriptive_metadata() {
    let producer = FnProducer::new(|sink: &ProducerSink<i32>| sink.enqueue(1))
        .with_estimate(SizeEstimate::Exact(1))
        .with_characteristics(Characteristics::NONNULL);

    let (bridge, _task) = AsyncProducerBridge::with_default_capacity(producer).unwrap();
    assert_eq!(bridge.estimate_size(), SizeEstimate::Exact(1));
    assert_eq!(bridge.characteristics(), Characteristics::NONNULL);
}

#[test]
fn zero_capacity_is_rejected() {
    let err = AsyncProducerBridge::<i32>::from_fn(0, |_sink| Ok(())).unwrap_err();
    assert!(err.is_caller_error());
}

#[test]
fn try_split_is_never_available() {
    let (mut bridge, _task) = AsyncProducerBridge::new(1, Countdown { from: 3 }).unwrap();
    assert!(bridge.try_split().is_none());
}

#[test]
fn consumer_waits_for_a_slow_first_item() {
    let (mut bridge, task) = AsyncProducerBridge::from_fn(1, |sink| {
        thread::sleep(Duration::from_millis(150));
        sink.enqueue(99)
    })
    .unwrap();
    thread::spawn(move || task.run());

    assert_eq!(bridge.next_item().unwrap(), Some(99));
    assert_eq!(bridge.next_item().unwrap(), None);
}

#[test]
fn producer_failure_reaches_consumer_after_buffered_items() {
    let (mut bridge, task) = AsyncProducerBridge::from_fn(4, |sink| {
        sink.enqueue(1)?;
        sink.enqueue(2)?;
        Err(std::io::Error::other("link down").into_tributary_error("reading frames"))
    })
    .unwrap();

    let driver_result = task.run();
    assert!(driver_result.is_err());

    let mut seen = Vec::new();
    let err = bridge.for_each_remaining(|n| seen.push(n)).unwrap_err();
    assert_eq!(seen, vec![1, 2]);
    assert_eq!(err.to_string(), "Producer error: reading frames: link down");
    assert_eq!(bridge.next_item().unwrap(), None);
}

#[test]
fn failure_after_complete_still_reaches_consumer() -> anyhow::Result<()> {
    let (mut bridge, task) = AsyncProducerBridge::from_fn(4, |sink| {
        sink.enqueue(1)?;
        sink.complete();
        Err(TributaryError::producer_error("late cleanup failed"))
    })?;

    let driver_err = task.run().unwrap_err();
    assert!(driver_err.is_producer_failure());

    assert_eq!(bridge.next_item()?, Some(1));
    let err = bridge.next_item().unwrap_err();
    assert_eq!(err.to_string(), "Producer error: late cleanup failed");
    assert_eq!(bridge.next_item()?, None);
    Ok(())
}

#[test]
fn enqueue_after_complete_is_rejected() -> anyhow::Result<()> {
    let (bridge, task) = AsyncProducerBridge::from_fn(2, |sink| {
        sink.enqueue("kept")?;
        sink.complete();
        assert!(sink.is_completed());
        let rejected = sink.enqueue("dropped").unwrap_err();
        assert!(rejected.is_caller_error());
        Ok(())
    })?;

    task.run()?;
    let items: Vec<&str> = bridge.into_items().collect::<Result<_, _>>()?;
    assert_eq!(items, vec!["kept"]);
    Ok(())
}

#[test]
fn producer_panic_is_surfaced_as_callback_panic() {
    let (mut bridge, task) = AsyncProducerBridge::<i32>::from_fn(1, |_sink| {
        panic!("producer exploded");
    })
    .unwrap();

    let err = thread::spawn(move || task.run())
        .join()
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, TributaryError::CallbackPanic { .. }));

    let err = bridge.next_item().unwrap_err();
    assert!(err.to_string().contains("producer exploded"));
}

#[test]
fn dropping_an_unlaunched_task_fails_the_sequence() {
    let (mut bridge, task) = AsyncProducerBridge::<i32>::from_fn(1, |_sink| Ok(())).unwrap();
    drop(task);

    let err = bridge.next_item().unwrap_err();
    assert!(matches!(err, TributaryError::InvalidState { .. }));
}

#[test]
fn interrupt_handle_unblocks_consumer() {
    let (mut bridge, task) = AsyncProducerBridge::<i32>::from_fn(1, |sink| {
        while !sink.is_interrupted() {
            thread::sleep(Duration::from_millis(5));
        }
        Ok(())
    })
    .unwrap();
    let handle = bridge.interrupt_handle();
    let producer = thread::spawn(move || task.run());

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        handle.interrupt();
        tx.send(()).unwrap();
    });

    let err = bridge.next_item().unwrap_err();
    assert!(err.is_interrupted());
    rx.recv().unwrap();
    producer.join().unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn producer_task_runs_on_tokio_blocking_pool() {
    let (bridge, task) = AsyncProducerBridge::new(2, Countdown { from: 10 }).unwrap();
    let producer = tokio::task::spawn_blocking(move || task.run());

    let items = tokio::task::spawn_blocking(move || {
        bridge.into_items().collect::<Result<Vec<_>, _>>()
    })
    .await
    .unwrap()
    .unwrap();

    producer.await.unwrap().unwrap();
    assert_eq!(items, (1..=10).rev().collect::<Vec<_>>());
}
