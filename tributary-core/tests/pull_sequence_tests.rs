// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tributary_core::{
    Characteristics, IterSequence, Observer, PullSequence, PushToPullAdapter, SizeEstimate,
    TributaryError,
};

#[test]
fn iter_sequence_yields_in_order() {
    let mut sequence = IterSequence::new(vec![3, 1, 2]);

    let mut seen = Vec::new();
    while sequence.try_advance(|n| seen.push(n)).unwrap() {}

    assert_eq!(seen, vec![3, 1, 2]);
    assert!(!sequence.try_advance(|_| unreachable!()).unwrap());
}

#[test]
fn iter_sequence_size_follows_size_hint() {
    let exact = IterSequence::new(0..4);
    assert_eq!(exact.estimate_size(), SizeEstimate::Exact(4));
    assert_eq!(exact.characteristics(), Characteristics::ORDERED);

    let filtered = IterSequence::new((0..4).filter(|n| n % 2 == 0));
    assert_eq!(filtered.estimate_size(), SizeEstimate::Unknown);
}

#[test]
fn iter_sequence_never_splits() {
    let mut sequence = IterSequence::new(0..10);
    assert!(sequence.try_split().is_none());
}

#[test]
fn into_items_fuses_after_a_failure() {
    let adapter = PushToPullAdapter::new();
    adapter.next(1).unwrap();
    adapter.error(TributaryError::producer_error("boom")).unwrap();

    let mut items = adapter.into_items();
    assert_eq!(items.next().unwrap().unwrap(), 1);
    assert!(items.next().unwrap().is_err());
    assert!(items.next().is_none());
    assert!(items.next().is_none());
}

#[test]
fn size_estimate_helpers() {
    assert_eq!(SizeEstimate::Exact(3).exact(), Some(3));
    assert_eq!(SizeEstimate::Unknown.exact(), None);
    assert!(SizeEstimate::from(7usize).is_known());
    assert_eq!(SizeEstimate::from_size_hint((2, None)), SizeEstimate::Unknown);
    assert_eq!(SizeEstimate::from_size_hint((2, Some(2))), SizeEstimate::Exact(2));
}

#[test]
fn characteristics_combine_and_print() {
    let mut flags = Characteristics::ORDERED | Characteristics::NONNULL;
    flags |= Characteristics::DISTINCT;

    assert!(flags.contains(Characteristics::ORDERED | Characteristics::DISTINCT));
    assert!(!flags.contains(Characteristics::SORTED));
    assert!(Characteristics::empty().is_empty());
    assert_eq!(format!("{flags:?}"), "{ORDERED, DISTINCT, NONNULL}");
}
