// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Characteristics, PullSequence, SizeEstimate};
use tributary_error::Result;

/// Adapts a plain [`Iterator`] to the pull-sequence contract.
///
/// The sequence is [`ORDERED`](Characteristics::ORDERED); its size is exact only when the
/// iterator's `size_hint` bounds agree.
#[derive(Debug, Clone)]
pub struct IterSequence<I> {
    iter: I,
}

impl<I: Iterator> IterSequence<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter(),
        }
    }
}

impl<I: Iterator> PullSequence for IterSequence<I> {
    type Item = I::Item;

    fn try_advance<F>(&mut self, action: F) -> Result<bool>
    where
        F: FnOnce(Self::Item),
    {
        match self.iter.next() {
            Some(item) => {
                action(item);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn estimate_size(&self) -> SizeEstimate {
        SizeEstimate::from_size_hint(self.iter.size_hint())
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED
    }
}
