// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The pull-sequence contract: the consumer asks for one item at a time.
//!
//! A [`PullSequence`] is driven by exactly one consuming thread at a time. Implementations
//! in this crate may block inside [`try_advance`](PullSequence::try_advance) until their
//! producer delivers an item or signals the end, which is what lets an independently
//! scheduled producer feed a synchronous consumer.
//!
//! Splitting a sequence for parallel consumption is never supported:
//! [`try_split`](PullSequence::try_split) always reports that no split is available.

use crate::{Characteristics, SizeEstimate};
use tributary_error::Result;

/// Retrieves items one at a time on demand of the consumer.
pub trait PullSequence {
    /// Type of the yielded items.
    type Item;

    /// Advances by one item.
    ///
    /// If an item is obtained, `action` is invoked with it and `Ok(true)` is returned.
    /// `Ok(false)` means the sequence is exhausted; it keeps returning `Ok(false)`
    /// afterwards. May block until one of the two outcomes is known.
    ///
    /// # Errors
    ///
    /// A failure reported by the producer side, surfaced once and terminal, or
    /// [`TributaryError::Interrupted`](tributary_error::TributaryError::Interrupted) if
    /// the blocked call was interrupted.
    fn try_advance<F>(&mut self, action: F) -> Result<bool>
    where
        F: FnOnce(Self::Item);

    /// Expected number of items.
    fn estimate_size(&self) -> SizeEstimate;

    /// Descriptive properties of the yielded items.
    fn characteristics(&self) -> Characteristics;

    /// Always `None`: a live producer stream cannot be partitioned.
    fn try_split(&mut self) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }

    /// Pulls the next item, `Ok(None)` once exhausted.
    ///
    /// # Errors
    ///
    /// Same as [`try_advance`](Self::try_advance).
    fn next_item(&mut self) -> Result<Option<Self::Item>> {
        let mut slot = None;
        self.try_advance(|item| slot = Some(item))?;
        Ok(slot)
    }

    /// Drives the sequence to exhaustion on the calling thread.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failure.
    fn for_each_remaining<F>(&mut self, mut action: F) -> Result<()>
    where
        F: FnMut(Self::Item),
    {
        while self.try_advance(&mut action)? {}
        Ok(())
    }

    /// Turns the sequence into an [`Iterator`] of `Result`s.
    ///
    /// The iterator yields `Err` at most once and then fuses.
    fn into_items(self) -> PullItems<Self>
    where
        Self: Sized,
    {
        PullItems {
            sequence: self,
            finished: false,
        }
    }
}

/// Iterator returned by [`PullSequence::into_items`].
#[derive(Debug)]
pub struct PullItems<S> {
    sequence: S,
    finished: bool,
}

impl<S> PullItems<S> {
    /// Returns the wrapped sequence.
    pub fn into_inner(self) -> S {
        self.sequence
    }
}

impl<S: PullSequence> Iterator for PullItems<S> {
    type Item = Result<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.sequence.next_item() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl<S: PullSequence> core::iter::FusedIterator for PullItems<S> {}
