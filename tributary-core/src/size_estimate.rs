// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// How many items a [`PullSequence`](crate::PullSequence) expects to yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeEstimate {
    /// The sequence yields exactly this many items when it completes normally.
    Exact(u64),
    /// The count is unknown, possibly unbounded.
    Unknown,
}

impl SizeEstimate {
    /// Returns the exact count, if known.
    #[must_use]
    pub const fn exact(self) -> Option<u64> {
        match self {
            Self::Exact(n) => Some(n),
            Self::Unknown => None,
        }
    }

    /// Returns `true` if the count is known.
    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self, Self::Exact(_))
    }

    /// Builds an estimate from an iterator's `size_hint`, exact only when both bounds agree.
    #[must_use]
    pub fn from_size_hint((lower, upper): (usize, Option<usize>)) -> Self {
        match upper {
            Some(upper) if upper == lower => Self::Exact(lower as u64),
            _ => Self::Unknown,
        }
    }
}

impl From<usize> for SizeEstimate {
    fn from(count: usize) -> Self {
        Self::Exact(count as u64)
    }
}
