// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// Descriptive properties of the items a [`PullSequence`](crate::PullSequence) yields.
///
/// These flags are informational only; nothing in this crate enforces them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Characteristics(u32);

impl Characteristics {
    /// Items arrive in a defined encounter order.
    pub const ORDERED: Self = Self(1 << 0);
    /// No two items are equal.
    pub const DISTINCT: Self = Self(1 << 1);
    /// Items arrive sorted.
    pub const SORTED: Self = Self(1 << 2);
    /// The size estimate is exact before traversal starts.
    pub const SIZED: Self = Self(1 << 3);
    /// Items are never absent values.
    pub const NONNULL: Self = Self(1 << 4);
    /// The source cannot be structurally modified during traversal.
    pub const IMMUTABLE: Self = Self(1 << 5);
    /// The source may be modified concurrently without external synchronization.
    pub const CONCURRENT: Self = Self(1 << 6);
    /// Any split would also be sized.
    pub const SUBSIZED: Self = Self(1 << 7);

    const NAMES: [(Self, &'static str); 8] = [
        (Self::ORDERED, "ORDERED"),
        (Self::DISTINCT, "DISTINCT"),
        (Self::SORTED, "SORTED"),
        (Self::SIZED, "SIZED"),
        (Self::NONNULL, "NONNULL"),
        (Self::IMMUTABLE, "IMMUTABLE"),
        (Self::CONCURRENT, "CONCURRENT"),
        (Self::SUBSIZED, "SUBSIZED"),
    ];

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every flag in `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Characteristics {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for Characteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}
