//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.
//!
//! `StationId` is a dense 0-based index into the graph's arrays.  `TrainId`
//! is 1-based because trains are reported to users as `T1..TN`; use
//! [`TrainId::index`] to get the 0-based slot for `Vec` indexing.

use std::fmt;

/// Shared impls for integer-backed IDs.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" (`u32::MAX`).
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

typed_id! {
    /// Index of a station in the graph, assigned in insertion order.
    pub struct StationId(u32);
}

typed_id! {
    /// Identity of a train, numbered from 1.
    pub struct TrainId(u32);
}

// ── StationId ─────────────────────────────────────────────────────────────────

impl StationId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl From<StationId> for usize {
    #[inline(always)]
    fn from(id: StationId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for StationId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<StationId, Self::Error> {
        u32::try_from(n).map(StationId)
    }
}

// ── TrainId ───────────────────────────────────────────────────────────────────

impl TrainId {
    /// The train occupying 0-based slot `index` (slot 0 is `T1`).
    #[inline]
    pub fn from_index(index: usize) -> Self {
        TrainId(index as u32 + 1)
    }

    /// 0-based slot for per-train `Vec`s.
    #[inline(always)]
    pub fn index(self) -> usize {
        debug_assert!(self.0 >= 1, "TrainId is 1-based");
        (self.0 - 1) as usize
    }

    /// Iterator over `T1..=Tn`.
    pub fn fleet(n: usize) -> impl Iterator<Item = TrainId> {
        (0..n).map(TrainId::from_index)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
