//! Grid coordinate type.
//!
//! Station positions are non-negative integer pairs.  They carry no routing
//! cost (every connection is one turn); they exist so the loader can reject
//! two stations drawn on the same spot and so tools can look stations up by
//! position.

use std::fmt;

/// A non-negative integer grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance between two grid positions.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// `[x, y]` widened to `i64`, the point type of the R-tree index.
    #[inline]
    pub fn as_point(self) -> [i64; 2] {
        [i64::from(self.x), i64::from(self.y)]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
