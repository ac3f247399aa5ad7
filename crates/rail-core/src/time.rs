//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Turn` counter.  In one turn every
//! train may traverse at most one connection, so turns are also the unit of
//! route length: a route through `k + 1` stations takes `k` turns.
//!
//! `Turn(0)` is the state before any move; the first turn that can contain
//! moves is `Turn(1)`.

use std::fmt;

/// An absolute simulation turn counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u64);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    /// Return the turn `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Turn {
        Turn(self.0 + n)
    }

    /// The turn immediately after `self`.
    #[inline]
    pub fn next(self) -> Turn {
        Turn(self.0 + 1)
    }

    /// Turns elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Turn) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Turn {
    type Output = Turn;
    #[inline]
    fn add(self, rhs: u64) -> Turn {
        Turn(self.0 + rhs)
    }
}

impl std::ops::Sub for Turn {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Turn) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn {}", self.0)
    }
}
