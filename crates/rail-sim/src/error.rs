use std::fmt;

use rail_dispatch::DispatchError;
use thiserror::Error;

use crate::MovementLog;

/// Why a run stopped before every train arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StallReason {
    /// Two consecutive turns without a single move.
    Deadlock,
    /// The turn budget ran out.
    BudgetExceeded,
}

impl fmt::Display for StallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StallReason::Deadlock => f.write_str("deadlock"),
            StallReason::BudgetExceeded => f.write_str("turn budget exceeded"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("station not found: {0}")]
    UnknownStation(String),

    #[error("simulation did not converge ({reason}) after {turns} turns (budget {budget})")]
    NonConvergent {
        reason: StallReason,
        turns:  u64,
        budget: u64,
        /// Turns completed before the run stopped.
        log:    MovementLog,
    },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type SimResult<T> = Result<T, SimError>;
