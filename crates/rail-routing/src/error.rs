use thiserror::Error;

use rail_core::StationId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no route from {from} to {to}")]
    UnreachableDestination { from: StationId, to: StationId },

    #[error("station not found: {0}")]
    StationNotFound(String),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
