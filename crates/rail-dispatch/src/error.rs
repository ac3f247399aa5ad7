use thiserror::Error;

use rail_core::StationId;
use rail_routing::RoutingError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no candidate routes from {from} to {to}")]
    NoCandidateRoutes { from: StationId, to: StationId },

    #[error("dispatch configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
