//! Route changes requested during re-planning.

use rail_core::TrainId;
use rail_routing::Route;

/// Replace `train`'s remaining route with `route`.
///
/// `route` must start at the train's current station and end at the
/// destination.  The simulator ignores (and logs) reroutes that do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reroute {
    pub train: TrainId,
    pub route: Route,
}
