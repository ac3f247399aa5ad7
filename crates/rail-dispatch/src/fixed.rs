//! Caller-supplied routes.

use rail_core::StationId;
use rail_network::StationGraph;
use rail_routing::Route;

use crate::{DispatchError, DispatchResult, Dispatcher};

/// A [`Dispatcher`] that hands out pre-computed routes: train `i` takes
/// `routes[i mod len]`.
///
/// Useful for tests and for replaying a plan produced elsewhere.  Every
/// route is checked against the graph and the requested endpoints.
#[derive(Debug, Clone)]
pub struct FixedRoutes {
    pub routes: Vec<Route>,
}

impl FixedRoutes {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }
}

impl Dispatcher for FixedRoutes {
    fn assign(
        &mut self,
        graph:       &StationGraph,
        start:       StationId,
        end:         StationId,
        train_count: usize,
    ) -> DispatchResult<Vec<Route>> {
        if self.routes.is_empty() {
            return Err(DispatchError::NoCandidateRoutes { from: start, to: end });
        }
        for (i, route) in self.routes.iter().enumerate() {
            if route.stations.is_empty() || route.start() != start || route.end() != end {
                return Err(DispatchError::Config(format!(
                    "route {i} does not run from {} to {}",
                    graph.name(start),
                    graph.name(end)
                )));
            }
            if !route.is_walk_in(graph) {
                return Err(DispatchError::Config(format!(
                    "route {i} is not a walk in the graph: {:?}",
                    route.stations
                )));
            }
        }
        Ok((0..train_count)
            .map(|i| self.routes[i % self.routes.len()].clone())
            .collect())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
