//! Per-train route progress.

use rail_core::{StationId, TrainId};
use rail_network::StationGraph;
use rail_routing::Route;

/// Structure-of-arrays store of every train's route and progress, indexed
/// by `TrainId::index()`.
///
/// `positions[i] == routes[i].stations[cursors[i]]` holds between turns.
#[derive(Debug, Clone)]
pub struct FleetState {
    pub positions: Vec<StationId>,
    pub routes:    Vec<Route>,
    pub cursors:   Vec<usize>,
    end:           StationId,
}

impl FleetState {
    /// Place every train at the first station of its route.
    pub fn new(routes: Vec<Route>, end: StationId) -> Self {
        let positions = routes.iter().map(Route::start).collect();
        let cursors = vec![0; routes.len()];
        Self { positions, routes, cursors, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[inline]
    pub fn position(&self, train: TrainId) -> StationId {
        self.positions[train.index()]
    }

    #[inline]
    pub fn route(&self, train: TrainId) -> &Route {
        &self.routes[train.index()]
    }

    #[inline]
    pub fn has_arrived(&self, train: TrainId) -> bool {
        self.position(train) == self.end
    }

    /// The next station on `train`'s route, or `None` once it has arrived.
    pub fn next_station(&self, train: TrainId) -> Option<StationId> {
        if self.has_arrived(train) {
            return None;
        }
        let i = train.index();
        self.routes[i].station_at(self.cursors[i] + 1)
    }

    pub fn arrived_count(&self) -> usize {
        self.positions.iter().filter(|&&p| p == self.end).count()
    }

    pub fn all_arrived(&self) -> bool {
        self.positions.iter().all(|&p| p == self.end)
    }

    /// Trains that have not arrived, in id order.
    pub fn active(&self) -> impl Iterator<Item = TrainId> + '_ {
        TrainId::fleet(self.len()).filter(|&t| !self.has_arrived(t))
    }

    /// Turns needed by the longest route.
    pub fn longest_route(&self) -> usize {
        self.routes.iter().map(Route::len_turns).max().unwrap_or(0)
    }

    /// Move `train` one station along its route.
    pub(crate) fn advance(&mut self, train: TrainId, to: StationId) {
        let i = train.index();
        debug_assert_eq!(self.routes[i].station_at(self.cursors[i] + 1), Some(to));
        self.cursors[i] += 1;
        self.positions[i] = to;
    }

    /// Replace `train`'s route if it starts where the train stands, ends at
    /// the destination, and is a walk in `graph`.
    ///
    /// Returns `false` and leaves the train unchanged otherwise.
    pub(crate) fn reroute(&mut self, graph: &StationGraph, train: TrainId, route: Route) -> bool {
        if train.0 == 0 || train.index() >= self.len() {
            return false;
        }
        let i = train.index();
        if route.stations.is_empty()
            || self.has_arrived(train)
            || route.start() != self.positions[i]
            || route.end() != self.end
            || !route.is_walk_in(graph)
        {
            return false;
        }
        self.routes[i] = route;
        self.cursors[i] = 0;
        true
    }
}
