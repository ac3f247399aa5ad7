//! Read-only simulation state passed to [`Dispatcher::replan`][crate::Dispatcher::replan].

use rail_core::{StationId, TrainId, Turn};
use rail_network::StationGraph;
use rail_routing::Route;

/// A snapshot of the fleet at the start of a turn.
///
/// Built by `rail-sim` once per turn.  All slices are indexed by
/// `TrainId::index()`.
pub struct DispatchContext<'a> {
    /// The turn about to be resolved.
    pub turn: Turn,

    pub graph: &'a StationGraph,
    pub start: StationId,
    pub end:   StationId,

    /// Current station of every train.
    pub positions: &'a [StationId],

    /// Currently assigned route of every train.
    pub routes: &'a [Route],

    /// Index of each train's current station within its route.
    pub cursors: &'a [usize],

    /// Trains that have not arrived and stand at the head of their station
    /// queue, in ascending id order.
    pub ready: &'a [TrainId],
}

impl<'a> DispatchContext<'a> {
    pub fn position(&self, train: TrainId) -> StationId {
        self.positions[train.index()]
    }

    /// The part of `train`'s route still ahead of it, current station first.
    pub fn remaining(&self, train: TrainId) -> &'a [StationId] {
        let i = train.index();
        &self.routes[i].stations[self.cursors[i]..]
    }

    pub fn has_arrived(&self, train: TrainId) -> bool {
        self.position(train) == self.end
    }

    pub fn train_count(&self) -> usize {
        self.positions.len()
    }
}
