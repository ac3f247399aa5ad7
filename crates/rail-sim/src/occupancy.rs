//! Per-station FIFO queues.
//!
//! Every non-destination station holds an ordered queue of the trains
//! currently standing at it.  At the start of a run all trains queue at the
//! start station in id order; afterwards every non-start station holds at
//! most one train.  The destination never holds anyone: arriving trains
//! leave the network.

use std::collections::VecDeque;

use rail_core::{StationId, TrainId};

use crate::Move;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyState {
    queues: Vec<VecDeque<TrainId>>,
    end:    StationId,
}

impl OccupancyState {
    /// Empty queues for `station_count` stations.
    pub fn new(station_count: usize, end: StationId) -> Self {
        Self { queues: vec![VecDeque::new(); station_count], end }
    }

    /// `train_count` trains queued at `start`, `T1` at the head.
    pub fn with_fleet(
        station_count: usize,
        start:         StationId,
        end:           StationId,
        train_count:   usize,
    ) -> Self {
        let mut state = Self::new(station_count, end);
        state.queues[start.index()].extend(TrainId::fleet(train_count));
        state
    }

    #[inline]
    pub fn end(&self) -> StationId {
        self.end
    }

    #[inline]
    pub fn queue(&self, station: StationId) -> &VecDeque<TrainId> {
        &self.queues[station.index()]
    }

    #[inline]
    pub fn head(&self, station: StationId) -> Option<TrainId> {
        self.queues[station.index()].front().copied()
    }

    /// Position of `train` in `station`'s queue (0 = head).
    pub fn queue_position(&self, station: StationId, train: TrainId) -> Option<usize> {
        self.queues[station.index()].iter().position(|&t| t == train)
    }

    #[inline]
    pub fn is_occupied(&self, station: StationId) -> bool {
        !self.queues[station.index()].is_empty()
    }

    /// Trains still in the network.
    pub fn occupant_count(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }
}

/// Apply one turn of resolved moves.
///
/// Movers leave their source queues first, then join their targets in the
/// order given.  Moves into the destination only remove the train.
pub fn apply_moves(mut state: OccupancyState, moves: &[Move]) -> OccupancyState {
    for m in moves {
        let queue = &mut state.queues[m.from.index()];
        if let Some(pos) = queue.iter().position(|&t| t == m.train) {
            queue.remove(pos);
        }
    }
    for m in moves {
        if m.to != state.end {
            state.queues[m.to.index()].push_back(m.train);
        }
    }
    state
}
