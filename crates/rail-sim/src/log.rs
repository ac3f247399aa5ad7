//! Movement log types.

use rail_core::{StationId, TrainId, Turn};

/// One train traversing one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub train: TrainId,
    pub from:  StationId,
    pub to:    StationId,
}

/// All moves of one turn, in ascending train order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    pub turn:  Turn,
    pub moves: Vec<Move>,
}

/// The turns of a run that contained at least one move, in order.
///
/// Turns are numbered from `Turn(1)` without gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementLog {
    pub turns: Vec<TurnRecord>,
}

impl MovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TurnRecord) {
        debug_assert!(record.moves.windows(2).all(|w| w[0].train < w[1].train));
        self.turns.push(record);
    }

    /// Number of logged turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TurnRecord> {
        self.turns.iter()
    }

    pub fn total_moves(&self) -> usize {
        self.turns.iter().map(|t| t.moves.len()).sum()
    }

    /// Every move of `train`, in turn order.
    pub fn moves_of(&self, train: TrainId) -> Vec<(Turn, Move)> {
        self.turns
            .iter()
            .flat_map(|t| t.moves.iter().filter(|m| m.train == train).map(|m| (t.turn, *m)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a MovementLog {
    type Item = &'a TurnRecord;
    type IntoIter = std::slice::Iter<'a, TurnRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

/// The result of a run in which every train reached the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimOutcome {
    pub log:   MovementLog,
    /// Number of turns the run took (equals `log.len()`).
    pub turns: u64,
}
