//! Run configuration.

use rail_dispatch::DispatchConfig;

/// Who may leave a station in one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DepartureRule {
    /// Only the train at the head of a station's queue may leave.
    #[default]
    HeadOnly,
    /// A train may leave when every train ahead of it in the queue leaves in
    /// the same turn.  Several trains can depart one station per turn, still
    /// in queue order.
    FifoBatch,
}

/// Movement rules and limits for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of trains, all starting at the start station.  Must be ≥ 1.
    pub train_count: usize,

    pub departure: DepartureRule,

    /// Forbid two trains from exchanging stations across one connection in
    /// the same turn.
    pub forbid_edge_swaps: bool,

    /// Turn budget.  `None` means `2 × train_count × longest assigned route`.
    pub max_turns: Option<u64>,
}

impl SimConfig {
    pub fn with_trains(train_count: usize) -> Self {
        Self { train_count, ..Self::default() }
    }

    /// The turn budget for a fleet whose longest route takes
    /// `longest_route` turns.
    pub fn budget(&self, longest_route: usize) -> u64 {
        self.max_turns
            .unwrap_or(2 * self.train_count as u64 * longest_route as u64)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            train_count:       1,
            departure:         DepartureRule::HeadOnly,
            forbid_edge_swaps: false,
            max_turns:         None,
        }
    }
}

/// Everything needed to run one simulation on a given graph and endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunSpec {
    pub sim:      SimConfig,
    pub dispatch: DispatchConfig,
}
