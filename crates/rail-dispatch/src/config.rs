//! Serialisable dispatcher selection.

use rail_routing::PathStrategy;

use crate::{Dispatcher, GreedyReplanner, RoundRobin};

/// Which dispatcher a run uses, and its parameters.
///
/// With the `serde` feature this reads from JSON as, e.g.
///
/// ```json
/// { "policy": "round_robin", "strategy": { "kind": "k_shortest", "k": 4 } }
/// { "policy": "greedy", "overlap_limit": 4, "detour_slack": 2, "max_candidates": 32 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "policy", rename_all = "snake_case"))]
pub enum DispatchConfig {
    RoundRobin {
        #[cfg_attr(feature = "serde", serde(default))]
        strategy: PathStrategy,
    },
    Greedy {
        overlap_limit:  usize,
        detour_slack:   usize,
        max_candidates: usize,
    },
}

impl DispatchConfig {
    /// Greedy re-planning with the default parameters.
    pub fn greedy() -> Self {
        DispatchConfig::Greedy {
            overlap_limit:  GreedyReplanner::DEFAULT_OVERLAP_LIMIT,
            detour_slack:   GreedyReplanner::DEFAULT_DETOUR_SLACK,
            max_candidates: GreedyReplanner::DEFAULT_MAX_CANDIDATES,
        }
    }

    pub fn round_robin(strategy: PathStrategy) -> Self {
        DispatchConfig::RoundRobin { strategy }
    }

    /// Instantiate the configured dispatcher.
    pub fn build(&self) -> Box<dyn Dispatcher> {
        match *self {
            DispatchConfig::RoundRobin { strategy } => Box::new(RoundRobin::new(strategy)),
            DispatchConfig::Greedy { overlap_limit, detour_slack, max_candidates } => {
                Box::new(GreedyReplanner::new(overlap_limit, detour_slack, max_candidates))
            }
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig::RoundRobin { strategy: PathStrategy::default() }
    }
}
