//! Static round-robin distribution over strategy candidates.
//!
//! # Choosing how many routes to use
//!
//! With `m` routes and `n` trains dealt round-robin, route `r` carries
//! `load_r = ceil((n - r) / m)` trains.  Trains on one route leave the start
//! one per turn and follow each other through, so that route finishes after
//! `len_r + load_r - 1` turns.  The dispatcher keeps the prefix of the
//! candidate list that minimises the largest of these; ties keep fewer
//! routes.  A long detour is therefore only used when it actually shortens
//! the run.

use tracing::debug;

use rail_core::StationId;
use rail_network::StationGraph;
use rail_routing::{PathStrategy, Route};

use crate::{DispatchResult, Dispatcher};

/// Train `i` takes candidate `i mod m`, `m` chosen by [`estimated_makespan`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin {
    pub strategy: PathStrategy,
}

impl RoundRobin {
    pub fn new(strategy: PathStrategy) -> Self {
        Self { strategy }
    }
}

impl Dispatcher for RoundRobin {
    fn assign(
        &mut self,
        graph:       &StationGraph,
        start:       StationId,
        end:         StationId,
        train_count: usize,
    ) -> DispatchResult<Vec<Route>> {
        // Never empty: the reference route always comes first.
        let candidates = self.strategy.candidates(graph, start, end)?;

        let used = best_prefix(&candidates, train_count);
        debug!(
            candidates = candidates.len(),
            used,
            makespan = estimated_makespan(&candidates[..used], train_count),
            "round-robin distribution"
        );

        Ok((0..train_count)
            .map(|i| candidates[i % used].clone())
            .collect())
    }

    fn name(&self) -> &'static str {
        "round-robin"
    }
}

/// Turns needed for `train_count` trains dealt round-robin over `routes`,
/// assuming trains on one route never wait for another route.
pub fn estimated_makespan(routes: &[Route], train_count: usize) -> usize {
    let m = routes.len();
    if m == 0 || train_count == 0 {
        return 0;
    }
    routes
        .iter()
        .enumerate()
        .filter(|&(r, _)| r < train_count)
        .map(|(r, route)| {
            let load = (train_count - r).div_ceil(m);
            route.len_turns() + load - 1
        })
        .max()
        .unwrap_or(0)
}

/// Length of the candidate prefix with the lowest estimated makespan.
fn best_prefix(candidates: &[Route], train_count: usize) -> usize {
    let max_m = candidates.len().min(train_count.max(1));
    let mut best = (usize::MAX, 1);
    for m in 1..=max_m {
        let makespan = estimated_makespan(&candidates[..m], train_count);
        if makespan < best.0 {
            best = (makespan, m);
        }
    }
    best.1
}
