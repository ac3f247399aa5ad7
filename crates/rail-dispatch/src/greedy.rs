//! Greedy per-turn re-planning.
//!
//! Every train starts on the reference shortest route.  Before each turn,
//! trains that stand at the head of their station queue are re-planned in id
//! order from their current station.  Candidates come from
//! [`simple_paths`]; the first one that passes every filter is taken:
//!
//! - its next hop is not the next hop of a train planned earlier this turn
//!   (the destination is never claimed);
//! - it does not pass through the start station again;
//! - it is not identical to a route chosen earlier this turn;
//! - it meets each of those routes on at most `overlap_limit` steps (same
//!   station at the same index).
//!
//! A candidate longer than the reference by more than `detour_slack` turns
//! is replaced by the rest of the reference route when the train is on it,
//! and by a fresh shortest path otherwise.  When no candidate qualifies the
//! train also falls back to the shortest path from where it stands.

use rustc_hash::FxHashSet;
use tracing::debug;

use rail_core::StationId;
use rail_network::StationGraph;
use rail_routing::{shortest_path, simple_paths, PathLimits, Route, Router, ShortestPathOracle};

use crate::{DispatchContext, DispatchResult, Dispatcher, Reroute};

#[derive(Debug, Clone)]
pub struct GreedyReplanner {
    /// Maximum index-aligned stations shared with any route chosen earlier in the turn.
    pub overlap_limit: usize,
    /// Extra turns a candidate may take over the reference route.
    pub detour_slack: usize,
    /// Simple paths examined per train per turn.
    pub max_candidates: usize,
    reference: Option<Route>,
}

impl GreedyReplanner {
    pub const DEFAULT_OVERLAP_LIMIT: usize = 4;
    pub const DEFAULT_DETOUR_SLACK: usize = 2;
    pub const DEFAULT_MAX_CANDIDATES: usize = 32;

    pub fn new(overlap_limit: usize, detour_slack: usize, max_candidates: usize) -> Self {
        Self { overlap_limit, detour_slack, max_candidates, reference: None }
    }

    /// The shortest start→end route computed by the last `assign`.
    pub fn reference(&self) -> Option<&Route> {
        self.reference.as_ref()
    }

    fn plan_one(
        &self,
        ctx:       &DispatchContext<'_>,
        reference: &Route,
        here:      StationId,
        claimed:   &FxHashSet<StationId>,
        chosen:    &[Route],
    ) -> Option<Route> {
        let (graph, start, end) = (ctx.graph, ctx.start, ctx.end);
        let limits = PathLimits { max_paths: self.max_candidates, ..PathLimits::default() };
        let longest_allowed = reference.len_turns() + self.detour_slack;

        for p in simple_paths(graph, here, end, limits) {
            let Some(&next) = p.stations.get(1) else { continue };
            if next != end && claimed.contains(&next) {
                continue;
            }
            if p.stations[1..].contains(&start) {
                continue;
            }
            if chosen.contains(&p) {
                continue;
            }
            if chosen.iter().any(|c| c.overlap(&p) > self.overlap_limit) {
                continue;
            }
            if p.len_turns() > longest_allowed {
                return reference
                    .suffix_from(here)
                    .or_else(|| shortest_path(graph, here, end));
            }
            return Some(p);
        }

        shortest_path(graph, here, end)
    }
}

impl Default for GreedyReplanner {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_OVERLAP_LIMIT,
            Self::DEFAULT_DETOUR_SLACK,
            Self::DEFAULT_MAX_CANDIDATES,
        )
    }
}

impl Dispatcher for GreedyReplanner {
    fn assign(
        &mut self,
        graph:       &StationGraph,
        start:       StationId,
        end:         StationId,
        train_count: usize,
    ) -> DispatchResult<Vec<Route>> {
        let reference = ShortestPathOracle.route(graph, start, end)?;
        debug!(turns = reference.len_turns(), "greedy reference route");
        let routes = vec![reference.clone(); train_count];
        self.reference = Some(reference);
        Ok(routes)
    }

    fn replan(&self, ctx: &DispatchContext<'_>) -> Vec<Reroute> {
        let Some(reference) = &self.reference else {
            return vec![];
        };

        let mut claimed: FxHashSet<StationId> = FxHashSet::default();
        let mut chosen: Vec<Route> = Vec::with_capacity(ctx.ready.len());
        let mut reroutes = Vec::new();

        for &train in ctx.ready {
            let here = ctx.position(train);
            if here == ctx.end {
                continue;
            }
            let Some(route) = self.plan_one(ctx, reference, here, &claimed, &chosen) else {
                continue;
            };

            if let Some(&next) = route.stations.get(1) {
                if next != ctx.end {
                    claimed.insert(next);
                }
            }
            if route.stations[..] != *ctx.remaining(train) {
                debug!(turn = ctx.turn.0, %train, turns = route.len_turns(), "greedy reroute");
                reroutes.push(Reroute { train, route: route.clone() });
            }
            chosen.push(route);
        }

        reroutes
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
