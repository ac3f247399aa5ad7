//! `PathStrategy`: one switch for every way of producing candidate routes.

use rustc_hash::FxHashSet;
use tracing::debug;

use rail_core::StationId;
use rail_network::StationGraph;

use crate::shortest::{shortest_path, shortest_path_avoiding};
use crate::time_expanded::{Heuristic, TimeExpandedPathfinder};
use crate::{Route, RoutingError, RoutingResult};

/// How a dispatcher obtains its candidate routes.
///
/// Every variant returns a de-duplicated list whose first element is the
/// reference shortest route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PathStrategy {
    /// The reference shortest route only.
    ShortestOnly,
    /// Up to `k` routes that share no intermediate station.
    KShortest { k: usize },
    /// Distinct loop-free routes of one collision-aware planning wave.
    TimeExpandedCollisionAware { wave_size: usize, heuristic: Heuristic },
}

impl Default for PathStrategy {
    fn default() -> Self {
        PathStrategy::TimeExpandedCollisionAware {
            wave_size: 4,
            heuristic: Heuristic::Constant,
        }
    }
}

impl PathStrategy {
    /// Candidate routes from `start` to `end`.
    ///
    /// The shortest route is always the first entry.  Fails with
    /// `UnreachableDestination` if there is no route at all.
    pub fn candidates(
        &self,
        graph: &StationGraph,
        start: StationId,
        end:   StationId,
    ) -> RoutingResult<Vec<Route>> {
        let reference = shortest_path(graph, start, end)
            .ok_or(RoutingError::UnreachableDestination { from: start, to: end })?;
        let mut out = vec![reference];

        match *self {
            PathStrategy::ShortestOnly => {}

            PathStrategy::KShortest { k } => {
                let mut blocked: FxHashSet<StationId> = FxHashSet::default();
                block_intermediates(&mut blocked, &out[0]);
                while out.len() < k {
                    let Some(route) = shortest_path_avoiding(graph, start, end, &blocked) else {
                        break;
                    };
                    // A direct start-end connection has no intermediates to block.
                    if out.contains(&route) {
                        break;
                    }
                    block_intermediates(&mut blocked, &route);
                    out.push(route);
                }
            }

            PathStrategy::TimeExpandedCollisionAware { wave_size, heuristic } => {
                let finder = TimeExpandedPathfinder::new(heuristic);
                let max_offset = graph.station_count() as u64;
                for committed in finder.plan_wave(graph, start, end, wave_size, max_offset) {
                    // Detours that revisit a station would re-enter occupied queues.
                    if committed.route.is_simple() && !out.contains(&committed.route) {
                        out.push(committed.route);
                    }
                }
            }
        }

        debug!(strategy = ?self, candidates = out.len(), "candidate routes");
        Ok(out)
    }
}

fn block_intermediates(blocked: &mut FxHashSet<StationId>, route: &Route) {
    let n = route.stations.len();
    if n > 2 {
        blocked.extend(route.stations[1..n - 1].iter().copied());
    }
}
