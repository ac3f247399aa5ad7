//! Shortest-path oracle and the pluggable `Router` trait.
//!
//! # Pluggability
//!
//! Dispatchers that only need "a route from A to B" call routing through the
//! [`Router`] trait, so a collision-aware or otherwise customised search can
//! stand in for the default [`ShortestPathOracle`] without touching them.
//!
//! # Cost units
//!
//! Every connection costs exactly one turn, so costs are hop counts (`u32`).

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use rail_core::StationId;
use rail_network::StationGraph;

use crate::{MinQueue, Route, RoutingError, RoutingResult};

/// Distance value for stations that cannot reach the target.
pub const UNREACHABLE: u32 = u32::MAX;

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one instance can serve parallel
/// batch runs.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields the trivial one-station route rather than an error.
    fn route(&self, graph: &StationGraph, from: StationId, to: StationId) -> RoutingResult<Route>;

    /// [`route`](Self::route) addressed by station names.
    fn route_by_name(&self, graph: &StationGraph, from: &str, to: &str) -> RoutingResult<Route> {
        let lookup = |name: &str| {
            graph
                .id_of(name)
                .ok_or_else(|| RoutingError::StationNotFound(name.to_owned()))
        };
        self.route(graph, lookup(from)?, lookup(to)?)
    }
}

// ── ShortestPathOracle ────────────────────────────────────────────────────────

/// Uniform-cost search with unit edge weights.
///
/// The returned route has the minimum number of connections; among equally
/// short routes the one discovered first in neighbour order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPathOracle;

impl Router for ShortestPathOracle {
    fn route(&self, graph: &StationGraph, from: StationId, to: StationId) -> RoutingResult<Route> {
        shortest_path(graph, from, to).ok_or(RoutingError::UnreachableDestination { from, to })
    }
}

/// Fewest-hop route from `start` to `end`, or `None` if `end` is unreachable.
pub fn shortest_path(graph: &StationGraph, start: StationId, end: StationId) -> Option<Route> {
    search(graph, start, end, |_| false)
}

/// Like [`shortest_path`] but never passes through a station in `blocked`.
///
/// `start` and `end` are exempt from the block list.
pub fn shortest_path_avoiding(
    graph: &StationGraph,
    start: StationId,
    end: StationId,
    blocked: &FxHashSet<StationId>,
) -> Option<Route> {
    search(graph, start, end, |s| blocked.contains(&s))
}

/// Exact hop count from every station to `target`.
///
/// Breadth-first from `target`; stations that cannot reach it get
/// [`UNREACHABLE`].  Indexed by `StationId`.
pub fn hop_distances(graph: &StationGraph, target: StationId) -> Vec<u32> {
    let mut dist = vec![UNREACHABLE; graph.station_count()];
    let mut frontier = VecDeque::new();
    dist[target.index()] = 0;
    frontier.push_back(target);

    while let Some(station) = frontier.pop_front() {
        let next = dist[station.index()] + 1;
        for &n in graph.neighbors(station) {
            if dist[n.index()] == UNREACHABLE {
                dist[n.index()] = next;
                frontier.push_back(n);
            }
        }
    }
    dist
}

// ── Search internals ──────────────────────────────────────────────────────────

fn search<F>(graph: &StationGraph, start: StationId, end: StationId, is_blocked: F) -> Option<Route>
where
    F: Fn(StationId) -> bool,
{
    if start == end {
        return Some(Route::trivial(start));
    }

    let n = graph.station_count();
    // dist[v] = best known hop count to reach v.
    let mut dist = vec![UNREACHABLE; n];
    // prev[v] = station that reached v; INVALID for unreached stations.
    let mut prev = vec![StationId::INVALID; n];

    dist[start.index()] = 0;
    let mut queue: MinQueue<u32, StationId> = MinQueue::with_capacity(n);
    queue.push(0, start);

    while let Some((cost, station)) = queue.pop() {
        if station == end {
            return Some(reconstruct(&prev, start, end));
        }

        // Skip stale entries.
        if cost > dist[station.index()] {
            continue;
        }

        for &neighbor in graph.neighbors(station) {
            if neighbor != end && is_blocked(neighbor) {
                continue;
            }
            let new_cost = cost + 1;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = station;
                queue.push(new_cost, neighbor);
            }
        }
    }

    None
}

fn reconstruct(prev: &[StationId], start: StationId, end: StationId) -> Route {
    let mut stations = vec![end];
    let mut cur = end;
    while cur != start {
        cur = prev[cur.index()];
        stations.push(cur);
    }
    stations.reverse();
    Route::new(stations)
}
