//! Time-expanded, collision-aware path search.
//!
//! # Model
//!
//! Search nodes are `(station, t)` pairs where `t` counts turns since the
//! planned train's own departure.  `(s, t)` connects to `(s', t + 1)` for
//! every neighbour `s'` of `s`.  Waiting in place is not a move, so a train
//! that cannot advance must detour.
//!
//! A train departing at `start_offset` occupies `(s, start_offset + t)` in
//! absolute time.  [`Reservations`] records these pairs for routes already
//! committed; a neighbour whose absolute slot is reserved is pruned.  The
//! destination has unbounded capacity and is never treated as reserved.
//! The departure slot at the source is a queue, not an occupancy, so it is
//! neither reserved nor checked.
//!
//! # Termination
//!
//! Each `(station, t)` pair is expanded at most once and `t` is capped at
//! `latest reservation - start_offset + station_count`.  Past the latest
//! reservation nothing is blocked, so any station that can reach the
//! destination at all does so within `station_count - 1` further hops.
//!
//! # Arena
//!
//! Nodes live in a `Vec` owned by one search call; parents are `u32` indices
//! into it.

use rustc_hash::FxHashSet;
use tracing::debug;

use rail_core::StationId;
use rail_network::StationGraph;

use crate::shortest::{hop_distances, UNREACHABLE};
use crate::{MinQueue, Route, Router, RoutingError, RoutingResult};

const NO_PARENT: u32 = u32::MAX;

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// A* heuristic used by [`TimeExpandedPathfinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// Always 1.  Orders the queue exactly like uniform-cost search.
    #[default]
    Constant,
    /// Exact hop distance to the destination, ignoring reservations.
    /// Admissible and consistent.
    GraphDistance,
}

// ── Reservations ──────────────────────────────────────────────────────────────

/// A committed route and the absolute turn at which its train departs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommittedRoute {
    pub route:        Route,
    pub start_offset: u64,
}

/// `(station, absolute turn)` slots held by committed routes.
#[derive(Debug, Clone, Default)]
pub struct Reservations {
    slots:  FxHashSet<(StationId, u64)>,
    latest: u64,
}

impl Reservations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve every slot `route` occupies after departing at `start_offset`.
    ///
    /// The departure slot and the destination are skipped.
    pub fn commit(&mut self, route: &Route, start_offset: u64) {
        let end = route.end();
        for (t, &station) in route.stations.iter().enumerate().skip(1) {
            let at = start_offset + t as u64;
            self.latest = self.latest.max(at);
            if station != end {
                self.slots.insert((station, at));
            }
        }
    }

    #[inline]
    pub fn is_reserved(&self, station: StationId, at: u64) -> bool {
        self.slots.contains(&(station, at))
    }

    /// The last absolute turn any committed route is still travelling.
    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ── TimeExpandedPathfinder ────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct SearchNode {
    station: StationId,
    time:    u64,
    parent:  u32,
}

/// A* over `(station, time)` that avoids reserved slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeExpandedPathfinder {
    pub heuristic: Heuristic,
}

impl TimeExpandedPathfinder {
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }

    /// Find a route for a train departing `start` at absolute turn
    /// `start_offset` that collides with no slot in `reserved`.
    ///
    /// Returns `None` if the destination cannot be reached under the
    /// reservations.
    pub fn find(
        &self,
        graph: &StationGraph,
        start: StationId,
        end: StationId,
        start_offset: u64,
        reserved: &Reservations,
    ) -> Option<Route> {
        if start == end {
            return Some(Route::trivial(start));
        }

        let to_end = hop_distances(graph, end);
        if to_end[start.index()] == UNREACHABLE {
            return None;
        }

        let horizon = reserved.latest().saturating_sub(start_offset) + graph.station_count() as u64;
        let h = |s: StationId| -> u64 {
            match self.heuristic {
                Heuristic::Constant => 1,
                Heuristic::GraphDistance => u64::from(to_end[s.index()]),
            }
        };

        let mut arena: Vec<SearchNode> =
            vec![SearchNode { station: start, time: 0, parent: NO_PARENT }];
        let mut visited: FxHashSet<(StationId, u64)> = FxHashSet::default();
        visited.insert((start, 0));
        let mut queue: MinQueue<u64, u32> = MinQueue::new();
        queue.push(h(start), 0);

        while let Some((_, idx)) = queue.pop() {
            let node = arena[idx as usize];
            if node.station == end {
                return Some(reconstruct(&arena, idx));
            }
            if node.time >= horizon {
                continue;
            }

            let t = node.time + 1;
            for &next in graph.neighbors(node.station) {
                if to_end[next.index()] == UNREACHABLE {
                    continue;
                }
                if next != end && reserved.is_reserved(next, start_offset + t) {
                    continue;
                }
                if !visited.insert((next, t)) {
                    continue;
                }
                arena.push(SearchNode { station: next, time: t, parent: idx });
                queue.push(t + h(next), (arena.len() - 1) as u32);
            }
        }

        None
    }

    /// [`find`](Self::find) with an error instead of `None`.
    pub fn find_route(
        &self,
        graph: &StationGraph,
        start: StationId,
        end: StationId,
        start_offset: u64,
        reserved: &Reservations,
    ) -> RoutingResult<Route> {
        self.find(graph, start, end, start_offset, reserved)
            .ok_or(RoutingError::UnreachableDestination { from: start, to: end })
    }

    /// Plan up to `wave_size` mutually collision-free routes, in sequence.
    ///
    /// Each slot is planned against every route committed before it.  A slot
    /// starts at the previous slot's departure offset; if no route exists
    /// there it is retried one turn later, up to `max_offset`.  Planning stops
    /// at the first slot that finds nothing within the offset range.
    pub fn plan_wave(
        &self,
        graph: &StationGraph,
        start: StationId,
        end: StationId,
        wave_size: usize,
        max_offset: u64,
    ) -> Vec<CommittedRoute> {
        let mut reserved = Reservations::new();
        let mut wave = Vec::with_capacity(wave_size);
        let mut offset = 0;

        'slots: for slot in 0..wave_size {
            loop {
                if let Some(route) = self.find(graph, start, end, offset, &reserved) {
                    debug!(slot, offset, turns = route.len_turns(), "wave slot planned");
                    reserved.commit(&route, offset);
                    wave.push(CommittedRoute { route, start_offset: offset });
                    break;
                }
                if offset >= max_offset {
                    debug!(slot, max_offset, "wave slot found no route");
                    break 'slots;
                }
                offset += 1;
            }
        }
        wave
    }
}

impl Router for TimeExpandedPathfinder {
    /// Route with no reservations, departing at turn 0.
    fn route(&self, graph: &StationGraph, from: StationId, to: StationId) -> RoutingResult<Route> {
        self.find_route(graph, from, to, 0, &Reservations::new())
    }
}

/// Plan one wave with the constant heuristic.
///
/// See [`TimeExpandedPathfinder::plan_wave`].
pub fn plan_wave(
    graph: &StationGraph,
    start: StationId,
    end: StationId,
    wave_size: usize,
    max_offset: u64,
) -> Vec<CommittedRoute> {
    TimeExpandedPathfinder::default().plan_wave(graph, start, end, wave_size, max_offset)
}

fn reconstruct(arena: &[SearchNode], mut idx: u32) -> Route {
    let mut stations = Vec::new();
    while idx != NO_PARENT {
        let node = arena[idx as usize];
        stations.push(node.station);
        idx = node.parent;
    }
    stations.reverse();
    Route::new(stations)
}
