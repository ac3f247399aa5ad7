//! `Route`: the result of every search in this crate.

use std::fmt;

use rustc_hash::FxHashSet;

use rail_core::StationId;
use rail_network::StationGraph;

/// An ordered walk through the graph, from `start()` to `end()`.
///
/// A route always holds at least one station.  Consecutive stations are
/// adjacent in the graph it was planned on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Stations to visit in order, source first.
    pub stations: Vec<StationId>,
}

impl Route {
    pub fn new(stations: Vec<StationId>) -> Self {
        debug_assert!(!stations.is_empty(), "a route holds at least one station");
        Self { stations }
    }

    /// The one-station route used when source and destination coincide.
    pub fn trivial(station: StationId) -> Self {
        Self { stations: vec![station] }
    }

    #[inline]
    pub fn start(&self) -> StationId {
        self.stations[0]
    }

    #[inline]
    pub fn end(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Number of moves needed to traverse the route.
    #[inline]
    pub fn len_turns(&self) -> usize {
        self.stations.len() - 1
    }

    /// `true` if the source and destination are the same station.
    pub fn is_trivial(&self) -> bool {
        self.stations.len() == 1
    }

    /// Station at position `step`, or `None` past the end.
    #[inline]
    pub fn station_at(&self, step: usize) -> Option<StationId> {
        self.stations.get(step).copied()
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.stations.contains(&station)
    }

    /// `true` if no station is visited twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.stations.iter().all(|s| seen.insert(*s))
    }

    /// Index of the first visit to `station`.
    pub fn position_of(&self, station: StationId) -> Option<usize> {
        self.stations.iter().position(|&s| s == station)
    }

    /// The remainder of the route starting at the first visit to `station`.
    pub fn suffix_from(&self, station: StationId) -> Option<Route> {
        self.position_of(station)
            .map(|i| Route { stations: self.stations[i..].to_vec() })
    }

    /// Number of steps at which `self` and `other` stand on the same station.
    ///
    /// Stations are compared index by index, so two routes that visit the
    /// same station at different times do not overlap there.
    pub fn overlap(&self, other: &Route) -> usize {
        self.stations
            .iter()
            .zip(&other.stations)
            .filter(|(a, b)| a == b)
            .count()
    }

    /// `true` if every consecutive pair is joined by a connection of `graph`.
    pub fn is_walk_in(&self, graph: &StationGraph) -> bool {
        !self.stations.is_empty()
            && self.stations.iter().all(|&s| graph.contains(s))
            && self.stations.windows(2).all(|w| graph.are_adjacent(w[0], w[1]))
    }

    /// Render as `a -> b -> c` using station names.
    pub fn display<'a>(&'a self, graph: &'a StationGraph) -> RouteDisplay<'a> {
        RouteDisplay { route: self, graph }
    }
}

/// Helper returned by [`Route::display`].
pub struct RouteDisplay<'a> {
    route: &'a Route,
    graph: &'a StationGraph,
}

impl fmt::Display for RouteDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &s) in self.route.stations.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(self.graph.name(s))?;
        }
        Ok(())
    }
}
