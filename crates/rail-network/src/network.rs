//! Station graph representation and builder.
//!
//! # Data layout
//!
//! The undirected graph is stored as **Compressed Sparse Row (CSR)**
//! adjacency.  Every connection `a-b` contributes `b` to `a`'s row and `a` to
//! `b`'s row.  The neighbours of `StationId s` occupy the slice:
//!
//! ```text
//! adj_to[ adj_start[s] .. adj_start[s+1] ]
//! ```
//!
//! Rows keep **input insertion order**, not a sorted order.  Searches that
//! break ties by neighbour order are therefore deterministic for a given map
//! file but callers must not rely on any canonical ordering.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps grid coordinates to the nearest `StationId`.
//! Coordinates are unique, so an exact lookup returns at most one station.
//!
//! # Validation
//!
//! A `StationGraph` can only be produced through [`StationGraphBuilder`],
//! which enforces every structural rule (unique names and coordinates, no
//! self-loops, no duplicate connections in either direction, count ceilings,
//! and in strict mode at least one connection per station).  Once built,
//! the graph is immutable and `Send + Sync`, so independent simulation runs
//! can share it by reference.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::{FxHashMap, FxHashSet};

use rail_core::{Coord, StationId};

use crate::{GraphError, GraphResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: an `[x, y]` point with the
/// associated `StationId`.
#[derive(Clone)]
struct CoordEntry {
    point: [i64; 2],
    id:    StationId,
}

impl RTreeObject for CoordEntry {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CoordEntry {
    /// Squared Euclidean distance on the integer grid.
    fn distance_2(&self, point: &[i64; 2]) -> i64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Station & limits ──────────────────────────────────────────────────────────

/// A named node of the routing graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub name:  String,
    pub coord: Coord,
}

/// Size ceilings and strictness applied while building a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphLimits {
    /// Maximum number of stations.  Default: 10 000.
    pub max_stations: usize,
    /// Maximum number of (undirected) connections.  Default: 10 000.
    pub max_edges: usize,
    /// Reject stations that have no connection at all.  Default: `true`.
    pub require_connections: bool,
}

impl GraphLimits {
    pub const DEFAULT_CEILING: usize = 10_000;

    /// Default ceilings but isolated stations allowed.
    pub fn relaxed() -> Self {
        Self { require_connections: false, ..Self::default() }
    }
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            max_stations:        Self::DEFAULT_CEILING,
            max_edges:           Self::DEFAULT_CEILING,
            require_connections: true,
        }
    }
}

// ── StationGraph ──────────────────────────────────────────────────────────────

/// Validated, immutable undirected station graph.
///
/// Do not construct directly; use [`StationGraphBuilder`] or
/// [`StationGraph::from_parts`].
pub struct StationGraph {
    /// Station records, indexed by `StationId`.
    pub stations: Vec<Station>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Length = `station_count + 1`.
    pub adj_start: Vec<u32>,

    /// Concatenated neighbour rows.  Length = `2 * edge_count`.
    pub adj_to: Vec<StationId>,

    /// Connections in insertion order, as given in the input.
    edges: Vec<(StationId, StationId)>,

    by_name: FxHashMap<String, StationId>,

    spatial_idx: RTree<CoordEntry>,
}

impl StationGraph {
    /// Build and validate a graph from station records and name pairs in one
    /// call.
    ///
    /// Equivalent to feeding every station and then every connection through
    /// a [`StationGraphBuilder`] with the given `limits`.
    pub fn from_parts<S, E, N>(stations: S, edges: E, limits: GraphLimits) -> GraphResult<Self>
    where
        S: IntoIterator<Item = (N, Coord)>,
        N: Into<String>,
        E: IntoIterator<Item = (N, N)>,
    {
        let mut b = StationGraphBuilder::with_limits(limits);
        for (name, coord) in stations {
            b.add_station(name, coord)?;
        }
        for (from, to) in edges {
            let (from, to): (String, String) = (from.into(), to.into());
            b.add_connection(&from, &to)?;
        }
        b.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of undirected connections.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All station ids in insertion order.
    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.stations.len()).map(|i| StationId(i as u32))
    }

    /// Connections in input order.
    pub fn edges(&self) -> &[(StationId, StationId)] {
        &self.edges
    }

    // ── Station lookup ────────────────────────────────────────────────────

    #[inline]
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    #[inline]
    pub fn name(&self, id: StationId) -> &str {
        &self.stations[id.index()].name
    }

    #[inline]
    pub fn coord(&self, id: StationId) -> Coord {
        self.stations[id.index()].coord
    }

    /// Resolve a station name.  Returns `None` for unknown names.
    pub fn id_of(&self, name: &str) -> Option<StationId> {
        self.by_name.get(name).copied()
    }

    /// `true` if `id` addresses a station of this graph.
    #[inline]
    pub fn contains(&self, id: StationId) -> bool {
        id.index() < self.stations.len()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Neighbours of `station` in input insertion order.
    ///
    /// A contiguous slice of the CSR array; no allocation.
    #[inline]
    pub fn neighbors(&self, station: StationId) -> &[StationId] {
        let start = self.adj_start[station.index()] as usize;
        let end   = self.adj_start[station.index() + 1] as usize;
        &self.adj_to[start..end]
    }

    /// Number of connections touching `station`.
    #[inline]
    pub fn degree(&self, station: StationId) -> usize {
        self.neighbors(station).len()
    }

    /// `true` if `a` and `b` are joined by a connection.
    pub fn are_adjacent(&self, a: StationId, b: StationId) -> bool {
        self.neighbors(a).contains(&b)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The station drawn exactly at `coord`, if any.
    pub fn station_at(&self, coord: Coord) -> Option<StationId> {
        self.spatial_idx
            .locate_at_point(&coord.as_point())
            .map(|e| e.id)
    }

    /// The station closest to `coord` (Euclidean on the grid).
    ///
    /// Returns `None` only if the graph has no stations.  Ties between
    /// equidistant stations are resolved by the R-tree and are not specified.
    pub fn nearest_station(&self, coord: Coord) -> Option<StationId> {
        self.spatial_idx
            .nearest_neighbor(&coord.as_point())
            .map(|e| e.id)
    }
}

impl std::fmt::Debug for StationGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationGraph")
            .field("stations", &self.station_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

// ── StationGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`StationGraph`] incrementally, then call [`build`](Self::build).
///
/// Each `add_*` call validates immediately so that a loader can report the
/// offending input line.  `build()` performs the whole-graph checks and lays
/// out the CSR arrays.
///
/// # Example
///
/// ```
/// use rail_core::Coord;
/// use rail_network::StationGraphBuilder;
///
/// let mut b = StationGraphBuilder::new();
/// b.add_station("a", Coord::new(0, 0)).unwrap();
/// b.add_station("b", Coord::new(1, 0)).unwrap();
/// b.add_connection("a", "b").unwrap();
/// let graph = b.build().unwrap();
/// assert_eq!(graph.station_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct StationGraphBuilder {
    limits:   GraphLimits,
    stations: Vec<Station>,
    by_name:  FxHashMap<String, StationId>,
    coords:   FxHashMap<Coord, StationId>,
    edges:    Vec<(StationId, StationId)>,
    /// Normalised `(min, max)` pairs for duplicate detection in both directions.
    edge_set: FxHashSet<(StationId, StationId)>,
}

impl StationGraphBuilder {
    pub fn new() -> Self {
        Self::with_limits(GraphLimits::default())
    }

    pub fn with_limits(limits: GraphLimits) -> Self {
        Self {
            limits,
            stations: Vec::new(),
            by_name:  FxHashMap::default(),
            coords:   FxHashMap::default(),
            edges:    Vec::new(),
            edge_set: FxHashSet::default(),
        }
    }

    pub fn limits(&self) -> GraphLimits {
        self.limits
    }

    /// Add a station and return its `StationId` (sequential from 0).
    pub fn add_station(&mut self, name: impl Into<String>, coord: Coord) -> GraphResult<StationId> {
        let name = name.into();
        if self.stations.len() >= self.limits.max_stations {
            return Err(GraphError::TooManyStations { limit: self.limits.max_stations });
        }
        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateStation(name));
        }
        if let Some(&other) = self.coords.get(&coord) {
            return Err(GraphError::DuplicateCoordinate {
                name,
                coord,
                existing: self.stations[other.index()].name.clone(),
            });
        }

        let id = StationId(self.stations.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.coords.insert(coord, id);
        self.stations.push(Station { name, coord });
        Ok(id)
    }

    /// Add an undirected connection between two stations added earlier,
    /// addressed by name.
    pub fn add_connection(&mut self, from: &str, to: &str) -> GraphResult<()> {
        let a = self.resolve(from)?;
        let b = self.resolve(to)?;
        self.add_edge(a, b)
    }

    /// Add an undirected connection between two station ids.
    pub fn add_edge(&mut self, a: StationId, b: StationId) -> GraphResult<()> {
        for id in [a, b] {
            if id.index() >= self.stations.len() {
                return Err(GraphError::UnknownStation(id.to_string()));
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop(self.name(a).to_owned()));
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if self.edge_set.contains(&key) {
            return Err(GraphError::DuplicateEdge(self.name(a).to_owned(), self.name(b).to_owned()));
        }
        if self.edges.len() >= self.limits.max_edges {
            return Err(GraphError::TooManyEdges { limit: self.limits.max_edges });
        }

        self.edge_set.insert(key);
        self.edges.push((a, b));
        Ok(())
    }

    /// Resolve a name added earlier.
    pub fn resolve(&self, name: &str) -> GraphResult<StationId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownStation(name.to_owned()))
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn name(&self, id: StationId) -> &str {
        &self.stations[id.index()].name
    }

    /// Consume the builder and produce a validated [`StationGraph`].
    ///
    /// Time complexity: O(S + E) for the CSR layout + O(S log S) for the
    /// R-tree bulk load.
    pub fn build(self) -> GraphResult<StationGraph> {
        let station_count = self.stations.len();

        // Degree per station → CSR row pointer.
        let mut adj_start = vec![0u32; station_count + 1];
        for &(a, b) in &self.edges {
            adj_start[a.index() + 1] += 1;
            adj_start[b.index() + 1] += 1;
        }

        if self.limits.require_connections {
            if let Some(i) = (0..station_count).find(|&i| adj_start[i + 1] == 0) {
                return Err(GraphError::IsolatedStation(self.stations[i].name.clone()));
            }
        }

        for i in 1..=station_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[station_count] as usize, 2 * self.edges.len());

        // Fill rows in edge order so each row keeps insertion order.
        let mut cursor: Vec<u32> = adj_start[..station_count].to_vec();
        let mut adj_to = vec![StationId::INVALID; 2 * self.edges.len()];
        for &(a, b) in &self.edges {
            adj_to[cursor[a.index()] as usize] = b;
            cursor[a.index()] += 1;
            adj_to[cursor[b.index()] as usize] = a;
            cursor[b.index()] += 1;
        }

        let entries: Vec<CoordEntry> = self
            .stations
            .iter()
            .enumerate()
            .map(|(i, s)| CoordEntry {
                point: s.coord.as_point(),
                id:    StationId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(StationGraph {
            stations: self.stations,
            adj_start,
            adj_to,
            edges: self.edges,
            by_name: self.by_name,
            spatial_idx,
        })
    }
}

impl Default for StationGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
