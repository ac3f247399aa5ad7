//! Graph validation and map loading errors.

use thiserror::Error;

use rail_core::Coord;

/// Errors produced by `rail-network`.
///
/// Every structural rule of a station graph has its own variant so callers
/// can react to the specific violation.  Loader errors that can be pinned to
/// a line of the map file are wrapped in [`GraphError::AtLine`]; use
/// [`GraphError::root`] to look through the wrapper.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("connection references unknown station {0:?}")]
    UnknownStation(String),

    #[error("duplicate station name: {0}")]
    DuplicateStation(String),

    #[error("duplicate coordinates {coord} for station {name} (already used by {existing})")]
    DuplicateCoordinate {
        name:     String,
        coord:    Coord,
        existing: String,
    },

    #[error("connection with same start and end station: {0}")]
    SelfLoop(String),

    #[error("duplicate connection between {0} and {1}")]
    DuplicateEdge(String, String),

    #[error("map contains more than {limit} stations")]
    TooManyStations { limit: usize },

    #[error("map contains more than {limit} connections")]
    TooManyEdges { limit: usize },

    #[error("no connection from station: {0}")]
    IsolatedStation(String),

    // ── Loader ────────────────────────────────────────────────────────────
    #[error("map does not contain a \"{0}:\" section")]
    MissingSection(&'static str),

    #[error("invalid station line: {0}")]
    InvalidStationLine(String),

    #[error("invalid {axis} coordinate for station {name}")]
    InvalidCoordinate { name: String, axis: char },

    #[error("invalid connection line: {0}")]
    InvalidConnectionLine(String),

    #[error("entry outside of a section: {0}")]
    EntryOutsideSection(String),

    #[error("map does not contain any stations")]
    NoStations,

    #[error("map does not contain any connections")]
    NoConnections,

    #[error("line {line}: {source}")]
    AtLine {
        line:   usize,
        #[source]
        source: Box<GraphError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Attach a 1-based map file line number.
    pub fn at_line(self, line: usize) -> Self {
        GraphError::AtLine { line, source: Box::new(self) }
    }

    /// The underlying error with any line-number wrappers removed.
    pub fn root(&self) -> &GraphError {
        match self {
            GraphError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
