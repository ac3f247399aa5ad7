//! Text map loader.
//!
//! # Format
//!
//! ```text
//! # comment
//! stations:
//! waterloo,3,1
//! victoria,6,7
//!
//! connections:
//! waterloo-victoria
//! ```
//!
//! - Section headers are `stations:` and `connections:`.  Both must appear,
//!   in either order.
//! - A station line is `name,x,y` with non-negative integer coordinates.
//!   Names are non-empty and contain neither whitespace nor `-`.
//! - A connection line is `a-b`.
//! - `#` starts a comment that runs to the end of the line.  Blank lines are
//!   ignored and fields are trimmed.
//!
//! Connections are buffered until every station has been read, so a
//! `connections:` section may precede `stations:`.  Errors tied to a line are
//! wrapped in [`GraphError::AtLine`].

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::info;

use rail_core::Coord;

use crate::network::{GraphLimits, StationGraph, StationGraphBuilder};
use crate::{GraphError, GraphResult};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Stations,
    Connections,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate a map file with the default [`GraphLimits`].
pub fn load_map(path: &Path) -> GraphResult<StationGraph> {
    let file = std::fs::File::open(path)?;
    let graph = load_map_reader(file, GraphLimits::default())?;
    info!(
        path = %path.display(),
        stations = graph.station_count(),
        connections = graph.edge_count(),
        "map loaded"
    );
    Ok(graph)
}

/// Like [`load_map`] but accepts any `Read` source and explicit limits.
///
/// Useful for testing (pass a `&[u8]` or `std::io::Cursor`).
pub fn load_map_reader<R: Read>(reader: R, limits: GraphLimits) -> GraphResult<StationGraph> {
    let mut builder = StationGraphBuilder::with_limits(limits);
    let mut connections: Vec<(usize, String, String)> = Vec::new();
    let mut section = Section::None;
    let mut seen_stations = false;
    let mut seen_connections = false;

    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let content = strip_comment(&line).trim();
        if content.is_empty() {
            continue;
        }

        match content {
            "stations:" => {
                section = Section::Stations;
                seen_stations = true;
                continue;
            }
            "connections:" => {
                section = Section::Connections;
                seen_connections = true;
                continue;
            }
            _ => {}
        }

        match section {
            Section::None => {
                return Err(GraphError::EntryOutsideSection(content.to_owned()).at_line(line_no));
            }
            Section::Stations => {
                let (name, coord) = parse_station(content).map_err(|e| e.at_line(line_no))?;
                builder.add_station(name, coord).map_err(|e| e.at_line(line_no))?;
            }
            Section::Connections => {
                let (from, to) = parse_connection(content).map_err(|e| e.at_line(line_no))?;
                if connections.len() >= limits.max_edges {
                    let err = GraphError::TooManyEdges { limit: limits.max_edges };
                    return Err(err.at_line(line_no));
                }
                connections.push((line_no, from.to_owned(), to.to_owned()));
            }
        }
    }

    if !seen_stations {
        return Err(GraphError::MissingSection("stations"));
    }
    if !seen_connections {
        return Err(GraphError::MissingSection("connections"));
    }
    if builder.station_count() == 0 {
        return Err(GraphError::NoStations);
    }
    if connections.is_empty() {
        return Err(GraphError::NoConnections);
    }

    for (line_no, from, to) in &connections {
        builder.add_connection(from, to).map_err(|e| e.at_line(*line_no))?;
    }

    builder.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c == '-')
}

fn parse_station(line: &str) -> GraphResult<(&str, Coord)> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let [name, x, y] = parts[..] else {
        return Err(GraphError::InvalidStationLine(line.to_owned()));
    };
    if !valid_name(name) {
        return Err(GraphError::InvalidStationLine(line.to_owned()));
    }
    let parse = |value: &str, axis: char| {
        value
            .parse::<u32>()
            .map_err(|_| GraphError::InvalidCoordinate { name: name.to_owned(), axis })
    };
    Ok((name, Coord::new(parse(x, 'x')?, parse(y, 'y')?)))
}

fn parse_connection(line: &str) -> GraphResult<(&str, &str)> {
    let parts: Vec<&str> = line.split('-').map(str::trim).collect();
    match parts[..] {
        [from, to] if !from.is_empty() && !to.is_empty() => Ok((from, to)),
        _ => Err(GraphError::InvalidConnectionLine(line.to_owned())),
    }
}
