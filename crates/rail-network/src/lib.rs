//! `rail-network` — validated station graph, coordinate index, and map loader.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`network`] | `StationGraph` (CSR + R-tree), `StationGraphBuilder`, limits  |
//! | [`loader`]  | `load_map`, `load_map_reader` for the text map format         |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Station`, `GraphLimits`. |

pub mod error;
pub mod loader;
pub mod network;


pub use error::{GraphError, GraphResult};
pub use loader::{load_map, load_map_reader};
pub use network::{GraphLimits, Station, StationGraph, StationGraphBuilder};
