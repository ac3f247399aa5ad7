//! `rail-routing` — path search over a [`StationGraph`](rail_network::StationGraph).
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`queue`]         | `MinQueue<P, T>`, the FIFO-stable priority queue           |
//! | [`route`]         | `Route`: an ordered station sequence                       |
//! | [`shortest`]      | `shortest_path`, `hop_distances`, `Router`, `ShortestPathOracle` |
//! | [`time_expanded`] | `TimeExpandedPathfinder`, `Reservations`, `plan_wave`      |
//! | [`enumerate`]     | `simple_paths`: breadth-first loop-free path enumeration   |
//! | [`strategy`]      | `PathStrategy`: candidate route sets for dispatchers       |
//! | [`error`]         | `RoutingError`, `RoutingResult<T>`                         |
//!
//! Every edge costs one turn, so all searches here count hops.  All searches
//! are deterministic: ties are broken by the order in which stations were
//! pushed, which follows the graph's neighbour order.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on configuration types.    |

pub mod enumerate;
pub mod error;
pub mod queue;
pub mod route;
pub mod shortest;
pub mod strategy;
pub mod time_expanded;

#[cfg(test)]
mod tests;

pub use enumerate::{simple_paths, PathLimits};
pub use error::{RoutingError, RoutingResult};
pub use queue::MinQueue;
pub use route::Route;
pub use shortest::{
    hop_distances, shortest_path, shortest_path_avoiding, Router, ShortestPathOracle, UNREACHABLE,
};
pub use strategy::PathStrategy;
pub use time_expanded::{plan_wave, CommittedRoute, Heuristic, Reservations, TimeExpandedPathfinder};
