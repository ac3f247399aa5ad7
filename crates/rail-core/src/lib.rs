//! `rail-core` — foundational types for the rail routing workspace.
//!
//! This crate is a dependency of every other `rail-*` crate.  It intentionally
//! has no `rail-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                          |
//! |----------|---------------------------------------------------|
//! | [`ids`]  | `StationId`, `TrainId`                            |
//! | [`geo`]  | `Coord`, non-negative integer grid position       |
//! | [`time`] | `Turn`, discrete simulation step counter          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::Coord;
pub use ids::{StationId, TrainId};
pub use time::Turn;
