//! `rail-dispatch` — deciding which route each train takes.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`model`]       | `Dispatcher` trait                                            |
//! | [`context`]     | `DispatchContext<'a>`: read-only turn snapshot for re-planning |
//! | [`intent`]      | `Reroute`: a route change requested for one train             |
//! | [`round_robin`] | `RoundRobin`: static assignment over strategy candidates      |
//! | [`greedy`]      | `GreedyReplanner`: per-turn re-planning from current stations |
//! | [`fixed`]       | `FixedRoutes`: caller-supplied routes, cycled over the fleet  |
//! | [`config`]      | `DispatchConfig`: serialisable policy description             |
//! | [`error`]       | `DispatchError`, `DispatchResult<T>`                          |
//!
//! # Design notes
//!
//! A dispatcher is consulted in two places by `rail-sim`:
//!
//! 1. **Assignment**, once before the first turn: `Dispatcher::assign`
//!    returns one complete route per train.
//! 2. **Re-planning**, before every turn: `Dispatcher::replan` reads the
//!    start-of-turn snapshot through `&DispatchContext` and returns
//!    `Reroute`s.  The simulator applies them before resolving moves.
//!
//! `replan` takes `&self`, so a dispatcher never mutates shared state while
//! the simulator holds the snapshot.

pub mod config;
pub mod context;
pub mod error;
pub mod fixed;
pub mod greedy;
pub mod intent;
pub mod model;
pub mod round_robin;


pub use config::DispatchConfig;
pub use context::DispatchContext;
pub use error::{DispatchError, DispatchResult};
pub use fixed::FixedRoutes;
pub use greedy::GreedyReplanner;
pub use intent::Reroute;
pub use model::Dispatcher;
pub use round_robin::{estimated_makespan, RoundRobin};
