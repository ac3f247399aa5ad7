//! `rail-sim` — turn-synchronous movement simulator.
//!
//! # Turn loop
//!
//! ```text
//! until every train has arrived:
//!   ① Replan:  the dispatcher may reroute trains at the head of a queue.
//!   ② Propose: every active train proposes its next hop.
//!   ③ Resolve: prune proposals until the remaining moves are consistent:
//!              queue order, free targets, optional swap ban, one entrant
//!              per station (lowest train id wins).
//!   ④ Apply:   update station queues and route cursors; log the turn.
//! ```
//!
//! Turns without moves are not logged.  Two of them in a row end the run
//! with [`StallReason::Deadlock`]; spending the turn budget ends it with
//! [`StallReason::BudgetExceeded`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | [`run_batch`] runs independent specs on Rayon.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on configs & logs. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rail_dispatch::RoundRobin;
//! use rail_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let config = SimConfig::with_trains(3);
//! let mut sim = SimBuilder::new(&graph, start, end, config, RoundRobin::default()).build()?;
//! let outcome = sim.run(&mut NoopObserver)?;
//! ```

pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod fleet;
pub mod log;
pub mod observer;
pub mod occupancy;
pub mod resolve;
pub mod sim;


pub use batch::{run_batch, run_pipeline, run_pipeline_observed, run_spec};
pub use builder::SimBuilder;
pub use config::{DepartureRule, RunSpec, SimConfig};
pub use error::{SimError, SimResult, StallReason};
pub use fleet::FleetState;
pub use log::{Move, MovementLog, SimOutcome, TurnRecord};
pub use observer::{NoopObserver, SimObserver};
pub use occupancy::{apply_moves, OccupancyState};
pub use resolve::resolve_moves;
pub use sim::Sim;
