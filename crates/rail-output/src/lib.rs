//! `rail-output` — movement log writers.
//!
//! | Backend | Entry point          | Produces                                   |
//! |---------|----------------------|--------------------------------------------|
//! | CSV     | [`CsvWriter`]        | `movements.csv`, `turn_summaries.csv`      |
//! | Text    | [`render_log`]       | one `T1-b T2-a` line per turn              |
//!
//! File backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `rail_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rail_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &graph);
//! let outcome = sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod text;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{MovementRow, TurnSummaryRow};
pub use text::{render_log, render_turn, Style};
pub use writer::OutputWriter;
