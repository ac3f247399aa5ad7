//! Simulation observer trait for progress reporting and data collection.

use rail_core::Turn;

use crate::TurnRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// turn loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_turn_end(&mut self, turn: Turn, record: &TurnRecord, arrived: usize) {
///         println!("{turn}: {} moves, {arrived} arrived", record.moves.len());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before a turn is resolved.
    ///
    /// A turn in which nothing moves is not logged, and the next attempt
    /// reuses its number, so `turn` may repeat.
    fn on_turn_start(&mut self, _turn: Turn) {}

    /// Called after a turn with at least one move.
    ///
    /// `arrived` is the number of trains at the destination after the turn.
    fn on_turn_end(&mut self, _turn: Turn, _record: &TurnRecord, _arrived: usize) {}

    /// Called once when the run stops, successfully or not, with the last
    /// logged turn.
    fn on_sim_end(&mut self, _final_turn: Turn) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
