//! The `OutputWriter` trait implemented by all backend writers.

use crate::{MovementRow, OutputResult, TurnSummaryRow};

/// Sink for per-turn movement rows and summaries.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// stores them until [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write the moves of one turn.
    fn write_turn(&mut self, rows: &[MovementRow]) -> OutputResult<()>;

    /// Write one turn summary row.
    fn write_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
