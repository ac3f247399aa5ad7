//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use rail_core::Turn;
use rail_network::StationGraph;
use rail_sim::{SimObserver, TurnRecord};

use crate::row::{MovementRow, TurnSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every logged turn to an [`OutputWriter`].
///
/// Errors from the writer are stored because `SimObserver` methods have no
/// return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<'g, W: OutputWriter> {
    writer:     W,
    graph:      &'g StationGraph,
    last_error: Option<OutputError>,
}

impl<'g, W: OutputWriter> SimOutputObserver<'g, W> {
    /// Create an observer backed by `writer`, naming stations from `graph`.
    pub fn new(writer: W, graph: &'g StationGraph) -> Self {
        Self { writer, graph, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<'_, W> {
    fn on_turn_end(&mut self, turn: Turn, record: &TurnRecord, arrived: usize) {
        let rows: Vec<MovementRow> = record
            .moves
            .iter()
            .map(|m| MovementRow {
                turn:  turn.0,
                train: m.train.to_string(),
                from:  self.graph.name(m.from).to_owned(),
                to:    self.graph.name(m.to).to_owned(),
            })
            .collect();
        let result = self.writer.write_turn(&rows);
        self.store_err(result);

        let summary = TurnSummaryRow {
            turn:          turn.0,
            moves:         record.moves.len() as u64,
            arrived_total: arrived as u64,
        };
        let result = self.writer.write_summary(&summary);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_turn: Turn) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
