//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `movements.csv`
//! - `turn_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{MovementRow, OutputResult, TurnSummaryRow};

/// Writes movement output to two CSV files.
pub struct CsvWriter {
    movements: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut movements = Writer::from_path(dir.join("movements.csv"))?;
        movements.write_record(["turn", "train", "from", "to"])?;

        let mut summaries = Writer::from_path(dir.join("turn_summaries.csv"))?;
        summaries.write_record(["turn", "moves", "arrived_total"])?;

        Ok(Self { movements, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_turn(&mut self, rows: &[MovementRow]) -> OutputResult<()> {
        for row in rows {
            self.movements.write_record([
                row.turn.to_string().as_str(),
                row.train.as_str(),
                row.from.as_str(),
                row.to.as_str(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.turn.to_string(),
            row.moves.to_string(),
            row.arrived_total.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.movements.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
