//! Integration tests for rail-output.

#[cfg(test)]
mod helpers {
    use rail_core::Coord;
    use rail_dispatch::RoundRobin;
    use rail_network::{GraphLimits, StationGraph};
    use rail_routing::PathStrategy;
    use rail_sim::{NoopObserver, SimBuilder, SimConfig, SimObserver, SimOutcome};

    /// `a - b - c`.
    pub fn abc() -> StationGraph {
        StationGraph::from_parts(
            [("a", Coord::new(0, 0)), ("b", Coord::new(1, 0)), ("c", Coord::new(2, 0))],
            [("a", "b"), ("b", "c")],
            GraphLimits::relaxed(),
        )
        .unwrap()
    }

    pub fn run_with<O: SimObserver>(
        g:        &StationGraph,
        trains:   usize,
        observer: &mut O,
    ) -> SimOutcome {
        SimBuilder::new(
            g,
            g.id_of("a").unwrap(),
            g.id_of("c").unwrap(),
            SimConfig::with_trains(trains),
            RoundRobin::new(PathStrategy::ShortestOnly),
        )
        .build()
        .unwrap()
        .run(observer)
        .unwrap()
    }

    pub fn run(g: &StationGraph, trains: usize) -> SimOutcome {
        run_with(g, trains, &mut NoopObserver)
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{MovementRow, TurnSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("movements.csv").exists());
        assert!(dir.path().join("turn_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(headers(dir.path().join("movements.csv")), ["turn", "train", "from", "to"]);
        assert_eq!(
            headers(dir.path().join("turn_summaries.csv")),
            ["turn", "moves", "arrived_total"]
        );
    }

    #[test]
    fn csv_movement_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = |train: &str, from: &str, to: &str| MovementRow {
            turn:  4,
            train: train.into(),
            from:  from.into(),
            to:    to.into(),
        };
        w.write_turn(&[row("T1", "b", "c"), row("T2", "a", "b")]).unwrap();
        w.write_summary(&TurnSummaryRow { turn: 4, moves: 2, arrived_total: 1 }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("movements.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][1], "T1");
        assert_eq!(&rows[1][2], "a");
        assert_eq!(&rows[1][3], "b");

        let mut rdr = csv::Reader::from_path(dir.path().join("turn_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "1"); // arrived_total
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("absent")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::helpers::{abc, run_with};
    use crate::{
        CsvWriter, MovementRow, OutputError, OutputResult, OutputWriter, SimOutputObserver,
        TurnSummaryRow,
    };

    #[derive(Default)]
    struct Collect {
        rows:      Vec<MovementRow>,
        summaries: Vec<TurnSummaryRow>,
        finished:  usize,
    }

    impl OutputWriter for Collect {
        fn write_turn(&mut self, rows: &[MovementRow]) -> OutputResult<()> {
            self.rows.extend_from_slice(rows);
            Ok(())
        }
        fn write_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    /// Fails every write.
    struct Broken;

    impl OutputWriter for Broken {
        fn write_turn(&mut self, _rows: &[MovementRow]) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }
        fn write_summary(&mut self, _row: &TurnSummaryRow) -> OutputResult<()> {
            Err(std::io::Error::other("second failure").into())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn observer_forwards_every_turn() {
        let g = abc();
        let mut obs = SimOutputObserver::new(Collect::default(), &g);
        let outcome = run_with(&g, 2, &mut obs);
        assert!(obs.take_error().is_none());

        let out = obs.into_writer();
        assert_eq!(out.finished, 1);
        assert_eq!(out.rows.len(), outcome.log.total_moves());
        assert_eq!(
            out.rows[0],
            MovementRow { turn: 1, train: "T1".into(), from: "a".into(), to: "b".into() }
        );
        let arrived: Vec<u64> = out.summaries.iter().map(|s| s.arrived_total).collect();
        assert_eq!(arrived, [0, 1, 2]);
    }

    #[test]
    fn observer_keeps_first_error() {
        let g = abc();
        let mut obs = SimOutputObserver::new(Broken, &g);
        run_with(&g, 1, &mut obs);
        match obs.take_error() {
            Some(OutputError::Io(e)) => assert_eq!(e.to_string(), "disk full"),
            other => panic!("expected stored I/O error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn csv_observer_end_to_end() {
        let g = abc();
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &g);
        let outcome = run_with(&g, 3, &mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("turn_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count() as u64, outcome.turns);
        let mut rdr = csv::Reader::from_path(dir.path().join("movements.csv")).unwrap();
        assert_eq!(rdr.records().count(), 3 * 2);
    }
}

// ── Text ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod text {
    use super::helpers::{abc, run};
    use crate::{render_log, Style};

    #[test]
    fn plain_lines_match_turns() {
        let g = abc();
        let outcome = run(&g, 2);
        assert_eq!(render_log(&outcome.log, &g, Style::Plain), ["T1-b", "T1-c T2-b", "T2-c"]);
    }

    #[test]
    fn ansi_colours_cycle_by_train() {
        let g = abc();
        let outcome = run(&g, 5);
        let lines = render_log(&outcome.log, &g, Style::Ansi);
        assert_eq!(lines[0], "\x1b[31mT1\x1b[0m-b");
        assert!(lines[1].contains("\x1b[33mT2\x1b[0m-b"));
        let last = lines.last().unwrap();
        // T5 wraps around to red.
        assert_eq!(last, "\x1b[31mT5\x1b[0m-c");
    }
}
