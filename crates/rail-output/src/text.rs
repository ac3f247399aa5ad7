//! Human-readable movement lines: `T1-b T2-a`, one line per turn.

use std::fmt::Write as _;

use rail_core::TrainId;
use rail_network::StationGraph;
use rail_sim::{MovementLog, TurnRecord};

/// How train labels are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Plain,
    /// Wrap each train label in an ANSI colour, cycling red, yellow, blue
    /// and green by train id.
    Ansi,
}

const PALETTE: [&str; 4] = ["31", "33", "34", "32"];
const RESET: &str = "\x1b[0m";

/// Render every turn of `log` as one line.
pub fn render_log(log: &MovementLog, graph: &StationGraph, style: Style) -> Vec<String> {
    log.iter().map(|record| render_turn(record, graph, style)).collect()
}

/// Render one turn: `<train>-<destination>` per move, separated by spaces.
pub fn render_turn(record: &TurnRecord, graph: &StationGraph, style: Style) -> String {
    let mut line = String::new();
    for (i, m) in record.moves.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        push_label(&mut line, m.train, style);
        line.push('-');
        line.push_str(graph.name(m.to));
    }
    line
}

fn push_label(out: &mut String, train: TrainId, style: Style) {
    // Writing to a String cannot fail.
    let _ = match style {
        Style::Plain => write!(out, "{train}"),
        Style::Ansi => {
            let colour = PALETTE[train.index() % PALETTE.len()];
            write!(out, "\x1b[{colour}m{train}{RESET}")
        }
    };
}
