//! `rail-run` — move a fleet of trains across a station map.
//!
//! Prints one line per turn (`T1-b T2-a`) followed by the turn count.
//! Given several train counts it runs them as a batch instead and prints one
//! turn count per run.  Diagnostics go to stderr; set `RUST_LOG=debug` for
//! per-turn detail.
//!
//! Run with:
//!   cargo run -p rail-cli -- demos/cli/maps/london.map waterloo st_pancras 4 --policy greedy
//!   cargo run -p rail-cli -- demos/cli/maps/london.map waterloo st_pancras 1 2 4 8 16

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rail_dispatch::{DispatchConfig, Dispatcher};
use rail_network::{load_map, StationGraph};
use rail_output::{render_log, CsvWriter, SimOutputObserver, Style};
use rail_routing::PathStrategy;
use rail_sim::{
    run_batch, DepartureRule, MovementLog, NoopObserver, RunSpec, SimBuilder, SimConfig, SimError,
    SimObserver, SimOutcome,
};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "rail-run")]
#[command(
    about = "Schedule trains from one station to another without collisions",
    long_about = None
)]
struct Cli {
    /// Path to the network map file
    map: PathBuf,
    /// Name of the start station
    start: String,
    /// Name of the destination station
    end: String,
    /// Number of trains to move; several values run one simulation each
    #[arg(required = true, num_args = 1..)]
    trains: Vec<usize>,

    /// Route distribution policy
    #[arg(long, value_enum)]
    policy: Option<Policy>,
    /// Candidate route strategy for round-robin
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,
    /// JSON run specification; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also write movements.csv and turn_summaries.csv here
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Colour train labels
    #[arg(long)]
    color: bool,
    /// Forbid trains swapping stations across one connection
    #[arg(long)]
    forbid_swaps: bool,
    /// Let several trains leave a station in one turn, in queue order
    #[arg(long)]
    batch_departures: bool,
    /// Abort after this many turns
    #[arg(long)]
    max_turns: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    RoundRobin,
    Greedy,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Shortest,
    KShortest,
    TimeExpanded,
}

const K_SHORTEST_DEFAULT: usize = 8;

impl Strategy {
    fn path_strategy(self) -> PathStrategy {
        match self {
            Strategy::Shortest => PathStrategy::ShortestOnly,
            Strategy::KShortest => PathStrategy::KShortest { k: K_SHORTEST_DEFAULT },
            Strategy::TimeExpanded => PathStrategy::default(),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let spec = run_spec(&cli)?;
    let graph = load_map(&cli.map)
        .with_context(|| format!("failed to load map {}", cli.map.display()))?;

    match cli.trains[..] {
        [trains] => single(&cli, &graph, with_trains(spec, trains)),
        _ => sweep(&cli, &graph, spec),
    }
}

/// One simulation with the full movement log.
fn single(cli: &Cli, graph: &StationGraph, spec: RunSpec) -> Result<()> {
    let result = match &cli.output_dir {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("failed to create output files in {}", dir.display()))?;
            let mut observer = SimOutputObserver::new(writer, graph);
            let result = simulate(graph, cli, &spec, &mut observer);
            if let Some(e) = observer.take_error() {
                warn!(error = %e, "output files may be incomplete");
            }
            result
        }
        None => simulate(graph, cli, &spec, &mut NoopObserver),
    };

    let style = if cli.color { Style::Ansi } else { Style::Plain };
    match result {
        Ok(outcome) => {
            print_log(&outcome.log, graph, style);
            println!("\nTotal number of turns: {}", outcome.turns);
            Ok(())
        }
        Err(e @ SimError::NonConvergent { .. }) => {
            if let SimError::NonConvergent { log, .. } = &e {
                print_log(log, graph, style);
            }
            Err(e).context("no schedule found")
        }
        Err(e) => Err(e).context("simulation failed"),
    }
}

/// One simulation per train count, run as a batch.
fn sweep(cli: &Cli, graph: &StationGraph, spec: RunSpec) -> Result<()> {
    if cli.output_dir.is_some() || cli.color {
        warn!("--output-dir and --color only apply to a single run");
    }
    let start = graph
        .id_of(&cli.start)
        .with_context(|| format!("unknown station {}", cli.start))?;
    let end = graph
        .id_of(&cli.end)
        .with_context(|| format!("unknown station {}", cli.end))?;

    let specs: Vec<RunSpec> = cli.trains.iter().map(|&n| with_trains(spec, n)).collect();
    let results = run_batch(graph, start, end, &specs);

    println!("{:>8}  {:>6}", "trains", "turns");
    let mut failed = 0usize;
    for (n, result) in cli.trains.iter().zip(results) {
        match result {
            Ok(outcome) => println!("{n:>8}  {:>6}", outcome.turns),
            Err(e) => {
                failed += 1;
                println!("{n:>8}  {:>6}  {e}", "-");
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} runs failed", specs.len());
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Merge the optional JSON spec with command-line flags.
///
/// The train count is filled in per run by [`with_trains`].
fn run_spec(cli: &Cli) -> Result<RunSpec> {
    let mut spec = match &cli.config {
        Some(path) => read_spec(path)?,
        None => RunSpec::default(),
    };

    if cli.forbid_swaps {
        spec.sim.forbid_edge_swaps = true;
    }
    if cli.batch_departures {
        spec.sim.departure = DepartureRule::FifoBatch;
    }
    if cli.max_turns.is_some() {
        spec.sim.max_turns = cli.max_turns;
    }

    match (cli.policy, spec.dispatch) {
        (Some(Policy::Greedy), DispatchConfig::RoundRobin { .. }) => {
            spec.dispatch = DispatchConfig::greedy();
        }
        (Some(Policy::RoundRobin), DispatchConfig::Greedy { .. }) => {
            spec.dispatch = DispatchConfig::default();
        }
        _ => {}
    }
    if let Some(strategy) = cli.strategy {
        match &mut spec.dispatch {
            DispatchConfig::RoundRobin { strategy: s } => *s = strategy.path_strategy(),
            DispatchConfig::Greedy { .. } => warn!("--strategy only applies to round-robin"),
        }
    }
    Ok(spec)
}

fn with_trains(spec: RunSpec, train_count: usize) -> RunSpec {
    RunSpec { sim: SimConfig { train_count, ..spec.sim }, ..spec }
}

fn read_spec(path: &Path) -> Result<RunSpec> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid run specification in {}", path.display()))
}

fn simulate<O: SimObserver>(
    graph:    &StationGraph,
    cli:      &Cli,
    spec:     &RunSpec,
    observer: &mut O,
) -> Result<SimOutcome, SimError> {
    let dispatcher = spec.dispatch.build();
    info!(policy = dispatcher.name(), trains = spec.sim.train_count, "planning");
    let mut sim = SimBuilder::from_names(graph, &cli.start, &cli.end, spec.sim, dispatcher)?
        .build()?;
    sim.run(observer)
}

fn print_log(log: &MovementLog, graph: &StationGraph, style: Style) {
    println!("Train movements:");
    for line in render_log(log, graph, style) {
        println!("{line}");
    }
}
