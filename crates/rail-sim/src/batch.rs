//! One-call entry points: a single run from station names, and batches of
//! independent runs over one graph.

use tracing::info;

use rail_core::StationId;
use rail_network::StationGraph;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{NoopObserver, RunSpec, SimBuilder, SimError, SimObserver, SimOutcome, SimResult};

/// Resolve the endpoints by name, assign routes and simulate to completion.
pub fn run_pipeline(
    graph: &StationGraph,
    start: &str,
    end:   &str,
    spec:  &RunSpec,
) -> SimResult<SimOutcome> {
    run_pipeline_observed(graph, start, end, spec, &mut NoopObserver)
}

/// [`run_pipeline`] with observer callbacks.
pub fn run_pipeline_observed<O: SimObserver>(
    graph:    &StationGraph,
    start:    &str,
    end:      &str,
    spec:     &RunSpec,
    observer: &mut O,
) -> SimResult<SimOutcome> {
    let lookup =
        |name: &str| graph.id_of(name).ok_or_else(|| SimError::UnknownStation(name.to_owned()));
    let (start, end) = (lookup(start)?, lookup(end)?);
    run_spec(graph, start, end, spec, observer)
}

/// Simulate one [`RunSpec`] between known stations.
pub fn run_spec<O: SimObserver>(
    graph:    &StationGraph,
    start:    StationId,
    end:      StationId,
    spec:     &RunSpec,
    observer: &mut O,
) -> SimResult<SimOutcome> {
    let dispatcher = spec.dispatch.build();
    let mut sim = SimBuilder::new(graph, start, end, spec.sim, dispatcher).build()?;
    sim.run(observer)
}

/// Run every spec independently and return the results in input order.
///
/// With the `parallel` feature the runs execute on Rayon's thread pool; each
/// run owns its dispatcher and only shares the read-only graph.
pub fn run_batch(
    graph: &StationGraph,
    start: StationId,
    end:   StationId,
    specs: &[RunSpec],
) -> Vec<SimResult<SimOutcome>> {
    info!(runs = specs.len(), "starting batch");

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = specs
        .iter()
        .map(|spec| run_spec(graph, start, end, spec, &mut NoopObserver))
        .collect();

    #[cfg(feature = "parallel")]
    let results: Vec<_> = specs
        .par_iter()
        .map(|spec| run_spec(graph, start, end, spec, &mut NoopObserver))
        .collect();

    results
}
