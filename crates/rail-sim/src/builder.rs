//! Fluent builder for constructing a [`Sim`].

use tracing::debug;

use rail_core::StationId;
use rail_dispatch::Dispatcher;
use rail_network::StationGraph;

use crate::{FleetState, Sim, SimConfig, SimError, SimResult};

/// Builder for [`Sim<D>`].
///
/// `build` validates the endpoints and fleet size, asks the dispatcher for
/// the initial routes, and checks that each route is a walk from `start` to
/// `end`.
///
/// # Example
///
/// ```rust,ignore
/// let config = SimConfig::with_trains(4);
/// let mut sim = SimBuilder::new(&graph, start, end, config, RoundRobin::default()).build()?;
/// let outcome = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<'g, D: Dispatcher> {
    graph:      &'g StationGraph,
    start:      StationId,
    end:        StationId,
    config:     SimConfig,
    dispatcher: D,
}

impl<'g, D: Dispatcher> SimBuilder<'g, D> {
    pub fn new(
        graph:      &'g StationGraph,
        start:      StationId,
        end:        StationId,
        config:     SimConfig,
        dispatcher: D,
    ) -> Self {
        Self { graph, start, end, config, dispatcher }
    }

    /// Resolve `start` and `end` by station name.
    pub fn from_names(
        graph:      &'g StationGraph,
        start:      &str,
        end:        &str,
        config:     SimConfig,
        dispatcher: D,
    ) -> SimResult<Self> {
        let lookup = |name: &str| {
            graph.id_of(name).ok_or_else(|| SimError::UnknownStation(name.to_owned()))
        };
        Ok(Self::new(graph, lookup(start)?, lookup(end)?, config, dispatcher))
    }

    pub fn build(self) -> SimResult<Sim<'g, D>> {
        let Self { graph, start, end, config, mut dispatcher } = self;

        // ── Validate inputs ───────────────────────────────────────────────
        if config.train_count == 0 {
            return Err(SimError::Config("train count must be at least 1".into()));
        }
        for id in [start, end] {
            if !graph.contains(id) {
                return Err(SimError::Config(format!("{id} is not in the network")));
            }
        }
        if start == end {
            return Err(SimError::Config(format!(
                "start and end are the same station '{}'",
                graph.name(start)
            )));
        }

        // ── Initial assignment ────────────────────────────────────────────
        let routes = dispatcher.assign(graph, start, end, config.train_count)?;
        if routes.len() != config.train_count {
            return Err(SimError::Config(format!(
                "dispatcher '{}' returned {} routes for {} trains",
                dispatcher.name(),
                routes.len(),
                config.train_count
            )));
        }
        for (i, route) in routes.iter().enumerate() {
            if route.stations.is_empty()
                || route.start() != start
                || route.end() != end
                || !route.is_walk_in(graph)
            {
                return Err(SimError::Config(format!(
                    "dispatcher '{}' returned an invalid route for train {}",
                    dispatcher.name(),
                    i + 1
                )));
            }
        }
        debug!(
            dispatcher = dispatcher.name(),
            trains     = routes.len(),
            "initial routes assigned"
        );

        let fleet = FleetState::new(routes, end);
        Ok(Sim::new(config, graph, start, end, fleet, dispatcher))
    }
}
