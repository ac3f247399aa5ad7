//! The `Sim` struct and its turn loop.

use tracing::{debug, info, warn};

use rail_core::{StationId, TrainId, Turn};
use rail_dispatch::{DispatchContext, Dispatcher};
use rail_network::StationGraph;

use crate::{
    apply_moves, resolve_moves, FleetState, Move, MovementLog, OccupancyState, SimConfig,
    SimError, SimObserver, SimOutcome, SimResult, StallReason, TurnRecord,
};

/// Consecutive turns without a move after which the run is a deadlock.
const IDLE_LIMIT: u32 = 2;

/// The movement simulator.
///
/// Each turn:
///
/// 1. **Replan**: the dispatcher sees the start-of-turn snapshot and may
///    reroute trains standing at the head of their queue.
/// 2. **Propose**: every active train proposes the next hop of its route.
/// 3. **Resolve**: proposals are pruned against the snapshot
///    (see [`resolve_moves`]).
/// 4. **Apply**: surviving moves update the queues and the fleet.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<'g, D: Dispatcher> {
    pub config: SimConfig,

    pub graph: &'g StationGraph,
    pub start: StationId,
    pub end:   StationId,

    /// Routes and progress of every train.
    pub fleet: FleetState,

    /// Station queues as of the last completed turn.
    pub occupancy: OccupancyState,

    pub dispatcher: D,

    /// Turn limit for [`run`][Self::run].
    pub budget: u64,

    log:  MovementLog,
    turn: Turn,
}

impl<'g, D: Dispatcher> Sim<'g, D> {
    pub(crate) fn new(
        config:     SimConfig,
        graph:      &'g StationGraph,
        start:      StationId,
        end:        StationId,
        fleet:      FleetState,
        dispatcher: D,
    ) -> Self {
        let occupancy =
            OccupancyState::with_fleet(graph.station_count(), start, end, fleet.len());
        let budget = config.budget(fleet.longest_route());
        Self {
            config,
            graph,
            start,
            end,
            fleet,
            occupancy,
            dispatcher,
            budget,
            log:  MovementLog::new(),
            turn: Turn::ZERO,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every train has arrived.
    ///
    /// Fails with [`SimError::NonConvergent`] after two consecutive turns
    /// without a move or once the turn budget is spent.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimOutcome> {
        let mut idle = 0;
        while !self.is_finished() {
            if self.turn.0 >= self.budget {
                return Err(self.stall(StallReason::BudgetExceeded, observer));
            }

            let turn = self.turn.next();
            observer.on_turn_start(turn);
            let moves = self.step(turn);
            if moves.is_empty() {
                idle += 1;
                debug!(turn = turn.0, idle, "no train could move");
                if idle >= IDLE_LIMIT {
                    return Err(self.stall(StallReason::Deadlock, observer));
                }
                continue;
            }
            idle = 0;

            self.turn = turn;
            let record = TurnRecord { turn, moves };
            let arrived = self.fleet.arrived_count();
            debug!(turn = turn.0, moves = record.moves.len(), arrived, "turn resolved");
            observer.on_turn_end(turn, &record, arrived);
            self.log.push(record);
        }

        observer.on_sim_end(self.turn);
        info!(
            turns      = self.turn.0,
            trains     = self.fleet.len(),
            dispatcher = self.dispatcher.name(),
            "all trains arrived"
        );
        Ok(SimOutcome { log: std::mem::take(&mut self.log), turns: self.turn.0 })
    }

    /// Resolve and apply one turn, returning its moves (empty if nothing
    /// could move).  Does not touch the log.
    pub fn step(&mut self, turn: Turn) -> Vec<Move> {
        self.replan(turn);

        let proposals: Vec<Move> = self
            .fleet
            .active()
            .filter_map(|train| {
                let to = self.fleet.next_station(train)?;
                Some(Move { train, from: self.fleet.position(train), to })
            })
            .collect();

        let moves = resolve_moves(&self.occupancy, &proposals, &self.config);
        self.occupancy = apply_moves(std::mem::take(&mut self.occupancy), &moves);
        for m in &moves {
            self.fleet.advance(m.train, m.to);
        }
        moves
    }

    /// `true` once every train stands at the destination.
    pub fn is_finished(&self) -> bool {
        self.fleet.all_arrived()
    }

    /// The last logged turn (`Turn::ZERO` before the first move).
    pub fn current_turn(&self) -> Turn {
        self.turn
    }

    /// Turns logged so far.
    pub fn log(&self) -> &MovementLog {
        &self.log
    }

    /// Active trains at the head of their station queue, in id order.
    pub fn ready_trains(&self) -> Vec<TrainId> {
        self.fleet
            .active()
            .filter(|&t| self.occupancy.head(self.fleet.position(t)) == Some(t))
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn replan(&mut self, turn: Turn) {
        let ready = self.ready_trains();
        let reroutes = {
            let ctx = DispatchContext {
                turn,
                graph:     self.graph,
                start:     self.start,
                end:       self.end,
                positions: &self.fleet.positions,
                routes:    &self.fleet.routes,
                cursors:   &self.fleet.cursors,
                ready:     &ready,
            };
            self.dispatcher.replan(&ctx)
        };

        for reroute in reroutes {
            let train = reroute.train;
            if !self.fleet.reroute(self.graph, train, reroute.route) {
                warn!(
                    turn       = turn.0,
                    %train,
                    dispatcher = self.dispatcher.name(),
                    "ignoring invalid reroute"
                );
            }
        }
    }

    fn stall<O: SimObserver>(&mut self, reason: StallReason, observer: &mut O) -> SimError {
        observer.on_sim_end(self.turn);
        warn!(
            %reason,
            turns   = self.turn.0,
            budget  = self.budget,
            arrived = self.fleet.arrived_count(),
            trains  = self.fleet.len(),
            "simulation did not converge"
        );
        SimError::NonConvergent {
            reason,
            turns:  self.turn.0,
            budget: self.budget,
            log:    std::mem::take(&mut self.log),
        }
    }
}
