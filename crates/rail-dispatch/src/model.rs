//! The `Dispatcher` trait: the extension point for routing policies.

use rail_core::StationId;
use rail_network::StationGraph;
use rail_routing::Route;

use crate::{DispatchContext, DispatchResult, Reroute};

/// Pluggable train distribution policy.
///
/// # Required methods
///
/// Only [`assign`][Self::assign] is required.  [`replan`][Self::replan] has a
/// no-op default, so static policies never see the per-turn snapshot.
///
/// # Thread safety
///
/// Batch runs execute independent simulations on Rayon worker threads, each
/// owning its dispatcher, so implementations must be `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysShortest;
///
/// impl Dispatcher for AlwaysShortest {
///     fn assign(&mut self, graph: &StationGraph, start: StationId, end: StationId, n: usize)
///         -> DispatchResult<Vec<Route>>
///     {
///         let route = ShortestPathOracle.route(graph, start, end)?;
///         Ok(vec![route; n])
///     }
/// }
/// ```
pub trait Dispatcher: Send + Sync {
    /// Return one route per train, `T1` first.
    ///
    /// Every route must start at `start` and end at `end`.
    fn assign(
        &mut self,
        graph:       &StationGraph,
        start:       StationId,
        end:         StationId,
        train_count: usize,
    ) -> DispatchResult<Vec<Route>>;

    /// Called before every turn with the start-of-turn snapshot.
    ///
    /// Default: no route changes.
    fn replan(&self, _ctx: &DispatchContext<'_>) -> Vec<Reroute> {
        vec![]
    }

    /// Short policy name used in logs.
    fn name(&self) -> &'static str;
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn assign(
        &mut self,
        graph:       &StationGraph,
        start:       StationId,
        end:         StationId,
        train_count: usize,
    ) -> DispatchResult<Vec<Route>> {
        (**self).assign(graph, start, end, train_count)
    }

    fn replan(&self, ctx: &DispatchContext<'_>) -> Vec<Reroute> {
        (**self).replan(ctx)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
