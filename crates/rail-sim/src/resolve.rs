//! Turn resolution: which proposed moves actually happen.
//!
//! Every active train proposes the next hop of its route.  Proposals are
//! then pruned until the surviving set is self-consistent:
//!
//! 1. A train may leave only in queue order (see [`DepartureRule`]).
//! 2. A train may not enter a station that keeps a train which is not
//!    leaving this turn.  The destination has unbounded capacity.
//! 3. With `forbid_edge_swaps`, two trains exchanging stations across one
//!    connection both stay.
//!
//! Rules 1-3 are re-applied until nothing changes.  Then, of several trains
//! entering the same station, only the lowest id survives, and the whole
//! process repeats.  Each pass evaluates the rules against the survivors of
//! the previous pass, so the result does not depend on iteration order.

use rustc_hash::FxHashMap;

use rail_core::{StationId, TrainId};

use crate::{DepartureRule, Move, OccupancyState, SimConfig};

/// Reduce `proposals` (one per train, ascending id) to the moves that happen
/// this turn.  The result keeps ascending train order.
pub fn resolve_moves(
    snapshot:  &OccupancyState,
    proposals: &[Move],
    config:    &SimConfig,
) -> Vec<Move> {
    let index: FxHashMap<TrainId, usize> =
        proposals.iter().enumerate().map(|(i, m)| (m.train, i)).collect();
    let mut live = vec![true; proposals.len()];

    loop {
        // ── Rules 1-3 to a fixpoint ───────────────────────────────────────────
        loop {
            let blocked: Vec<usize> = (0..proposals.len())
                .filter(|&i| live[i])
                .filter(|&i| {
                    let m = &proposals[i];
                    !may_depart(snapshot, m, config.departure, &index, &live)
                        || target_blocked(snapshot, m, &index, &live)
                        || (config.forbid_edge_swaps && has_swap_partner(proposals, i, &live))
                })
                .collect();
            if blocked.is_empty() {
                break;
            }
            for i in blocked {
                live[i] = false;
            }
        }

        // ── Rule 4: one entrant per station ───────────────────────────────────
        let mut winner: FxHashMap<StationId, TrainId> = FxHashMap::default();
        for (i, m) in proposals.iter().enumerate() {
            if live[i] && m.to != snapshot.end() {
                winner
                    .entry(m.to)
                    .and_modify(|w| *w = (*w).min(m.train))
                    .or_insert(m.train);
            }
        }
        let mut changed = false;
        for (i, m) in proposals.iter().enumerate() {
            if live[i] && m.to != snapshot.end() && winner.get(&m.to) != Some(&m.train) {
                live[i] = false;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    proposals
        .iter()
        .zip(&live)
        .filter_map(|(m, &keep)| keep.then_some(*m))
        .collect()
}

#[inline]
fn is_moving(train: TrainId, index: &FxHashMap<TrainId, usize>, live: &[bool]) -> bool {
    index.get(&train).is_some_and(|&i| live[i])
}

fn may_depart(
    snapshot: &OccupancyState,
    m:        &Move,
    rule:     DepartureRule,
    index:    &FxHashMap<TrainId, usize>,
    live:     &[bool],
) -> bool {
    let queue = snapshot.queue(m.from);
    let Some(pos) = queue.iter().position(|&t| t == m.train) else {
        return false;
    };
    match rule {
        DepartureRule::HeadOnly => pos == 0,
        DepartureRule::FifoBatch => queue.iter().take(pos).all(|&t| is_moving(t, index, live)),
    }
}

fn target_blocked(
    snapshot: &OccupancyState,
    m:        &Move,
    index:    &FxHashMap<TrainId, usize>,
    live:     &[bool],
) -> bool {
    m.to != snapshot.end()
        && snapshot.queue(m.to).iter().any(|&t| !is_moving(t, index, live))
}

fn has_swap_partner(proposals: &[Move], i: usize, live: &[bool]) -> bool {
    let m = &proposals[i];
    proposals
        .iter()
        .zip(live)
        .any(|(other, &alive)| alive && other.from == m.to && other.to == m.from)
}
