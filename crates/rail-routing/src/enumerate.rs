//! Breadth-first enumeration of loop-free paths.
//!
//! Partial paths are extended one hop at a time from a FIFO queue, so
//! complete paths come out in non-decreasing length and, within one length,
//! in neighbour order.  The number of simple paths grows exponentially with
//! graph size; [`PathLimits`] bounds both the output and the work done.

use std::collections::VecDeque;

use rail_core::StationId;
use rail_network::StationGraph;

use crate::Route;

/// Bounds for [`simple_paths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathLimits {
    /// Stop after this many complete paths.  Default: 32.
    pub max_paths: usize,
    /// Longest path accepted, in turns.  Default: unbounded.
    pub max_turns: usize,
    /// Stop after popping this many partial paths.  Default: 100 000.
    pub max_expansions: usize,
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_paths:      32,
            max_turns:      usize::MAX,
            max_expansions: 100_000,
        }
    }
}

/// Loop-free paths from `from` to `to`, shortest first.
///
/// `from == to` yields the single trivial route.
pub fn simple_paths(
    graph:  &StationGraph,
    from:   StationId,
    to:     StationId,
    limits: PathLimits,
) -> Vec<Route> {
    if from == to {
        return vec![Route::trivial(from)];
    }

    let mut paths = Vec::new();
    let mut queue: VecDeque<Vec<StationId>> = VecDeque::new();
    queue.push_back(vec![from]);
    let mut expansions = 0usize;

    while let Some(path) = queue.pop_front() {
        if paths.len() >= limits.max_paths || expansions >= limits.max_expansions {
            break;
        }
        expansions += 1;

        let Some(&current) = path.last() else { continue };
        if current == to {
            paths.push(Route::new(path));
            continue;
        }
        // Extending would produce a path of `path.len()` turns.
        if path.len() > limits.max_turns {
            continue;
        }

        for &n in graph.neighbors(current) {
            if !path.contains(&n) {
                let mut next = Vec::with_capacity(path.len() + 1);
                next.extend_from_slice(&path);
                next.push(n);
                queue.push_back(next);
            }
        }
    }

    paths
}
