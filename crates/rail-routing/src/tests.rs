//! Unit and property tests for rail-routing.

#[cfg(test)]
mod helpers {
    use rail_core::{Coord, StationId};
    use rail_network::{GraphLimits, StationGraph};

    fn graph(stations: &[&str], edges: &[(&str, &str)]) -> StationGraph {
        StationGraph::from_parts(
            stations.iter().enumerate().map(|(i, n)| (*n, Coord::new(i as u32, 0))),
            edges.iter().copied(),
            GraphLimits::relaxed(),
        )
        .unwrap()
    }

    /// `a - b - c`
    pub fn line() -> StationGraph {
        graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")])
    }

    /// ```text
    ///   a ── b ── d ── e
    ///    \       /
    ///     └─ c ─┘
    /// ```
    pub fn diamond() -> StationGraph {
        graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e")],
        )
    }

    /// Two station-disjoint routes of equal length: `s-x1-e` and `s-x2-e`.
    pub fn twin() -> StationGraph {
        graph(
            &["s", "x1", "x2", "e"],
            &[("s", "x1"), ("x1", "e"), ("s", "x2"), ("x2", "e")],
        )
    }

    /// `a - b` plus an unconnected `z`.
    pub fn split() -> StationGraph {
        graph(&["a", "b", "z"], &[("a", "b")])
    }

    pub fn id(g: &StationGraph, name: &str) -> StationId {
        g.id_of(name).unwrap()
    }

    pub fn names(g: &StationGraph, route: &crate::Route) -> Vec<String> {
        route.stations.iter().map(|&s| g.name(s).to_owned()).collect()
    }
}

// ── MinQueue ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use crate::MinQueue;

    #[test]
    fn pops_lowest_first() {
        let mut q = MinQueue::new();
        q.push(5, "five");
        q.push(1, "one");
        q.push(3, "three");
        assert_eq!(q.peek_priority(), Some(&1));
        assert_eq!(q.pop(), Some((1, "one")));
        assert_eq!(q.pop(), Some((3, "three")));
        assert_eq!(q.pop(), Some((5, "five")));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut q = MinQueue::new();
        for item in ["first", "second", "third"] {
            q.push(7u32, item);
        }
        q.push(2, "early");
        let order: Vec<_> = std::iter::from_fn(|| q.pop().map(|(_, i)| i)).collect();
        assert_eq!(order, ["early", "first", "second", "third"]);
    }

    #[test]
    fn len_and_clear() {
        let mut q: MinQueue<u8, ()> = MinQueue::default();
        assert!(q.is_empty());
        q.push(1, ());
        q.push(1, ());
        assert_eq!(q.len(), 2);
        q.clear();
        assert!(q.is_empty());
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use rail_core::StationId;
    use crate::Route;

    fn r(ids: &[u32]) -> Route {
        Route::new(ids.iter().map(|&i| StationId(i)).collect())
    }

    #[test]
    fn length_and_ends() {
        let route = r(&[0, 1, 2, 3]);
        assert_eq!(route.len_turns(), 3);
        assert_eq!(route.start(), StationId(0));
        assert_eq!(route.end(), StationId(3));
        assert_eq!(route.station_at(2), Some(StationId(2)));
        assert_eq!(route.station_at(4), None);
        assert!(Route::trivial(StationId(5)).is_trivial());
    }

    #[test]
    fn suffix_and_overlap() {
        let route = r(&[0, 1, 2, 3]);
        assert_eq!(route.suffix_from(StationId(2)), Some(r(&[2, 3])));
        assert_eq!(route.suffix_from(StationId(9)), None);
        assert_eq!(route.overlap(&r(&[0, 4, 2, 3])), 3);
        assert_eq!(route.overlap(&r(&[7, 8])), 0);
        // Same stations, one step later: only the shared origin lines up.
        let long = r(&[0, 1, 2, 3, 4, 5]);
        assert_eq!(long.overlap(&r(&[0, 6, 1, 2, 3, 4, 5])), 1);
        assert_eq!(r(&[0, 6, 1, 2, 3, 4, 5]).overlap(&long), 1);
    }

    #[test]
    fn simple_detection() {
        assert!(r(&[0, 1, 2]).is_simple());
        assert!(!r(&[0, 1, 0, 2]).is_simple());
    }

    #[test]
    fn display_uses_names() {
        let g = super::helpers::line();
        let route = r(&[0, 1, 2]);
        assert_eq!(route.display(&g).to_string(), "a -> b -> c");
        assert!(route.is_walk_in(&g));
        assert!(!r(&[0, 2]).is_walk_in(&g));
    }
}

// ── Shortest paths ────────────────────────────────────────────────────────────

#[cfg(test)]
mod shortest {
    use rustc_hash::FxHashSet;

    use super::helpers::{diamond, id, line, names, split, twin};
    use crate::{
        hop_distances, shortest_path, shortest_path_avoiding, Router, RoutingError,
        ShortestPathOracle, UNREACHABLE,
    };

    #[test]
    fn straight_line() {
        let g = line();
        let route = shortest_path(&g, id(&g, "a"), id(&g, "c")).unwrap();
        assert_eq!(names(&g, &route), ["a", "b", "c"]);
        assert_eq!(route.len_turns(), 2);
    }

    #[test]
    fn ties_follow_neighbour_order() {
        let g = diamond();
        let route = shortest_path(&g, id(&g, "a"), id(&g, "e")).unwrap();
        assert_eq!(names(&g, &route), ["a", "b", "d", "e"]);

        let g = twin();
        let route = shortest_path(&g, id(&g, "s"), id(&g, "e")).unwrap();
        assert_eq!(names(&g, &route), ["s", "x1", "e"]);
    }

    #[test]
    fn same_station_is_trivial() {
        let g = line();
        let route = shortest_path(&g, id(&g, "b"), id(&g, "b")).unwrap();
        assert!(route.is_trivial());
    }

    #[test]
    fn unreachable() {
        let g = split();
        assert!(shortest_path(&g, id(&g, "a"), id(&g, "z")).is_none());
        let err = ShortestPathOracle.route(&g, id(&g, "a"), id(&g, "z")).unwrap_err();
        let (from, to) = (id(&g, "a"), id(&g, "z"));
        assert_eq!(err, RoutingError::UnreachableDestination { from, to });
    }

    #[test]
    fn route_by_name() {
        let g = line();
        let route = ShortestPathOracle.route_by_name(&g, "a", "c").unwrap();
        assert_eq!(route.len_turns(), 2);
        let err = ShortestPathOracle.route_by_name(&g, "a", "nowhere").unwrap_err();
        assert_eq!(err, RoutingError::StationNotFound("nowhere".into()));
    }

    #[test]
    fn avoiding_blocked_stations() {
        let g = twin();
        let blocked: FxHashSet<_> = [id(&g, "x1")].into_iter().collect();
        let route = shortest_path_avoiding(&g, id(&g, "s"), id(&g, "e"), &blocked).unwrap();
        assert_eq!(names(&g, &route), ["s", "x2", "e"]);

        let blocked: FxHashSet<_> = [id(&g, "x1"), id(&g, "x2")].into_iter().collect();
        assert!(shortest_path_avoiding(&g, id(&g, "s"), id(&g, "e"), &blocked).is_none());

        // Endpoints are never blocked.
        let blocked: FxHashSet<_> = [id(&g, "e")].into_iter().collect();
        assert!(shortest_path_avoiding(&g, id(&g, "s"), id(&g, "e"), &blocked).is_some());
    }

    #[test]
    fn hop_distances_bfs() {
        let g = diamond();
        let dist = hop_distances(&g, id(&g, "e"));
        assert_eq!(dist[id(&g, "e").index()], 0);
        assert_eq!(dist[id(&g, "d").index()], 1);
        assert_eq!(dist[id(&g, "c").index()], 2);
        assert_eq!(dist[id(&g, "a").index()], 3);

        let g = split();
        assert_eq!(hop_distances(&g, id(&g, "a"))[id(&g, "z").index()], UNREACHABLE);
    }
}

// ── Time-expanded search ──────────────────────────────────────────────────────

#[cfg(test)]
mod time_expanded {
    use super::helpers::{diamond, id, line, names, split, twin};
    use crate::{
        plan_wave, shortest_path, Heuristic, Reservations, Router, RoutingError,
        TimeExpandedPathfinder,
    };

    #[test]
    fn empty_reservations_match_shortest_length() {
        let g = diamond();
        for h in [Heuristic::Constant, Heuristic::GraphDistance] {
            let finder = TimeExpandedPathfinder::new(h);
            let route = finder.route(&g, id(&g, "a"), id(&g, "e")).unwrap();
            assert_eq!(route.len_turns(), 3);
            assert!(route.is_walk_in(&g));
        }
    }

    #[test]
    fn reserved_slots_are_avoided() {
        let g = diamond();
        let (a, e) = (id(&g, "a"), id(&g, "e"));
        let first = shortest_path(&g, a, e).unwrap();
        let mut reserved = Reservations::new();
        reserved.commit(&first, 0);
        assert!(reserved.is_reserved(id(&g, "b"), 1));
        assert!(reserved.is_reserved(id(&g, "d"), 2));
        assert!(!reserved.is_reserved(e, 3), "destination is never reserved");
        assert_eq!(reserved.latest(), 3);

        for h in [Heuristic::Constant, Heuristic::GraphDistance] {
            let finder = TimeExpandedPathfinder::new(h);
            let route = finder.find(&g, a, e, 0, &reserved).unwrap();
            for (t, &s) in route.stations.iter().enumerate().skip(1) {
                assert!(s == e || !reserved.is_reserved(s, t as u64), "{h:?} hit a reserved slot");
            }
            // No waiting: the only escape at offset 0 is a detour.
            assert_eq!(route.len_turns(), 5);
        }
    }

    #[test]
    fn later_offset_reuses_the_same_route() {
        let g = diamond();
        let (a, e) = (id(&g, "a"), id(&g, "e"));
        let first = shortest_path(&g, a, e).unwrap();
        let mut reserved = Reservations::new();
        reserved.commit(&first, 0);
        let route = TimeExpandedPathfinder::default().find(&g, a, e, 1, &reserved).unwrap();
        assert_eq!(route, first);
    }

    #[test]
    fn destination_is_never_occupied() {
        let g = line();
        let (b, c) = (id(&g, "b"), id(&g, "c"));
        let mut reserved = Reservations::new();
        reserved.commit(&crate::Route::new(vec![b, c]), 0);
        let route = TimeExpandedPathfinder::default().find(&g, b, c, 0, &reserved).unwrap();
        assert_eq!(route.stations, [b, c]);
    }

    #[test]
    fn unreachable_destination() {
        let g = split();
        let finder = TimeExpandedPathfinder::default();
        assert!(finder.find(&g, id(&g, "a"), id(&g, "z"), 0, &Reservations::new()).is_none());
        assert!(matches!(
            finder.route(&g, id(&g, "a"), id(&g, "z")),
            Err(RoutingError::UnreachableDestination { .. })
        ));
        assert!(plan_wave(&g, id(&g, "a"), id(&g, "z"), 4, 10).is_empty());
    }

    #[test]
    fn wave_on_a_line_staggers_departures() {
        let g = line();
        let wave = plan_wave(&g, id(&g, "a"), id(&g, "c"), 4, 10);
        let offsets: Vec<u64> = wave.iter().map(|c| c.start_offset).collect();
        assert_eq!(offsets, [0, 1, 2, 3]);
        assert!(wave.iter().all(|c| names(&g, &c.route) == ["a", "b", "c"]));
    }

    #[test]
    fn wave_on_twin_paths_uses_both() {
        let g = twin();
        let wave = plan_wave(&g, id(&g, "s"), id(&g, "e"), 4, 10);
        let routes: Vec<Vec<String>> = wave.iter().map(|c| names(&g, &c.route)).collect();
        assert_eq!(
            routes,
            [["s", "x1", "e"], ["s", "x2", "e"], ["s", "x1", "e"], ["s", "x2", "e"]]
        );
        let offsets: Vec<u64> = wave.iter().map(|c| c.start_offset).collect();
        assert_eq!(offsets, [0, 0, 1, 1]);
    }

    #[test]
    fn wave_stops_at_max_offset() {
        let g = line();
        let wave = plan_wave(&g, id(&g, "a"), id(&g, "c"), 4, 1);
        assert_eq!(wave.len(), 2);
    }
}

// ── Simple-path enumeration ───────────────────────────────────────────────────

#[cfg(test)]
mod enumerate {
    use super::helpers::{diamond, id, names, split};
    use crate::{simple_paths, PathLimits};

    #[test]
    fn shortest_first_then_neighbour_order() {
        let g = diamond();
        let paths = simple_paths(&g, id(&g, "a"), id(&g, "e"), PathLimits::default());
        let paths: Vec<Vec<String>> = paths.iter().map(|p| names(&g, p)).collect();
        assert_eq!(paths, [["a", "b", "d", "e"], ["a", "c", "d", "e"]]);

        let paths = simple_paths(&g, id(&g, "b"), id(&g, "c"), PathLimits::default());
        let lens: Vec<usize> = paths.iter().map(|p| p.len_turns()).collect();
        assert_eq!(lens, [2, 2]);
    }

    #[test]
    fn limits_apply() {
        let g = diamond();
        let (a, e) = (id(&g, "a"), id(&g, "e"));
        let one = PathLimits { max_paths: 1, ..PathLimits::default() };
        assert_eq!(simple_paths(&g, a, e, one).len(), 1);
        let short = PathLimits { max_turns: 2, ..PathLimits::default() };
        assert!(simple_paths(&g, a, e, short).is_empty());
        let exact = PathLimits { max_turns: 3, ..PathLimits::default() };
        assert_eq!(simple_paths(&g, a, e, exact).len(), 2);
    }

    #[test]
    fn disconnected_and_trivial() {
        let g = split();
        assert!(simple_paths(&g, id(&g, "a"), id(&g, "z"), PathLimits::default()).is_empty());
        let same = simple_paths(&g, id(&g, "a"), id(&g, "a"), PathLimits::default());
        assert_eq!(same.len(), 1);
        assert!(same[0].is_trivial());
    }
}

// ── Strategies ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod strategy {
    use rail_core::Coord;
    use rail_network::{GraphLimits, StationGraph};

    use super::helpers::{diamond, id, names, split, twin};
    use crate::{shortest_path, Heuristic, PathStrategy, RoutingError};

    #[test]
    fn shortest_only() {
        let g = twin();
        let c = PathStrategy::ShortestOnly.candidates(&g, id(&g, "s"), id(&g, "e")).unwrap();
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn k_shortest_is_station_disjoint() {
        let g = twin();
        let c = PathStrategy::KShortest { k: 8 }.candidates(&g, id(&g, "s"), id(&g, "e")).unwrap();
        let c: Vec<Vec<String>> = c.iter().map(|r| names(&g, r)).collect();
        assert_eq!(c, [["s", "x1", "e"], ["s", "x2", "e"]]);

        let g = diamond();
        let c = PathStrategy::KShortest { k: 8 }.candidates(&g, id(&g, "a"), id(&g, "e")).unwrap();
        assert_eq!(c.len(), 1, "every alternative passes through d");
    }

    #[test]
    fn k_shortest_with_direct_connection() {
        let g = StationGraph::from_parts(
            [("s", Coord::new(0, 0)), ("e", Coord::new(1, 0))],
            [("s", "e")],
            GraphLimits::default(),
        )
        .unwrap();
        let c = PathStrategy::KShortest { k: 3 }.candidates(&g, id(&g, "s"), id(&g, "e")).unwrap();
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn time_expanded_deduplicates() {
        let g = twin();
        let strategy = PathStrategy::TimeExpandedCollisionAware {
            wave_size: 4,
            heuristic: Heuristic::Constant,
        };
        let c = strategy.candidates(&g, id(&g, "s"), id(&g, "e")).unwrap();
        let c: Vec<Vec<String>> = c.iter().map(|r| names(&g, r)).collect();
        assert_eq!(c, [["s", "x1", "e"], ["s", "x2", "e"]]);
    }

    #[test]
    fn first_candidate_is_reference() {
        let g = diamond();
        let (a, e) = (id(&g, "a"), id(&g, "e"));
        let reference = shortest_path(&g, a, e).unwrap();
        for strategy in [
            PathStrategy::ShortestOnly,
            PathStrategy::KShortest { k: 3 },
            PathStrategy::default(),
            PathStrategy::TimeExpandedCollisionAware {
                wave_size: 4,
                heuristic: Heuristic::GraphDistance,
            },
        ] {
            let c = strategy.candidates(&g, a, e).unwrap();
            assert_eq!(c[0], reference, "{strategy:?}");
            assert!(c.iter().all(|r| r.start() == a && r.end() == e && r.is_walk_in(&g)));
        }
    }

    #[test]
    fn unreachable_is_an_error() {
        let g = split();
        let err = PathStrategy::default().candidates(&g, id(&g, "a"), id(&g, "z")).unwrap_err();
        assert!(matches!(err, RoutingError::UnreachableDestination { .. }));
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use rustc_hash::FxHashSet;

    use rail_core::{Coord, StationId};
    use rail_network::{GraphLimits, StationGraph, StationGraphBuilder};

    use crate::{plan_wave, shortest_path};

    fn arb_graph() -> impl Strategy<Value = StationGraph> {
        (2usize..9)
            .prop_flat_map(|n| (Just(n), proptest::collection::vec((0..n, 0..n), 0..24)))
            .prop_map(|(n, pairs)| {
                let mut b = StationGraphBuilder::with_limits(GraphLimits::relaxed());
                for i in 0..n {
                    b.add_station(format!("s{i}"), Coord::new(i as u32, 0)).unwrap();
                }
                for (x, y) in pairs {
                    // Self-loops and duplicates are rejected; skip them.
                    let _ = b.add_edge(StationId(x as u32), StationId(y as u32));
                }
                b.build().unwrap()
            })
    }

    /// All-pairs hop distances by Floyd–Warshall.
    fn brute_force(g: &StationGraph) -> Vec<Vec<u32>> {
        let n = g.station_count();
        let inf = u32::MAX / 2;
        let mut d = vec![vec![inf; n]; n];
        for i in 0..n {
            d[i][i] = 0;
        }
        for &(a, b) in g.edges() {
            d[a.index()][b.index()] = 1;
            d[b.index()][a.index()] = 1;
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let via = d[i][k] + d[k][j];
                    if via < d[i][j] {
                        d[i][j] = via;
                    }
                }
            }
        }
        d.into_iter()
            .map(|row| row.into_iter().map(|x| if x >= inf { u32::MAX } else { x }).collect())
            .collect()
    }

    proptest! {
        #[test]
        fn oracle_matches_brute_force(g in arb_graph()) {
            let d = brute_force(&g);
            let n = g.station_count();
            for s in 0..n {
                for t in 0..n {
                    let (from, to) = (StationId(s as u32), StationId(t as u32));
                    match shortest_path(&g, from, to) {
                        Some(route) => {
                            prop_assert_eq!(route.len_turns() as u32, d[s][t]);
                            prop_assert_eq!(route.start(), from);
                            prop_assert_eq!(route.end(), to);
                            prop_assert!(route.is_walk_in(&g));
                        }
                        None => {
                            prop_assert_eq!(d[s][t], u32::MAX);
                        }
                    }
                }
            }
        }

        #[test]
        fn wave_routes_never_share_a_slot(g in arb_graph()) {
            let n = g.station_count();
            let (start, end) = (StationId(0), StationId(n as u32 - 1));
            let wave = plan_wave(&g, start, end, 4, n as u64);
            let mut slots: FxHashSet<(StationId, u64)> = FxHashSet::default();
            for committed in &wave {
                prop_assert!(committed.route.is_walk_in(&g));
                prop_assert_eq!(committed.route.start(), start);
                prop_assert_eq!(committed.route.end(), end);
                for (t, &s) in committed.route.stations.iter().enumerate().skip(1) {
                    if s != end {
                        prop_assert!(slots.insert((s, committed.start_offset + t as u64)));
                    }
                }
            }
        }
    }
}
