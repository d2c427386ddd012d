//! End-to-end solve pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::enumeration::{enumerate_itineraries, generate_candidate_routes};
use crate::evaluation::candidate_cost;
use crate::models::{Graph, RoutePlan};
use crate::search::{distributed_search, parallel_min, Collective, DistributedOutcome};

/// Configuration of a solve.
///
/// `max_stops_per_route` counts the depot endpoints: a value of 5 allows
/// routes visiting up to 3 customers. `threads` pins the worker-thread
/// count; when unset, one worker per available CPU is used.
///
/// # Examples
///
/// ```
/// use cvrp_exact::solver::SolverConfig;
///
/// let config = SolverConfig::new(15, 5).with_threads(4);
/// assert_eq!(config.vehicle_capacity, 15);
/// assert_eq!(config.thread_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Vehicle load capacity shared by the whole (homogeneous) fleet.
    pub vehicle_capacity: u64,
    /// Maximum stops per route, depot endpoints included.
    pub max_stops_per_route: usize,
    /// Worker threads for the parallel stages; `None` means all CPUs.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl SolverConfig {
    /// Creates a configuration with the default thread count.
    pub fn new(vehicle_capacity: u64, max_stops_per_route: usize) -> Self {
        Self {
            vehicle_capacity,
            max_stops_per_route,
            threads: None,
        }
    }

    /// Pins the worker-thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Effective worker-thread count.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}

/// Finds the cheapest complete plan by exhaustive search.
///
/// Runs the full pipeline: candidate-route generation, itinerary
/// enumeration, and the thread-parallel minimum search. Returns `None` when
/// no combination of feasible routes covers every customer exactly once.
///
/// # Examples
///
/// ```
/// use cvrp_exact::models::Graph;
/// use cvrp_exact::solver::{solve, SolverConfig};
///
/// let mut graph = Graph::new(4);
/// graph.set_demand(1, 4);
/// graph.set_demand(2, 5);
/// graph.set_demand(3, 6);
/// for (u, v, c) in [(0, 1, 10), (0, 2, 10), (0, 3, 10), (1, 2, 5), (1, 3, 5), (2, 3, 5)] {
///     graph.set_cost(u, v, c);
///     graph.set_cost(v, u, c);
/// }
///
/// let plan = solve(&graph, &SolverConfig::new(15, 5)).expect("feasible");
/// assert_eq!(plan.total_cost(), 30);
/// ```
pub fn solve(graph: &Graph, config: &SolverConfig) -> Option<RoutePlan> {
    let routes =
        generate_candidate_routes(graph, config.vehicle_capacity, config.max_stops_per_route);
    let itineraries = enumerate_itineraries(&routes, graph.num_vertices());
    debug!(
        "searching {} itineraries over {} candidate routes",
        itineraries.len(),
        routes.len()
    );

    let result = parallel_min(
        &itineraries,
        &routes,
        graph,
        Some(config.thread_count()),
    )?;

    let mut plan = RoutePlan::new();
    for route in result.itinerary.resolve(&routes) {
        let cost =
            candidate_cost(route, graph).expect("winning itinerary contains only valid routes");
        plan.add_route(route.clone(), cost);
    }
    debug_assert_eq!(plan.total_cost(), result.cost);
    Some(plan)
}

/// Runs one rank of the distributed exhaustive search.
///
/// Every rank regenerates the (deterministic) candidate and itinerary lists
/// itself, evaluates its interleaved shard, and joins the collective
/// reduction. Only the root rank learns the global minimum cost — and only
/// the cost; see [`DistributedOutcome`].
pub fn solve_distributed<C: Collective>(
    graph: &Graph,
    config: &SolverConfig,
    collective: &C,
) -> DistributedOutcome {
    let routes =
        generate_candidate_routes(graph, config.vehicle_capacity, config.max_stops_per_route);
    let itineraries = enumerate_itineraries(&routes, graph.num_vertices());
    distributed_search(&itineraries, &routes, graph, collective, config.threads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{respects_capacity, route_cost};
    use crate::models::DEPOT;
    use crate::search::{channel_world, sequential_min, DistributedOutcome, ROOT};
    use proptest::prelude::*;

    /// Depot plus three customers, all edges present and symmetric.
    fn example() -> Graph {
        let mut g = Graph::new(4);
        g.set_demand(1, 4);
        g.set_demand(2, 5);
        g.set_demand(3, 6);
        for (u, v, c) in [(0, 1, 10), (0, 2, 10), (0, 3, 10), (1, 2, 5), (1, 3, 5), (2, 3, 5)] {
            g.set_cost(u, v, c);
            g.set_cost(v, u, c);
        }
        g
    }

    #[test]
    fn test_solve_example_instance() {
        let plan = solve(&example(), &SolverConfig::new(15, 5)).expect("feasible");
        assert_eq!(plan.total_cost(), 30);
        assert_eq!(plan.num_routes(), 1);
        assert_eq!(plan.routes()[0].num_customers(), 3);
        assert!(plan.is_complete(4));
    }

    #[test]
    fn test_solve_capacity_forces_split() {
        // Capacity 14 rules out the single grand tour (demand 15); the best
        // plan pairs two customers and serves the third alone.
        let plan = solve(&example(), &SolverConfig::new(14, 5)).expect("feasible");
        assert_eq!(plan.total_cost(), 45);
        assert_eq!(plan.num_routes(), 2);
        assert!(plan.is_complete(4));
    }

    #[test]
    fn test_solve_infeasible_instance() {
        let mut g = Graph::new(3);
        g.set_demand(1, 1);
        g.set_demand(2, 1);
        // No edges at all.
        assert!(solve(&g, &SolverConfig::new(10, 5)).is_none());
    }

    #[test]
    fn test_solve_thread_count_does_not_matter() {
        let graph = example();
        let baseline = solve(&graph, &SolverConfig::new(15, 5).with_threads(1))
            .expect("feasible")
            .total_cost();
        for threads in [2, 3, 8] {
            let cost = solve(&graph, &SolverConfig::new(15, 5).with_threads(threads))
                .expect("feasible")
                .total_cost();
            assert_eq!(cost, baseline);
        }
    }

    #[test]
    fn test_solve_distributed_example() {
        let graph = example();
        let config = SolverConfig::new(15, 5).with_threads(2);
        let world = channel_world(3);
        let outcomes: Vec<DistributedOutcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = world
                .into_iter()
                .map(|collective| {
                    let graph = &graph;
                    let config = &config;
                    scope.spawn(move || solve_distributed(graph, config, &collective))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("rank thread panicked"))
                .collect()
        });
        assert_eq!(outcomes[ROOT], DistributedOutcome::WinnerUnknown { cost: 30 });
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = SolverConfig::new(15, 5).with_threads(4);
        let json = serde_json::to_string(&config).expect("serializes");
        let back: SolverConfig = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, config);
        // `threads` may be omitted entirely.
        let from_minimal: SolverConfig =
            serde_json::from_str(r#"{"vehicle_capacity":15,"max_stops_per_route":5}"#)
                .expect("deserializes");
        assert_eq!(from_minimal.threads, None);
    }

    /// Small random instances: up to three customers, sparse edges (a zero
    /// cost is an absent edge), small demands.
    fn arb_graph() -> impl Strategy<Value = Graph> {
        (2usize..=4).prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec(1u64..=5, n - 1),
                proptest::collection::vec(0u64..=6, n * n),
            )
                .prop_map(|(n, demands, costs)| {
                    let mut graph = Graph::new(n);
                    for (i, demand) in demands.into_iter().enumerate() {
                        graph.set_demand(i + 1, demand);
                    }
                    for u in 0..n {
                        for v in 0..n {
                            if u != v {
                                graph.set_cost(u, v, costs[u * n + v]);
                            }
                        }
                    }
                    graph
                })
        })
    }

    proptest! {
        #[test]
        fn prop_candidates_are_feasible(graph in arb_graph()) {
            let capacity = 8;
            let routes = generate_candidate_routes(&graph, capacity, 5);
            for route in &routes {
                prop_assert!(route_cost(route.stops(), &graph).is_some());
                prop_assert!(respects_capacity(route.stops(), &graph, capacity));
                // Distinct customers, never the depot, strictly inside.
                let interior = route.interior();
                prop_assert!(!interior.is_empty());
                prop_assert!(interior.iter().all(|&v| v != DEPOT));
                let mut seen = interior.to_vec();
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), interior.len());
            }
        }

        #[test]
        fn prop_itineraries_partition_customers(graph in arb_graph()) {
            let routes = generate_candidate_routes(&graph, 8, 5);
            let itineraries = enumerate_itineraries(&routes, graph.num_vertices());
            for itinerary in &itineraries {
                prop_assert!(itinerary.covers_all_customers(&routes, graph.num_vertices()));
            }
        }

        #[test]
        fn prop_parallel_matches_sequential(graph in arb_graph()) {
            let routes = generate_candidate_routes(&graph, 8, 5);
            let itineraries = enumerate_itineraries(&routes, graph.num_vertices());
            let sequential = sequential_min(&itineraries, &routes, &graph);
            let parallel = parallel_min(&itineraries, &routes, &graph, Some(3));
            prop_assert_eq!(
                sequential.as_ref().map(|r| r.cost),
                parallel.as_ref().map(|r| r.cost)
            );
        }

        #[test]
        fn prop_enumeration_is_idempotent(graph in arb_graph()) {
            let first = generate_candidate_routes(&graph, 8, 5);
            let second = generate_candidate_routes(&graph, 8, 5);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(
                enumerate_itineraries(&first, graph.num_vertices()),
                enumerate_itineraries(&second, graph.num_vertices())
            );
        }
    }
}
