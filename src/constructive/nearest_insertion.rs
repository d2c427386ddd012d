//! Nearest-insertion heuristic.
//!
//! Opens a route at the lowest-index customer not yet visited, then keeps
//! appending the nearest reachable unvisited customer that still fits the
//! remaining capacity. When no extension is possible the route closes at
//! the depot and the next seed customer opens a new one.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use tracing::debug;

use crate::evaluation::route_cost;
use crate::models::{CandidateRoute, Graph, RoutePlan, DEPOT};

/// Builds an approximate plan by greedy nearest insertion.
///
/// A customer only extends a route if the edge from the route's current end
/// exists (nonzero cost) and its demand fits. Closed routes are validated
/// end to end; a route that still traverses a missing edge (typically the
/// opening or closing depot leg) is discarded and its customers reported as
/// unassigned.
///
/// # Examples
///
/// ```
/// use cvrp_exact::constructive::nearest_insertion;
/// use cvrp_exact::models::Graph;
///
/// let mut graph = Graph::new(3);
/// graph.set_demand(1, 5);
/// graph.set_demand(2, 5);
/// for (u, v) in [(0, 1), (1, 0), (0, 2), (2, 0), (1, 2), (2, 1)] {
///     graph.set_cost(u, v, 4);
/// }
///
/// let plan = nearest_insertion(&graph, 10);
/// assert_eq!(plan.num_served(), 2);
/// assert!(plan.unassigned().is_empty());
/// ```
pub fn nearest_insertion(graph: &Graph, capacity: u64) -> RoutePlan {
    let n = graph.num_vertices();
    if n <= 1 {
        return RoutePlan::new();
    }

    let mut visited = vec![false; n];
    visited[DEPOT] = true;

    let mut plan = RoutePlan::new();

    for seed in 1..n {
        if visited[seed] {
            continue;
        }

        let mut stops = vec![DEPOT, seed];
        let mut current = seed;
        let mut load = graph.demand(seed);
        visited[seed] = true;

        loop {
            // Nearest unvisited customer reachable from the route's end
            // that still fits the remaining capacity.
            let mut best: Option<(usize, u64)> = None;
            for candidate in 1..n {
                if visited[candidate] {
                    continue;
                }
                if load + graph.demand(candidate) > capacity {
                    continue;
                }
                let edge = graph.cost(current, candidate);
                if edge == 0 {
                    continue;
                }
                if best.map_or(true, |(_, nearest)| edge < nearest) {
                    best = Some((candidate, edge));
                }
            }

            let Some((next, _)) = best else {
                break;
            };
            stops.push(next);
            visited[next] = true;
            load += graph.demand(next);
            current = next;
        }

        stops.push(DEPOT);
        match route_cost(&stops, graph) {
            Some(cost) => plan.add_route(CandidateRoute::from_stops(stops), cost),
            None => {
                for &stop in &stops {
                    if stop != DEPOT {
                        plan.add_unassigned(stop);
                    }
                }
            }
        }
    }

    debug!(
        "nearest insertion built {} routes at cost {}, {} unassigned",
        plan.num_routes(),
        plan.total_cost(),
        plan.unassigned().len()
    );
    plan
}
