//! Clarke-Wright savings heuristic.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own depot round trip. Serving two customers on one route instead
//! of two saves:
//!
//! ```text
//! s(i, j) = c(0, i) + c(0, j) - c(i, j)
//! ```
//!
//! Route pairs are merged in decreasing order of savings, subject to
//! vehicle capacity, the stop limit, and the existence of every edge in the
//! merged sequence. A route that already traverses a missing edge is
//! treated as unmergeable.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use tracing::debug;

use crate::evaluation::{route_cost, route_load};
use crate::models::{CandidateRoute, Graph, RoutePlan, DEPOT};

/// A savings value for serving customers `i` and `j` on one route.
#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: i64,
}

/// Builds an approximate plan with the Clarke-Wright savings heuristic.
///
/// `max_stops` caps the number of customers on a merged route. Customers
/// whose round trip traverses a missing edge end up unassigned — they can
/// neither be merged nor served on their own.
///
/// # Examples
///
/// ```
/// use cvrp_exact::constructive::clarke_wright_savings;
/// use cvrp_exact::models::Graph;
///
/// let mut graph = Graph::new(4);
/// for v in 1..4 {
///     graph.set_demand(v, 10);
///     graph.set_cost(0, v, 10);
///     graph.set_cost(v, 0, 10);
/// }
/// graph.set_cost(1, 2, 1);
/// graph.set_cost(2, 3, 1);
///
/// let plan = clarke_wright_savings(&graph, 30, 3);
/// assert_eq!(plan.num_served(), 3);
/// assert_eq!(plan.num_routes(), 1);
/// ```
pub fn clarke_wright_savings(graph: &Graph, capacity: u64, max_stops: usize) -> RoutePlan {
    let n = graph.num_vertices();
    if n <= 1 {
        return RoutePlan::new();
    }

    // One round trip per customer.
    let mut routes: Vec<Vec<usize>> = graph
        .customers()
        .map(|customer| vec![DEPOT, customer, DEPOT])
        .collect();

    // Savings for every unordered customer pair, best first.
    let mut savings = Vec::with_capacity((n - 1) * (n - 2) / 2);
    for i in 1..n {
        for j in (i + 1)..n {
            let value = graph.cost(DEPOT, i) as i64 + graph.cost(DEPOT, j) as i64
                - graph.cost(i, j) as i64;
            savings.push(Saving { i, j, value });
        }
    }
    savings.sort_by(|a, b| b.value.cmp(&a.value));

    for saving in &savings {
        let Some(route_i) = find_route(saving.i, &routes, graph) else {
            continue;
        };
        let Some(route_j) = find_route(saving.j, &routes, graph) else {
            continue;
        };
        if route_i == route_j {
            continue;
        }

        let combined_load =
            route_load(&routes[route_i], graph) + route_load(&routes[route_j], graph);
        if combined_load > capacity {
            continue;
        }

        let stops_i = routes[route_i].len() - 2;
        let stops_j = routes[route_j].len() - 2;
        if stops_i + stops_j > max_stops {
            continue;
        }

        // Concatenate: drop the first route's closing depot, skip the
        // second route's opening depot.
        let mut merged = routes[route_i].clone();
        merged.pop();
        merged.extend_from_slice(&routes[route_j][1..]);

        if route_cost(&merged, graph).is_some() {
            routes[route_i] = merged;
            routes.remove(route_j);
        }
    }

    let mut plan = RoutePlan::new();
    for stops in routes {
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
        "savings heuristic built {} routes at cost {}",
        plan.num_routes(),
        plan.total_cost()
    );
    plan
}

/// Finds the route currently serving `customer`, skipping routes that have
/// become unmergeable because an edge in them is missing.
fn find_route(customer: usize, routes: &[Vec<usize>], graph: &Graph) -> Option<usize> {
    let index = routes.iter().position(|stops| stops.contains(&customer))?;
    route_cost(&routes[index], graph).map(|_| index)
}
