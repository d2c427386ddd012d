//! Route cost and feasibility primitives.

use crate::models::{CandidateRoute, Graph, Itinerary, DEPOT};

/// Sums the edge costs along a stop sequence.
///
/// Returns `None` the moment any consecutive pair has no edge (cost `0` in
/// the matrix is the absence sentinel). No partial result is kept or
/// cached. A sequence that revisits the depot mid-route fails here on the
/// depot's zero-cost self-loop, which is how the enumeration discards
/// windows that picked up the depot.
///
/// # Examples
///
/// ```
/// use cvrp_exact::evaluation::route_cost;
/// use cvrp_exact::models::Graph;
///
/// let mut graph = Graph::new(3);
/// graph.set_cost(0, 1, 10);
/// graph.set_cost(1, 2, 5);
/// graph.set_cost(2, 0, 10);
///
/// assert_eq!(route_cost(&[0, 1, 2, 0], &graph), Some(25));
/// assert_eq!(route_cost(&[0, 2, 1, 0], &graph), None); // 0→2 missing
/// ```
pub fn route_cost(stops: &[usize], graph: &Graph) -> Option<u64> {
    let mut total = 0u64;
    for pair in stops.windows(2) {
        let edge = graph.cost(pair[0], pair[1]);
        if edge == 0 {
            return None;
        }
        total += edge;
    }
    Some(total)
}

/// True iff the demand sum over the stops fits the vehicle capacity.
///
/// The depot contributes demand `0`, so it may appear in the sequence
/// without affecting the sum.
pub fn respects_capacity(stops: &[usize], graph: &Graph, capacity: u64) -> bool {
    let load: u64 = stops.iter().map(|&v| graph.demand(v)).sum();
    load <= capacity
}

/// Cost of a single candidate route.
pub fn candidate_cost(route: &CandidateRoute, graph: &Graph) -> Option<u64> {
    route_cost(route.stops(), graph)
}

/// Total cost of an itinerary: the sum of its member routes' costs.
///
/// Returns `None` if any member route traverses a missing edge — an
/// itinerary containing an invalid route is itself invalid.
pub fn itinerary_cost(
    itinerary: &Itinerary,
    routes: &[CandidateRoute],
    graph: &Graph,
) -> Option<u64> {
    let mut total = 0u64;
    for &index in itinerary.route_indices() {
        total += route_cost(routes[index].stops(), graph)?;
    }
    Some(total)
}

/// Demand carried by a route (non-depot stops only).
pub fn route_load(stops: &[usize], graph: &Graph) -> u64 {
    stops
        .iter()
        .filter(|&&v| v != DEPOT)
        .map(|&v| graph.demand(v))
        .sum()
}
