//! Candidate route generation.

use std::sync::Mutex;

use rayon::prelude::*;
use tracing::debug;

use super::DepotFixedPermutations;
use crate::evaluation::{respects_capacity, route_cost};
use crate::models::{CandidateRoute, Graph};

/// Generates the deduplicated set of all feasible candidate routes.
///
/// Window sizes run from `1` to `max_stops_per_route - 2` (a route of `k`
/// customers occupies `k + 2` stops once the depot endpoints are counted).
/// For each size, every contiguous window of every depot-headed permutation
/// is wrapped with the depot and kept iff every edge exists and the demand
/// sum fits `capacity`. The window that overlaps the fixed depot position
/// yields a sequence visiting the depot twice; the zero-cost depot
/// self-loop makes `route_cost` reject it, so no special-casing happens
/// here. Windows at the tail of a sequence can be shorter than the target
/// size; they duplicate routes of smaller sizes and are absorbed by
/// deduplication.
///
/// The result is sorted and deduplicated after every pass, so the output is
/// a canonical set — identical regardless of how many threads evaluated the
/// permutations or in which order insertions landed.
///
/// # Examples
///
/// ```
/// use cvrp_exact::enumeration::generate_candidate_routes;
/// use cvrp_exact::models::{CandidateRoute, Graph};
///
/// let mut graph = Graph::new(3);
/// graph.set_demand(1, 2);
/// graph.set_demand(2, 3);
/// for (u, v) in [(0, 1), (1, 0), (0, 2), (2, 0), (1, 2), (2, 1)] {
///     graph.set_cost(u, v, 1);
/// }
///
/// let routes = generate_candidate_routes(&graph, 10, 5);
/// assert!(routes.contains(&CandidateRoute::from_customers(&[1])));
/// assert!(routes.contains(&CandidateRoute::from_customers(&[1, 2])));
/// ```
pub fn generate_candidate_routes(
    graph: &Graph,
    capacity: u64,
    max_stops_per_route: usize,
) -> Vec<CandidateRoute> {
    let mut master = Vec::new();
    let largest_window = max_stops_per_route.saturating_sub(2);
    for window_size in 1..=largest_window {
        extend_with_window_size(graph, capacity, window_size, &mut master);
        debug!(
            "{} candidate routes after window size {}",
            master.len(),
            window_size
        );
    }
    master
}

/// One generation pass: all windows of one size, accumulated into `master`.
///
/// Permutations are materialized once and evaluated in parallel; feasible
/// routes are inserted under a lock with a membership test, then the whole
/// accumulated list is sorted and deduplicated so insertion order cannot
/// leak into the result.
fn extend_with_window_size(
    graph: &Graph,
    capacity: u64,
    window_size: usize,
    master: &mut Vec<CandidateRoute>,
) {
    let permutations: Vec<Vec<usize>> =
        DepotFixedPermutations::new(graph.num_vertices()).collect();

    let shared = Mutex::new(std::mem::take(master));

    permutations.par_iter().for_each(|sequence| {
        let len = sequence.len();
        for start in 0..len {
            let end = usize::min(start + window_size, len);
            let route = CandidateRoute::from_window(&sequence[start..end]);
            if route_cost(route.stops(), graph).is_some()
                && respects_capacity(route.stops(), graph, capacity)
            {
                let mut found = shared.lock().expect("candidate list lock poisoned");
                if !found.contains(&route) {
                    found.push(route);
                }
            }
        }
    });

    let mut found = shared.into_inner().expect("candidate list lock poisoned");
    found.sort_unstable();
    found.dedup();
    *master = found;
}
