//! Single-threaded minimum search.

use super::SearchResult;
use crate::evaluation::itinerary_cost;
use crate::models::{CandidateRoute, Graph, Itinerary};

/// Scans the itinerary list once and returns the cheapest valid itinerary.
///
/// Itineraries containing a route with a missing edge are skipped. Returns
/// `None` when no itinerary is valid (the infeasible-instance case). Ties
/// resolve to the first minimum in scan order.
///
/// This is both the simplest back-end and the reference the parallel
/// back-ends are tested against.
pub fn sequential_min(
    itineraries: &[Itinerary],
    routes: &[CandidateRoute],
    graph: &Graph,
) -> Option<SearchResult> {
    let mut best: Option<SearchResult> = None;
    for itinerary in itineraries {
        let Some(cost) = itinerary_cost(itinerary, routes, graph) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| cost < b.cost) {
            best = Some(SearchResult {
                cost,
                itinerary: itinerary.clone(),
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Graph, Vec<CandidateRoute>, Vec<Itinerary>) {
        let mut g = Graph::new(4);
        g.set_demand(1, 4);
        g.set_demand(2, 5);
        g.set_demand(3, 6);
        for (u, v, c) in [(0, 1, 10), (0, 2, 10), (0, 3, 10), (1, 2, 5), (1, 3, 5), (2, 3, 5)] {
            g.set_cost(u, v, c);
            g.set_cost(v, u, c);
        }
        let routes = vec![
            CandidateRoute::from_customers(&[1]),       // 20
            CandidateRoute::from_customers(&[2]),       // 20
            CandidateRoute::from_customers(&[3]),       // 20
            CandidateRoute::from_customers(&[1, 2]),    // 25
            CandidateRoute::from_customers(&[1, 2, 3]), // 30
        ];
        let itineraries = vec![
            Itinerary::new(vec![0, 1, 2]), // 60
            Itinerary::new(vec![2, 3]),    // 45
            Itinerary::new(vec![4]),       // 30
        ];
        (g, routes, itineraries)
    }

    #[test]
    fn test_sequential_finds_minimum() {
        let (g, routes, itineraries) = fixture();
        let result = sequential_min(&itineraries, &routes, &g).expect("feasible");
        assert_eq!(result.cost, 30);
        assert_eq!(result.itinerary, Itinerary::new(vec![4]));
    }

    #[test]
    fn test_sequential_skips_invalid_itineraries() {
        let (mut g, routes, itineraries) = fixture();
        // Break the triple route: its last leg disappears.
        g.set_cost(3, 0, 0);
        let result = sequential_min(&itineraries, &routes, &g).expect("feasible");
        assert_eq!(result.cost, 45);
        assert_eq!(result.itinerary, Itinerary::new(vec![2, 3]));
    }

    #[test]
    fn test_sequential_infeasible() {
        let (g, routes, _) = fixture();
        assert!(sequential_min(&[], &routes, &g).is_none());

        let mut disconnected = Graph::new(4);
        disconnected.set_demand(1, 1);
        let itineraries = vec![Itinerary::new(vec![0, 1, 2])];
        assert!(sequential_min(&itineraries, &routes, &disconnected).is_none());
    }
}
