//! Itinerary type.

use serde::{Deserialize, Serialize};

use super::{CandidateRoute, DEPOT};

/// A selection of candidate routes proposed as a complete delivery plan.
///
/// Stored as indices into the candidate-route list, in strictly increasing
/// order (the canonical form of a combination — each subset of candidates
/// has exactly one representation). A *valid* itinerary covers every
/// customer exactly once across its member routes; that partition check is
/// [`Itinerary::covers_all_customers`], applied by the enumeration at full
/// subset depth.
///
/// # Examples
///
/// ```
/// use cvrp_exact::models::{CandidateRoute, Itinerary};
///
/// let routes = vec![
///     CandidateRoute::from_customers(&[1, 2]),
///     CandidateRoute::from_customers(&[3]),
/// ];
/// let itinerary = Itinerary::new(vec![0, 1]);
/// assert!(itinerary.covers_all_customers(&routes, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Itinerary {
    route_indices: Vec<usize>,
}

impl Itinerary {
    /// Creates an itinerary from candidate-route indices.
    pub fn new(route_indices: Vec<usize>) -> Self {
        Self { route_indices }
    }

    /// Indices into the candidate-route list.
    pub fn route_indices(&self) -> &[usize] {
        &self.route_indices
    }

    /// Number of member routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.route_indices.len()
    }

    /// Resolves the member indices against the candidate list.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for `routes`.
    pub fn resolve<'a>(&self, routes: &'a [CandidateRoute]) -> Vec<&'a CandidateRoute> {
        self.route_indices.iter().map(|&i| &routes[i]).collect()
    }

    /// Checks the perfect-partition invariant against `num_vertices`.
    ///
    /// True iff no non-depot vertex appears twice across the member routes
    /// and the number of distinct covered vertices equals the customer
    /// count (`num_vertices - 1`). Depot occurrences are skipped.
    pub fn covers_all_customers(&self, routes: &[CandidateRoute], num_vertices: usize) -> bool {
        let mut visited = vec![false; num_vertices];
        let mut covered = 0usize;
        for &index in &self.route_indices {
            for &stop in routes[index].stops() {
                if stop == DEPOT {
                    continue;
                }
                if visited[stop] {
                    return false;
                }
                visited[stop] = true;
                covered += 1;
            }
        }
        covered == num_vertices - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> Vec<CandidateRoute> {
        vec![
            CandidateRoute::from_customers(&[1]),
            CandidateRoute::from_customers(&[2]),
            CandidateRoute::from_customers(&[3]),
            CandidateRoute::from_customers(&[1, 2]),
            CandidateRoute::from_customers(&[1, 2, 3]),
        ]
    }

    #[test]
    fn test_itinerary_perfect_partition() {
        let routes = routes();
        assert!(Itinerary::new(vec![0, 1, 2]).covers_all_customers(&routes, 4));
        assert!(Itinerary::new(vec![2, 3]).covers_all_customers(&routes, 4));
        assert!(Itinerary::new(vec![4]).covers_all_customers(&routes, 4));
    }

    #[test]
    fn test_itinerary_overlap_rejected() {
        let routes = routes();
        // Customer 1 appears in both members.
        assert!(!Itinerary::new(vec![0, 3]).covers_all_customers(&routes, 4));
    }

    #[test]
    fn test_itinerary_incomplete_rejected() {
        let routes = routes();
        // Customer 3 is never visited.
        assert!(!Itinerary::new(vec![3]).covers_all_customers(&routes, 4));
        assert!(!Itinerary::new(vec![0, 1]).covers_all_customers(&routes, 4));
    }

    #[test]
    fn test_itinerary_resolve() {
        let routes = routes();
        let it = Itinerary::new(vec![2, 3]);
        let resolved = it.resolve(&routes);
        assert_eq!(resolved[0].stops(), &[0, 3, 0]);
        assert_eq!(resolved[1].stops(), &[0, 1, 2, 0]);
    }

    #[test]
    fn test_itinerary_ordering() {
        let a = Itinerary::new(vec![0, 2]);
        let b = Itinerary::new(vec![0, 3]);
        assert!(a < b);
    }
}
