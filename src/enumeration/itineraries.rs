//! Itinerary enumeration.

use rayon::prelude::*;
use tracing::debug;

use crate::models::{CandidateRoute, Itinerary};

/// Enumerates every itinerary that perfectly partitions the customers.
///
/// For every target subset size from `1` to the number of candidates,
/// combinations of candidate indices are generated recursively (each chosen
/// index strictly greater than the previous, so every subset appears
/// exactly once). The partition invariant — no customer covered twice, all
/// customers covered — is checked only once a combination reaches its
/// target size; partial combinations are never pruned early, so conflicting
/// prefixes are still extended and rejected at full depth.
///
/// Target sizes are processed in parallel, each task owning its own prefix
/// buffer; the merged result is sorted and deduplicated so the output set
/// does not depend on task interleaving.
///
/// # Examples
///
/// ```
/// use cvrp_exact::enumeration::enumerate_itineraries;
/// use cvrp_exact::models::CandidateRoute;
///
/// let routes = vec![
///     CandidateRoute::from_customers(&[1]),
///     CandidateRoute::from_customers(&[2]),
///     CandidateRoute::from_customers(&[1, 2]),
/// ];
/// let itineraries = enumerate_itineraries(&routes, 3);
/// // Either both singles, or the pair route alone.
/// assert_eq!(itineraries.len(), 2);
/// ```
pub fn enumerate_itineraries(
    routes: &[CandidateRoute],
    num_vertices: usize,
) -> Vec<Itinerary> {
    let mut itineraries: Vec<Itinerary> = (1..=routes.len())
        .into_par_iter()
        .flat_map_iter(|target_size| {
            let mut found = Vec::new();
            let mut prefix = Vec::with_capacity(target_size);
            extend_combination(routes, num_vertices, target_size, 0, &mut prefix, &mut found);
            found
        })
        .collect();

    itineraries.sort_unstable();
    itineraries.dedup();
    debug!("{} itineraries enumerated", itineraries.len());
    itineraries
}

fn extend_combination(
    routes: &[CandidateRoute],
    num_vertices: usize,
    target_size: usize,
    start: usize,
    prefix: &mut Vec<usize>,
    found: &mut Vec<Itinerary>,
) {
    if prefix.len() == target_size {
        let candidate = Itinerary::new(prefix.clone());
        if candidate.covers_all_customers(routes, num_vertices) {
            found.push(candidate);
        }
        return;
    }

    for index in start..routes.len() {
        prefix.push(index);
        extend_combination(routes, num_vertices, target_size, index + 1, prefix, found);
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Candidate list for a 4-vertex instance: three singles, one pair, one triple.
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
    fn test_enumerates_all_partitions() {
        let itineraries = enumerate_itineraries(&routes(), 4);
        // {0,1,2}, {2,3}, {4}
        assert_eq!(itineraries.len(), 3);
        assert!(itineraries.contains(&Itinerary::new(vec![0, 1, 2])));
        assert!(itineraries.contains(&Itinerary::new(vec![2, 3])));
        assert!(itineraries.contains(&Itinerary::new(vec![4])));
    }

    #[test]
    fn test_every_itinerary_is_a_partition() {
        let routes = routes();
        for itinerary in enumerate_itineraries(&routes, 4) {
            assert!(itinerary.covers_all_customers(&routes, 4));
        }
    }

    #[test]
    fn test_indices_strictly_increasing() {
        for itinerary in enumerate_itineraries(&routes(), 4) {
            let indices = itinerary.route_indices();
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_sorted_and_deduplicated() {
        let itineraries = enumerate_itineraries(&routes(), 4);
        let mut canonical = itineraries.clone();
        canonical.sort_unstable();
        canonical.dedup();
        assert_eq!(itineraries, canonical);
    }

    #[test]
    fn test_idempotent_across_runs() {
        let routes = routes();
        assert_eq!(
            enumerate_itineraries(&routes, 4),
            enumerate_itineraries(&routes, 4)
        );
    }

    #[test]
    fn test_no_candidates_no_itineraries() {
        assert!(enumerate_itineraries(&[], 4).is_empty());
    }

    #[test]
    fn test_uncoverable_customer_means_no_itineraries() {
        // Customer 3 appears in no candidate route.
        let routes = vec![
            CandidateRoute::from_customers(&[1]),
            CandidateRoute::from_customers(&[2]),
        ];
        assert!(enumerate_itineraries(&routes, 4).is_empty());
    }
}
