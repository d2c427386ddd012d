//! Candidate route type.

use serde::{Deserialize, Serialize};

use super::DEPOT;

/// A depot-to-depot stop sequence proposed as one vehicle's route.
///
/// The sequence always begins and ends at the depot. A *feasible* candidate
/// additionally has distinct non-depot customers in between, an existing
/// edge for every consecutive pair, and a demand sum within vehicle
/// capacity — those checks live in [`crate::evaluation`], not here: the
/// enumeration deliberately constructs some sequences that fail them (for
/// instance a window that picked up the depot itself) and lets the cost
/// check reject them.
///
/// Routes order by their stop sequence, so a collection of candidates is
/// canonicalized by sorting and deduplicating.
///
/// # Examples
///
/// ```
/// use cvrp_exact::models::CandidateRoute;
///
/// let route = CandidateRoute::from_customers(&[1, 2]);
/// assert_eq!(route.stops(), &[0, 1, 2, 0]);
/// assert_eq!(route.num_customers(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateRoute {
    stops: Vec<usize>,
}

impl CandidateRoute {
    /// Wraps a window of vertex indices with the depot on both ends.
    ///
    /// The window is taken as-is; it may contain the depot (such a route is
    /// rejected later by the edge-existence check, never here).
    pub fn from_window(window: &[usize]) -> Self {
        let mut stops = Vec::with_capacity(window.len() + 2);
        stops.push(DEPOT);
        stops.extend_from_slice(window);
        stops.push(DEPOT);
        Self { stops }
    }

    /// Builds a route visiting the given customers in order.
    ///
    /// Alias of [`CandidateRoute::from_window`] with intent in the name;
    /// used when the caller already knows the window holds only customers.
    pub fn from_customers(customers: &[usize]) -> Self {
        Self::from_window(customers)
    }

    /// Builds a route from a complete stop sequence (depot included).
    pub fn from_stops(stops: Vec<usize>) -> Self {
        Self { stops }
    }

    /// The full stop sequence, depot endpoints included.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// The interior of the sequence (everything between the depot endpoints).
    pub fn interior(&self) -> &[usize] {
        &self.stops[1..self.stops.len() - 1]
    }

    /// Number of interior stops.
    ///
    /// Counts depot occurrences inside malformed windows too; for feasible
    /// routes this equals the number of distinct customers visited.
    pub fn num_customers(&self) -> usize {
        self.stops.len().saturating_sub(2)
    }
}

impl std::fmt::Display for CandidateRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for stop in &self.stops {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{stop}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_customers() {
        let r = CandidateRoute::from_customers(&[3, 1]);
        assert_eq!(r.stops(), &[0, 3, 1, 0]);
        assert_eq!(r.interior(), &[3, 1]);
        assert_eq!(r.num_customers(), 2);
    }

    #[test]
    fn test_route_from_window_with_depot() {
        // Windows taken at the head of a permutation contain the depot;
        // construction must not reject them.
        let r = CandidateRoute::from_window(&[0, 1]);
        assert_eq!(r.stops(), &[0, 0, 1, 0]);
    }

    #[test]
    fn test_route_ordering_is_by_sequence() {
        let a = CandidateRoute::from_customers(&[1, 2]);
        let b = CandidateRoute::from_customers(&[2, 1]);
        assert!(a < b);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_route_sort_dedup() {
        let mut routes = vec![
            CandidateRoute::from_customers(&[2]),
            CandidateRoute::from_customers(&[1]),
            CandidateRoute::from_customers(&[2]),
        ];
        routes.sort_unstable();
        routes.dedup();
        assert_eq!(
            routes,
            vec![
                CandidateRoute::from_customers(&[1]),
                CandidateRoute::from_customers(&[2]),
            ]
        );
    }

    #[test]
    fn test_route_display() {
        let r = CandidateRoute::from_customers(&[1, 2]);
        assert_eq!(r.to_string(), "0 1 2 0");
    }
}
