//! Exhaustive enumeration of candidate routes and itineraries.
//!
//! Both stages follow the same discipline: generate in parallel in whatever
//! order the scheduler produces, then canonicalize by sorting and
//! deduplicating. Correctness rests on the final set, never on insertion
//! order.
//!
//! - [`generate_candidate_routes`] — all feasible depot-to-depot routes,
//!   found by slicing depot-headed permutations into windows
//! - [`enumerate_itineraries`] — all subsets of candidates that partition
//!   the customer set exactly
//! - [`DepotFixedPermutations`] — the underlying permutation iterator

mod itineraries;
mod permutations;
mod routes;

pub use itineraries::enumerate_itineraries;
pub use permutations::DepotFixedPermutations;
pub use routes::generate_candidate_routes;
