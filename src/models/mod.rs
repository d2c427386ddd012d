//! Domain model types for the exact CVRP engine.
//!
//! Provides the core data: the instance graph (directed integer cost matrix
//! plus demands), candidate depot-to-depot routes, itineraries selecting a
//! set of candidate routes, and the concrete route plan a solve returns.

mod graph;
mod itinerary;
mod plan;
mod route;

pub use graph::{Graph, DEPOT};
pub use itinerary::Itinerary;
pub use plan::RoutePlan;
pub use route::CandidateRoute;
