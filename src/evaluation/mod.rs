//! Cost evaluation and feasibility checking.
//!
//! Pure functions over the instance graph: per-route edge-cost summation
//! with the zero-cost absence sentinel, capacity checking, and itinerary
//! cost aggregation. All of them are side-effect-free and safe to call
//! concurrently without synchronization.

mod evaluator;

pub use evaluator::{
    candidate_cost, itinerary_cost, respects_capacity, route_cost, route_load,
};
