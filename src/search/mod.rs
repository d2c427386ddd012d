//! Minimum-cost search over the enumerated itineraries.
//!
//! Three back-ends with identical reduction semantics:
//!
//! - [`sequential_min`] — one thread, one pass; the baseline
//! - [`parallel_min`] — chunked worker threads sharing a double-checked
//!   global best
//! - [`distributed_search`] — independent ranks owning interleaved shards,
//!   joined by a collective reduce-to-minimum that carries only the scalar
//!   cost to the root

mod distributed;
mod parallel;
mod sequential;

pub use distributed::{
    channel_world, distributed_search, ChannelCollective, Collective, DistributedOutcome,
    RankOutcome, ROOT,
};
pub use parallel::parallel_min;
pub use sequential::sequential_min;

use crate::models::Itinerary;

/// The winning itinerary of a search, with its total cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Total travel cost over the itinerary's member routes.
    pub cost: u64,
    /// The itinerary achieving that cost.
    pub itinerary: Itinerary,
}
