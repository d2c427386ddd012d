//! Thread-parallel minimum search.

use std::sync::Mutex;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::debug;

use super::SearchResult;
use crate::evaluation::itinerary_cost;
use crate::models::{CandidateRoute, Graph, Itinerary};

/// Finds the cheapest valid itinerary using worker threads.
///
/// The itinerary list is split into chunks claimed dynamically by the
/// worker threads. Every worker keeps a private running minimum and only
/// touches the shared best when a candidate beats that private minimum; the
/// shared best is then re-compared and updated inside one critical section,
/// so the comparison and the write cannot be torn apart by another worker
/// publishing in between. The shared accumulator lives entirely inside this
/// call — nothing survives it.
///
/// `threads` pins the worker count (useful for reproducing scheduling
/// behavior); `None` uses the global thread pool.
pub fn parallel_min(
    itineraries: &[Itinerary],
    routes: &[CandidateRoute],
    graph: &Graph,
    threads: Option<usize>,
) -> Option<SearchResult> {
    with_pool(threads, || {
        let shard: Vec<&Itinerary> = itineraries.iter().collect();
        min_over_shard(&shard, routes, graph).map(|(cost, itinerary)| SearchResult {
            cost,
            itinerary: itinerary.clone(),
        })
    })
}

/// Runs `body` on a dedicated pool of `threads` workers, or inline on the
/// global pool when no count is given.
pub(crate) fn with_pool<R: Send>(
    threads: Option<usize>,
    body: impl FnOnce() -> R + Send,
) -> R {
    match threads {
        Some(count) => ThreadPoolBuilder::new()
            .num_threads(count)
            .build()
            .expect("cannot build a thread pool")
            .install(body),
        None => body(),
    }
}

/// Chunked parallel minimum over an arbitrary slice of itinerary
/// references. Shared by the full-list search and the per-rank shards of
/// the distributed search.
pub(crate) fn min_over_shard<'a>(
    shard: &[&'a Itinerary],
    routes: &[CandidateRoute],
    graph: &Graph,
) -> Option<(u64, &'a Itinerary)> {
    if shard.is_empty() {
        return None;
    }

    let global: Mutex<Option<(u64, &Itinerary)>> = Mutex::new(None);
    let chunk = chunk_size(shard.len());

    shard.par_chunks(chunk).for_each(|chunk_items| {
        let mut local_best: Option<(u64, &Itinerary)> = None;
        for &itinerary in chunk_items {
            let Some(cost) = itinerary_cost(itinerary, routes, graph) else {
                continue;
            };
            if local_best.map_or(true, |(c, _)| cost < c) {
                local_best = Some((cost, itinerary));
                let mut best = global.lock().expect("shared best lock poisoned");
                // Re-check inside the critical section: another worker may
                // have published a better cost since the local comparison.
                if best.as_ref().map_or(true, |&(c, _)| cost < c) {
                    *best = Some((cost, itinerary));
                }
            }
        }
    });

    let result = global.into_inner().expect("shared best lock poisoned");
    if let Some((cost, _)) = result {
        debug!("parallel search minimum {} over {} itineraries", cost, shard.len());
    }
    result
}

fn chunk_size(len: usize) -> usize {
    // Several chunks per worker keeps the scheduling dynamic without
    // hammering the shared lock.
    usize::max(1, len / (rayon::current_num_threads() * 4))
}
