//! Rank-sharded distributed minimum search.
//!
//! Workers are ranks `0..world_size` with no shared memory between them:
//! rank `r` owns itinerary indices `r, r + world_size, r + 2*world_size, …`,
//! computes its local minimum with the thread-parallel search, and then
//! joins a collective reduce-to-minimum. Only the scalar minimum cost
//! travels through the reduction, so the root rank learns *what* the global
//! minimum costs but not *which* itinerary achieves it — that outcome is
//! reported as [`DistributedOutcome::WinnerUnknown`] rather than pretending
//! an empty itinerary were the answer. Recovering the winner would take a
//! second pass (re-broadcast the cost, have the owning rank answer) and is
//! deliberately not done here.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use tracing::debug;

use super::parallel::{min_over_shard, with_pool};
use crate::models::{CandidateRoute, Graph, Itinerary};

/// The rank that receives the reduced result.
pub const ROOT: usize = 0;

/// What a rank knows after the collective reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankOutcome {
    /// This rank is the root; the payload is the global minimum cost, or
    /// `None` when no rank found a valid itinerary.
    Root(Option<u64>),
    /// This rank contributed its local minimum; the result lives at the root.
    Worker,
}

/// Result of a distributed search, as seen by one rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributedOutcome {
    /// Root: the global minimum cost is known, the winning itinerary is not
    /// (the reduction carries only the scalar cost).
    WinnerUnknown {
        /// Global minimum total cost.
        cost: u64,
    },
    /// Root: no rank found any valid itinerary.
    Infeasible,
    /// A non-root rank; the reduced result was delivered to the root.
    NonRoot,
}

/// Collective operations between the ranks of one distributed run.
///
/// Implementations carry the transport; the search only needs its own rank,
/// the world size, and a blocking minimum reduction.
pub trait Collective {
    /// This participant's rank, `0..world_size`.
    fn rank(&self) -> usize;

    /// Total number of participating ranks.
    fn world_size(&self) -> usize;

    /// Reduces every rank's local minimum to a global minimum at [`ROOT`].
    ///
    /// `None` stands for "no valid itinerary in my shard". Blocks until
    /// every rank has reported.
    fn reduce_min(&self, local: Option<u64>) -> RankOutcome;
}

/// Channel-backed [`Collective`] for ranks running inside one process.
///
/// Ranks exchange only messages, mirroring a no-shared-memory deployment:
/// workers send `(rank, local minimum)` reports to the root, and the root
/// answers with a release message once every report is in, so the
/// reduction is a full barrier for all participants.
///
/// # Panics
///
/// The collective panics if a rank disappears mid-reduction (a
/// disconnected channel). A distributed run has no partial-failure
/// recovery: one lost worker invalidates the whole computation.
pub struct ChannelCollective {
    rank: usize,
    world_size: usize,
    report_tx: Sender<(usize, Option<u64>)>,
    report_rx: Option<Receiver<(usize, Option<u64>)>>,
    release_rx: Option<Receiver<()>>,
    release_txs: Vec<Sender<()>>,
}

/// Builds a connected world of `world_size` channel collectives, one per
/// rank, with rank `0` as the root.
///
/// # Panics
///
/// Panics if `world_size` is zero.
pub fn channel_world(world_size: usize) -> Vec<ChannelCollective> {
    assert!(world_size > 0, "a world needs at least one rank");

    let (report_tx, report_rx) = unbounded();
    let mut releases: Vec<(Sender<()>, Receiver<()>)> =
        (0..world_size).map(|_| bounded(1)).collect();

    let mut world = Vec::with_capacity(world_size);
    let mut report_rx = Some(report_rx);
    let release_txs: Vec<Sender<()>> =
        releases.iter().skip(1).map(|(tx, _)| tx.clone()).collect();

    for rank in 0..world_size {
        let (_, release_rx) = std::mem::replace(&mut releases[rank], bounded(1));
        world.push(ChannelCollective {
            rank,
            world_size,
            report_tx: report_tx.clone(),
            report_rx: if rank == ROOT { report_rx.take() } else { None },
            release_rx: if rank == ROOT { None } else { Some(release_rx) },
            release_txs: if rank == ROOT { release_txs.clone() } else { Vec::new() },
        });
    }
    world
}

impl Collective for ChannelCollective {
    fn rank(&self) -> usize {
        self.rank
    }

    fn world_size(&self) -> usize {
        self.world_size
    }

    fn reduce_min(&self, local: Option<u64>) -> RankOutcome {
        if self.rank == ROOT {
            let mut global = local;
            let reports = self
                .report_rx
                .as_ref()
                .expect("root holds the report receiver");
            for _ in 1..self.world_size {
                let (rank, value) = reports
                    .recv()
                    .expect("a rank disconnected during the reduction");
                debug!("rank {} reported local minimum {:?}", rank, value);
                global = merge_min(global, value);
            }
            for release in &self.release_txs {
                release
                    .send(())
                    .expect("a rank disconnected during the release");
            }
            RankOutcome::Root(global)
        } else {
            self.report_tx
                .send((self.rank, local))
                .expect("the root disconnected during the reduction");
            self.release_rx
                .as_ref()
                .expect("workers hold a release receiver")
                .recv()
                .expect("the root disconnected during the release");
            RankOutcome::Worker
        }
    }
}

fn merge_min(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Runs this rank's share of the distributed minimum search.
///
/// Every rank is expected to hold the same deterministic itinerary list
/// (enumeration is reproducible, so each rank generates it independently).
/// The rank evaluates its interleaved shard thread-parallel, then all ranks
/// reduce their local minima; the root maps the reduced value onto a
/// [`DistributedOutcome`].
pub fn distributed_search<C: Collective>(
    itineraries: &[Itinerary],
    routes: &[CandidateRoute],
    graph: &Graph,
    collective: &C,
    threads: Option<usize>,
) -> DistributedOutcome {
    let rank = collective.rank();
    let world_size = collective.world_size();

    let local = with_pool(threads, || {
        let shard: Vec<&Itinerary> = itineraries
            .iter()
            .skip(rank)
            .step_by(world_size)
            .collect();
        min_over_shard(&shard, routes, graph).map(|(cost, _)| cost)
    });
    debug!("rank {} local minimum {:?}", rank, local);

    match collective.reduce_min(local) {
        RankOutcome::Root(Some(cost)) => DistributedOutcome::WinnerUnknown { cost },
        RankOutcome::Root(None) => DistributedOutcome::Infeasible,
        RankOutcome::Worker => DistributedOutcome::NonRoot,
    }
}
