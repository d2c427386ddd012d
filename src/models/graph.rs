//! Directed cost graph with per-vertex demands.

use serde::{Deserialize, Serialize};

/// The depot vertex. Every route starts and ends here.
pub const DEPOT: usize = 0;

/// A routing instance: a directed integer cost matrix plus a demand vector.
///
/// Vertices are indexed `0..size`, with vertex `0` as the depot. The cost
/// matrix is dense and row-major. A cost of `0` is the sentinel for "no
/// direct edge" — it is never a legitimately free edge. Demands are
/// per-vertex, with the depot's demand fixed at `0` by convention.
///
/// The graph is loaded once and treated as immutable for the duration of a
/// solve.
///
/// # Examples
///
/// ```
/// use cvrp_exact::models::Graph;
///
/// let mut graph = Graph::new(3);
/// graph.set_demand(1, 4);
/// graph.set_demand(2, 5);
/// graph.set_cost(0, 1, 10);
/// graph.set_cost(1, 0, 10);
///
/// assert_eq!(graph.cost(0, 1), 10);
/// assert_eq!(graph.cost(0, 2), 0); // no edge
/// assert_eq!(graph.num_customers(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    size: usize,
    costs: Vec<u64>,
    demands: Vec<u64>,
}

impl Graph {
    /// Creates a graph with the given vertex count, no edges, zero demands.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            costs: vec![0; size * size],
            demands: vec![0; size],
        }
    }

    /// Builds a graph from an explicit cost matrix and demand vector.
    ///
    /// Returns `None` if `costs` is not `size * size` long or `demands` is
    /// not `size` long.
    pub fn from_parts(size: usize, costs: Vec<u64>, demands: Vec<u64>) -> Option<Self> {
        if costs.len() != size * size || demands.len() != size {
            return None;
        }
        Some(Self { size, costs, demands })
    }

    /// Returns the cost of the directed edge `from → to`.
    ///
    /// `0` means the edge is absent.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn cost(&self, from: usize, to: usize) -> u64 {
        self.costs[from * self.size + to]
    }

    /// Sets the cost of the directed edge `from → to`.
    pub fn set_cost(&mut self, from: usize, to: usize, cost: u64) {
        self.costs[from * self.size + to] = cost;
    }

    /// Demand at the given vertex.
    pub fn demand(&self, vertex: usize) -> u64 {
        self.demands[vertex]
    }

    /// Sets the demand at the given vertex.
    pub fn set_demand(&mut self, vertex: usize, demand: u64) {
        self.demands[vertex] = demand;
    }

    /// Number of vertices, including the depot.
    pub fn num_vertices(&self) -> usize {
        self.size
    }

    /// Number of customers (all vertices except the depot).
    pub fn num_customers(&self) -> usize {
        self.size.saturating_sub(1)
    }

    /// Iterates the customer vertex indices `1..size`.
    pub fn customers(&self) -> impl Iterator<Item = usize> {
        1..self.size
    }
}
