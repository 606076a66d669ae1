//! Whole-graph statistics for the co-occurrence graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the graph.
//! - **density**: `2m / (n(n-1))` for an undirected graph. Zero for graphs
//!   with fewer than two nodes.
//! - **transitivity**: global clustering coefficient,
//!   `3 * triangles / connected triples`. Zero when there are no triangles.
//! - **average_degree**: `2m / n`.
//! - **max_degree**: highest number of distinct co-occurring people.
//! - **component_count**: connected components.
//! - **total_weight**: sum of all edge weights.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::CooccurrenceGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a co-occurrence graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub transitivity: f64,
    pub average_degree: f64,
    pub max_degree: usize,
    pub component_count: usize,
    pub total_weight: u128,
}

impl GraphStats {
    /// Compute statistics from a [`CooccurrenceGraph`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_graph(g: &CooccurrenceGraph) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let max_degree = g
            .graph
            .node_indices()
            .map(|v| g.graph.neighbors(v).count())
            .max()
            .unwrap_or(0);

        let average_degree = if node_count == 0 {
            0.0
        } else {
            2.0 * edge_count as f64 / node_count as f64
        };

        Self {
            node_count,
            edge_count,
            density: density(g),
            transitivity: transitivity(g),
            average_degree,
            max_degree,
            component_count: connected_components(&g.graph),
            total_weight: g.graph.edge_weights().map(|w| u128::from(*w)).sum(),
        }
    }

    /// Return `true` if the graph has no edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

/// Undirected graph density `2m / (n(n-1))`.
#[must_use]
pub fn density(g: &CooccurrenceGraph) -> f64 {
    compute_density(g.node_count(), g.edge_count())
}

/// Global clustering coefficient `3 * triangles / connected triples`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn transitivity(g: &CooccurrenceGraph) -> f64 {
    let adj = g.adjacency();
    let n = adj.len();

    // Per node v: `closed` gains 2 * (triangles through v) and `triples`
    // gains d(d-1). Summed, the ratio is 3 * triangles / connected triples.
    let mut closed: u64 = 0;
    let mut triples: u64 = 0;
    let mut mark = vec![false; n];

    for nbrs in &adj {
        let d = nbrs.len() as u64;
        triples += d * d.saturating_sub(1);

        for &u in nbrs {
            mark[u] = true;
        }
        for &u in nbrs {
            closed += adj[u].iter().filter(|&&w| mark[w]).count() as u64;
        }
        for &u in nbrs {
            mark[u] = false;
        }
    }

    if closed == 0 || triples == 0 {
        0.0
    } else {
        closed as f64 / triples as f64
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let n = node_count as f64;
    2.0 * edge_count as f64 / (n * (n - 1.0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
