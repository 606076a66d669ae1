//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores a person by the scores of the people they
//! co-occur with: being mentioned alongside central figures matters more
//! than being mentioned alongside many peripheral ones. The scores are the
//! dominant eigenvector of the adjacency matrix.
//!
//! # Algorithm
//!
//! Power iteration on `A + I`:
//!
//! 1. Initialize every score to `1/n`.
//! 2. `x'(v) = x(v) + sum of w(u, v) * x(u)` over neighbours `u`, where
//!    `w` is 1, or the co-occurrence count in weighted mode.
//! 3. Normalize `x'` to unit L2 norm.
//! 4. Stop once the L1 change `sum |x'(v) - x(v)|` drops below
//!    `n * tolerance`.
//!
//! Adding the identity shifts every eigenvalue by one without changing the
//! eigenvectors, which keeps bipartite graphs (stars, paths) from
//! oscillating between two vectors.
//!
//! Running out of iterations is an error rather than a silently
//! half-converged answer.

use std::collections::HashMap;

use newsnet_core::NetworkError;
use newsnet_core::config::EigenvectorConfig;
use newsnet_core::error::Result;
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument, warn};

use crate::graph::build::CooccurrenceGraph;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores: person name → score.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// Compute eigenvector centrality for every person in the graph.
///
/// An empty graph yields an empty result after zero iterations.
///
/// # Errors
///
/// Returns [`NetworkError::Convergence`] if the scores have not settled
/// within `config.max_iterations` iterations.
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(
    g: &CooccurrenceGraph,
    config: &EigenvectorConfig,
) -> Result<EigenvectorResult> {
    let n = g.node_count();

    if n == 0 {
        return Ok(EigenvectorResult {
            scores: HashMap::new(),
            iterations: 0,
        });
    }

    // Weighted adjacency lists: (neighbour index, weight).
    let neighbors: Vec<Vec<(usize, f64)>> = g
        .graph
        .node_indices()
        .map(|v| {
            g.graph
                .edges(v)
                .map(|e| {
                    let u = if e.source() == v { e.target() } else { e.source() };
                    let w = if config.weighted { *e.weight() as f64 } else { 1.0 };
                    (u.index(), w)
                })
                .collect()
        })
        .collect();

    let threshold = n as f64 * config.tolerance;
    let mut scores: Vec<f64> = vec![1.0 / n as f64; n];
    let mut next: Vec<f64> = vec![0.0; n];

    for iter in 0..config.max_iterations {
        // Start from x to iterate with A + I.
        next.copy_from_slice(&scores);
        for (v, nbrs) in neighbors.iter().enumerate() {
            for &(u, w) in nbrs {
                next[u] += scores[v] * w;
            }
        }

        // Normalize to unit L2 norm.
        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut next {
                *x /= norm;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(&next)
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next);

        if diff < threshold {
            debug!(iterations = iter + 1, diff, "eigenvector centrality converged");
            return Ok(EigenvectorResult {
                scores: g
                    .graph
                    .node_indices()
                    .filter_map(|v| Some((g.name(v)?.to_string(), scores[v.index()])))
                    .collect(),
                iterations: iter + 1,
            });
        }
    }

    warn!(
        max_iterations = config.max_iterations,
        tolerance = config.tolerance,
        "eigenvector centrality did not converge"
    );
    Err(NetworkError::Convergence {
        max_iterations: config.max_iterations,
        tolerance: config.tolerance,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
