//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a person lies on shortest
//! paths between two other people. High-betweenness people are brokers:
//! they connect groups that otherwise rarely appear together.
//!
//! # Algorithm
//!
//! Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! Edge weights are co-occurrence counts, not distances, so every edge
//! counts as one hop.
//!
//! # Normalization
//!
//! Every source is visited, so each unordered pair `{s, t}` is accumulated
//! twice. Dividing by `(n-1)(n-2)` therefore gives the fraction of the
//! `C(n-1, 2)` pairs not involving `v` whose shortest paths run through `v`.
//! Graphs with two or fewer nodes score zero everywhere.

use std::collections::{HashMap, VecDeque};

use tracing::instrument;

use crate::graph::build::CooccurrenceGraph;

/// Compute normalized betweenness centrality for every person.
///
/// # Returns
///
/// A `HashMap<String, f64>` mapping each name to a score in `[0, 1]`.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(g: &CooccurrenceGraph) -> HashMap<String, f64> {
    let raw = raw_betweenness(&g.adjacency());
    let n = raw.len();

    let pairs = (n.saturating_sub(1) * n.saturating_sub(2)) as f64;
    let normalize = |x: f64| if n <= 2 { 0.0 } else { x / pairs };

    g.graph
        .node_indices()
        .filter_map(|v| Some((g.name(v)?.to_string(), normalize(raw[v.index()]))))
        .collect()
}

/// Unnormalized Brandes accumulation over an undirected adjacency list.
fn raw_betweenness(adj: &[Vec<usize>]) -> Vec<f64> {
    let n = adj.len();
    let mut cb: Vec<f64> = vec![0.0; n];

    // Buffers reused across sources.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for s in 0..n {
        stack.clear();
        for p in &mut predecessors {
            p.clear();
        }
        sigma.fill(0.0);
        dist.fill(-1);
        delta.fill(0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in &adj[v] {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
