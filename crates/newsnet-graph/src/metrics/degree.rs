//! Degree centrality.
//!
//! The fraction of the other people a person co-occurs with:
//! `degree(v) / (n - 1)`. Edge weights are ignored. A graph with a single
//! node scores that node 1.0.

use std::collections::HashMap;

use crate::graph::build::CooccurrenceGraph;

/// Normalized degree centrality per person name.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(g: &CooccurrenceGraph) -> HashMap<String, f64> {
    let n = g.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let others = n.saturating_sub(1) as f64;

    g.graph
        .node_indices()
        .filter_map(|v| {
            let name = g.name(v)?;
            let degree = g.graph.neighbors(v).count();
            let score = if n == 1 { 1.0 } else { degree as f64 / others };
            Some((name.to_string(), score))
        })
        .collect()
}
