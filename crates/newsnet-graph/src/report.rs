//! Network summary report (`network_information.txt`).
//!
//! Collects the whole-graph statistics and the top-N people per centrality
//! measure into one value that renders as plain text for the report file
//! and serializes to JSON for machine consumers.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use newsnet_core::NetworkError;
use newsnet_core::csvio::ensure_parent_dir;
use newsnet_core::error::Result;
use serde::Serialize;
use tracing::{info, instrument};

use crate::centrality::{CentralityTable, Measure};
use crate::graph::build::CooccurrenceGraph;
use crate::graph::stats::GraphStats;

/// One entry of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub node: String,
    pub score: f64,
}

/// Top-N ranking for one measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub measure: &'static str,
    pub nodes: Vec<RankedNode>,
}

/// Everything `network_information.txt` reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub generated_at: DateTime<Utc>,
    pub cutoff: u64,
    pub content_hash: String,
    #[serde(flatten)]
    pub stats: GraphStats,
    pub top_n: usize,
    pub rankings: Vec<Ranking>,
}

/// Build the summary for a graph and its centrality table.
///
/// An empty graph gives zero statistics and empty rankings.
#[must_use]
#[instrument(skip(g, table), fields(nodes = g.node_count()))]
pub fn summarize(
    g: &CooccurrenceGraph,
    table: &CentralityTable,
    cutoff: u64,
    top_n: usize,
) -> NetworkSummary {
    let rankings = Measure::ALL
        .iter()
        .map(|&measure| Ranking {
            measure: measure.key(),
            nodes: table
                .top(measure, top_n)
                .into_iter()
                .map(|row| RankedNode {
                    node: row.node.clone(),
                    score: measure.value(row),
                })
                .collect(),
        })
        .collect();

    NetworkSummary {
        generated_at: Utc::now(),
        cutoff,
        content_hash: g.content_hash.clone(),
        stats: GraphStats::from_graph(g),
        top_n,
        rankings,
    }
}

impl NetworkSummary {
    /// Plain-text rendering written to `network_information.txt`.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let s = &self.stats;

        let _ = writeln!(out, "Network information");
        let _ = writeln!(out, "===================");
        let _ = writeln!(out, "Generated: {}", self.generated_at.to_rfc3339());
        let _ = writeln!(out, "Edge weight cutoff: > {}", self.cutoff);
        let _ = writeln!(out, "Edge set hash: {}", self.content_hash);
        let _ = writeln!(out);
        let _ = writeln!(out, "Nodes: {}", s.node_count);
        let _ = writeln!(out, "Edges: {}", s.edge_count);
        let _ = writeln!(out, "Total edge weight: {}", s.total_weight);
        let _ = writeln!(out, "Density: {:.6}", s.density);
        let _ = writeln!(out, "Transitivity: {:.6}", s.transitivity);
        let _ = writeln!(out, "Average degree: {:.4}", s.average_degree);
        let _ = writeln!(out, "Maximum degree: {}", s.max_degree);
        let _ = writeln!(out, "Connected components: {}", s.component_count);

        for ranking in &self.rankings {
            let label = Measure::ALL
                .iter()
                .find(|m| m.key() == ranking.measure)
                .map_or(ranking.measure, |m| m.label());
            let _ = writeln!(out);
            let _ = writeln!(out, "Top {} by {}:", self.top_n, label);
            if ranking.nodes.is_empty() {
                let _ = writeln!(out, "  (none)");
            }
            for (rank, entry) in ranking.nodes.iter().enumerate() {
                let _ = writeln!(out, "  {:>2}. {} ({:.6})", rank + 1, entry.node, entry.score);
            }
        }

        out
    }

    /// Write [`Self::to_text`] to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Write`] if the file cannot be written.
    pub fn write_text(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        fs::write(path, self.to_text()).map_err(|source| NetworkError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "network summary written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::compute_centrality;
    use newsnet_core::WeightedEdge;
    use newsnet_core::config::EigenvectorConfig;

    fn summary_for(edges: &[WeightedEdge], top_n: usize) -> NetworkSummary {
        let g = CooccurrenceGraph::from_edges(edges).expect("graph");
        let table = compute_centrality(&g, &EigenvectorConfig::default()).expect("centrality");
        summarize(&g, &table, 500, top_n)
    }

    #[test]
    fn triangle_summary() {
        let summary = summary_for(
            &[
                WeightedEdge::new("A", "B", 600),
                WeightedEdge::new("B", "C", 700),
                WeightedEdge::new("A", "C", 800),
            ],
            10,
        );
        assert!((summary.stats.density - 1.0).abs() < 1e-10);
        assert!((summary.stats.transitivity - 1.0).abs() < 1e-10);
        assert_eq!(summary.rankings.len(), 3);
        assert!(summary.rankings.iter().all(|r| r.nodes.len() == 3));

        let text = summary.to_text();
        assert!(text.contains("Density: 1.000000"));
        assert!(text.contains("Transitivity: 1.000000"));
        assert!(text.contains("Top 10 by Degree Centrality:"));
        assert!(text.contains("Edge weight cutoff: > 500"));
    }

    #[test]
    fn top_n_limits_each_ranking() {
        let summary = summary_for(
            &[
                WeightedEdge::new("Hub", "A", 1),
                WeightedEdge::new("Hub", "B", 1),
                WeightedEdge::new("Hub", "C", 1),
            ],
            1,
        );
        for ranking in &summary.rankings {
            assert_eq!(ranking.nodes.len(), 1);
            assert_eq!(ranking.nodes[0].node, "Hub");
        }
    }

    #[test]
    fn empty_graph_reports_zeros() {
        let summary = summary_for(&[], 10);
        assert_eq!(summary.stats.node_count, 0);
        assert!(summary.to_text().contains("(none)"));
    }

    #[test]
    fn serializes_flat_stats() {
        let summary = summary_for(&[WeightedEdge::new("A", "B", 9)], 10);
        let json = serde_json::to_value(&summary).expect("json");
        assert_eq!(json["node_count"], 2);
        assert_eq!(json["cutoff"], 500);
        assert_eq!(json["rankings"][0]["measure"], "degree");
        assert!(json["content_hash"].as_str().is_some_and(|h| h.starts_with("blake3:")));
    }

    #[test]
    fn write_text_creates_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output").join("network_information.txt");
        summary_for(&[WeightedEdge::new("A", "B", 9)], 10)
            .write_text(&path)
            .expect("write");
        assert!(fs::read_to_string(&path).expect("read").starts_with("Network information"));
    }
}
