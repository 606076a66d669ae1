//! Per-person centrality table.
//!
//! Joins the three metrics into one row per person, sorted by degree
//! centrality (highest first, ties by name), and writes it as
//! `centrality_measures.csv`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use newsnet_core::config::EigenvectorConfig;
use newsnet_core::csvio;
use newsnet_core::error::Result;
use serde::Serialize;
use tracing::{info, instrument};

use crate::graph::build::CooccurrenceGraph;
use crate::metrics::betweenness::betweenness_centrality;
use crate::metrics::degree::degree_centrality;
use crate::metrics::eigenvector::eigenvector_centrality;

/// Header of the centrality CSV.
pub const CENTRALITY_COLUMNS: [&str; 4] = [
    "node",
    "Degree Centrality",
    "Betweenness Centrality",
    "Eigenvector Centrality",
];

/// One of the three centrality measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Degree,
    Betweenness,
    Eigenvector,
}

impl Measure {
    pub const ALL: [Self; 3] = [Self::Degree, Self::Betweenness, Self::Eigenvector];

    /// Human-readable name, as used in the CSV header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Degree => "Degree Centrality",
            Self::Betweenness => "Betweenness Centrality",
            Self::Eigenvector => "Eigenvector Centrality",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
            Self::Eigenvector => "eigenvector",
        }
    }

    #[must_use]
    pub const fn value(self, row: &CentralityRow) -> f64 {
        match self {
            Self::Degree => row.degree,
            Self::Betweenness => row.betweenness,
            Self::Eigenvector => row.eigenvector,
        }
    }
}

/// Centrality scores of one person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRow {
    pub node: String,
    pub degree: f64,
    pub betweenness: f64,
    pub eigenvector: f64,
}

/// Centrality scores for every node of a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CentralityTable {
    rows: Vec<CentralityRow>,
    /// Power iterations eigenvector centrality needed.
    pub eigenvector_iterations: usize,
}

impl CentralityTable {
    /// Rows sorted by degree centrality, highest first.
    #[must_use]
    pub fn rows(&self) -> &[CentralityRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for one person.
    #[must_use]
    pub fn get(&self, node: &str) -> Option<&CentralityRow> {
        self.rows.iter().find(|r| r.node == node)
    }

    /// The `n` highest-scoring rows for `measure`, ties broken by name.
    #[must_use]
    pub fn top(&self, measure: Measure, n: usize) -> Vec<&CentralityRow> {
        let mut ranked: Vec<&CentralityRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| {
            descending(measure.value(a), measure.value(b)).then_with(|| a.node.cmp(&b.node))
        });
        ranked.truncate(n);
        ranked
    }
}

/// Compute degree, betweenness and eigenvector centrality for every node.
///
/// An empty graph gives an empty table.
///
/// # Errors
///
/// Returns [`newsnet_core::NetworkError::Convergence`] if eigenvector
/// centrality does not converge.
#[instrument(skip(g, eigenvector), fields(nodes = g.node_count()))]
pub fn compute_centrality(
    g: &CooccurrenceGraph,
    eigenvector: &EigenvectorConfig,
) -> Result<CentralityTable> {
    let degree = degree_centrality(g);
    let betweenness = betweenness_centrality(g);
    let ev = eigenvector_centrality(g, eigenvector)?;

    let score = |map: &HashMap<String, f64>, node: &str| map.get(node).copied().unwrap_or(0.0);

    let mut rows: Vec<CentralityRow> = g
        .graph
        .node_weights()
        .map(|node| CentralityRow {
            node: node.clone(),
            degree: score(&degree, node),
            betweenness: score(&betweenness, node),
            eigenvector: score(&ev.scores, node),
        })
        .collect();

    rows.sort_by(|a, b| descending(a.degree, b.degree).then_with(|| a.node.cmp(&b.node)));

    info!(
        rows = rows.len(),
        eigenvector_iterations = ev.iterations,
        "centrality computed"
    );

    Ok(CentralityTable {
        rows,
        eigenvector_iterations: ev.iterations,
    })
}

/// Write the table as CSV with the [`CENTRALITY_COLUMNS`] header.
///
/// # Errors
///
/// Returns [`newsnet_core::NetworkError::Write`] on any filesystem failure.
#[instrument(skip(table), fields(path = %path.display(), rows = table.len()))]
pub fn write_centrality_csv(table: &CentralityTable, path: &Path) -> Result<()> {
    csvio::write_atomically(path, |w| {
        w.write_record(CENTRALITY_COLUMNS)?;
        for row in table.rows() {
            w.write_record([
                row.node.clone(),
                row.degree.to_string(),
                row.betweenness.to_string(),
                row.eigenvector.to_string(),
            ])?;
        }
        Ok(())
    })
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsnet_core::WeightedEdge;

    fn star() -> CooccurrenceGraph {
        CooccurrenceGraph::from_edges(&[
            WeightedEdge::new("Hub", "Cy", 1),
            WeightedEdge::new("Hub", "Ava", 1),
            WeightedEdge::new("Hub", "Bo", 1),
        ])
        .expect("graph")
    }

    #[test]
    fn empty_graph_gives_empty_table() {
        let empty = CooccurrenceGraph::from_edges(&[]).expect("graph");
        let table = compute_centrality(&empty, &EigenvectorConfig::default()).expect("empty");
        assert!(table.is_empty());
        assert!(table.top(Measure::Degree, 10).is_empty());
    }

    #[test]
    fn rows_sorted_by_degree_then_name() {
        let table = compute_centrality(&star(), &EigenvectorConfig::default()).expect("centrality");
        let order: Vec<&str> = table.rows().iter().map(|r| r.node.as_str()).collect();
        assert_eq!(order, ["Hub", "Ava", "Bo", "Cy"]);

        let hub = table.get("Hub").expect("hub row");
        assert!((hub.degree - 1.0).abs() < 1e-10);
        assert!((hub.betweenness - 1.0).abs() < 1e-10);
    }

    #[test]
    fn top_truncates_and_ranks_per_measure() {
        let table = compute_centrality(&star(), &EigenvectorConfig::default()).expect("centrality");
        let top = table.top(Measure::Eigenvector, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].node, "Hub");
        assert_eq!(top[1].node, "Ava");
        assert!(top[0].eigenvector >= top[1].eigenvector);
    }

    #[test]
    fn csv_has_expected_header_and_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out").join("centrality_measures.csv");
        let table = compute_centrality(&star(), &EigenvectorConfig::default()).expect("centrality");

        write_centrality_csv(&table, &path).expect("write");

        let text = std::fs::read_to_string(&path).expect("read");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("node,Degree Centrality,Betweenness Centrality,Eigenvector Centrality")
        );
        assert!(lines.next().is_some_and(|l| l.starts_with("Hub,1,1,")));
        assert_eq!(lines.count(), 3);
    }
}
