//! Graph construction from a weighted edge list.
//!
//! # Overview
//!
//! Turns the rows of a weighted edge list into a [`petgraph`] undirected
//! graph whose node weights are person names and whose edge weights are
//! co-occurrence counts.
//!
//! ## Node Set
//!
//! Nodes are exactly the endpoints of the edges handed in. A name that only
//! appeared on edges removed by [`filter_by_weight`] is not a node, so the
//! graph never carries isolated nodes.
//!
//! ## Row Cleanup
//!
//! - A row whose endpoints are the same name is skipped with a warning.
//! - Several rows for the same unordered pair are merged into one edge whose
//!   weight is the sum of theirs. A sum past `u64::MAX` is a data error.
//!
//! Nodes are inserted in name order and edges in `(nodeA, nodeB)` order, so
//! node indices (and everything seeded from them, like the layout) do not
//! depend on the row order of the input file.
//!
//! ## Content Hash
//!
//! The graph carries a BLAKE3 hash of its merged, sorted edge set. It goes
//! into the summary report so two reports can be checked for having been
//! computed from the same graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use newsnet_core::edgelist;
use newsnet_core::error::Result;
use newsnet_core::{EntityPair, NetworkError, WeightedEdge};
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, instrument, warn};

// ---------------------------------------------------------------------------
// CooccurrenceGraph
// ---------------------------------------------------------------------------

/// An undirected, weighted person co-occurrence graph.
#[derive(Debug, Clone)]
pub struct CooccurrenceGraph {
    /// Nodes = person names, edges = co-occurrence counts.
    pub graph: UnGraph<String, u64>,
    /// Mapping from person name to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 content hash of the merged edge set.
    pub content_hash: String,
}

impl CooccurrenceGraph {
    /// Build a graph from weighted edges.
    ///
    /// An empty slice yields an empty graph.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::WeightOverflow`] if rows for the same pair sum
    /// past `u64::MAX`.
    #[instrument(skip(edges), fields(rows = edges.len()))]
    pub fn from_edges(edges: &[WeightedEdge]) -> Result<Self> {
        let mut merged: BTreeMap<EntityPair, u64> = BTreeMap::new();
        let mut self_loops = 0_usize;

        for edge in edges {
            if edge.is_self_loop() {
                warn!(node = %edge.node_a, weight = edge.weight, "skipping self-loop edge");
                self_loops += 1;
                continue;
            }
            let pair = edge.pair();
            let weight = merged.entry(pair.clone()).or_insert(0);
            *weight = weight
                .checked_add(edge.weight)
                .ok_or_else(|| {
                    let (node_a, node_b) = pair.into_parts();
                    NetworkError::WeightOverflow { node_a, node_b }
                })?;
        }

        let content_hash = compute_edge_hash(&merged);

        let names: BTreeSet<&str> = merged
            .keys()
            .flat_map(|pair| [pair.node_a(), pair.node_b()])
            .collect();

        let mut graph = UnGraph::<String, u64>::with_capacity(names.len(), merged.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(names.len());
        for name in names {
            let idx = graph.add_node(name.to_string());
            node_map.insert(name.to_string(), idx);
        }

        for (pair, weight) in &merged {
            let a = node_map[pair.node_a()];
            let b = node_map[pair.node_b()];
            graph.add_edge(a, b, *weight);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            merged_rows = edges.len() - self_loops - merged.len(),
            self_loops,
            "co-occurrence graph built"
        );

        Ok(Self {
            graph,
            node_map,
            content_hash,
        })
    }

    /// Return the number of nodes (people) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (co-occurring pairs) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for a person name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Return the person name for a node.
    #[must_use]
    pub fn name(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Weight of the edge between two names, if they are adjacent.
    #[must_use]
    pub fn weight_between(&self, a: &str, b: &str) -> Option<u64> {
        let (a, b) = (self.node_index(a)?, self.node_index(b)?);
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Adjacency lists indexed by `NodeIndex::index()`.
    ///
    /// The graph has no parallel edges or self-loops, so each list holds
    /// distinct neighbours.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        self.graph
            .node_indices()
            .map(|v| self.graph.neighbors(v).map(NodeIndex::index).collect())
            .collect()
    }
}

/// Read the weighted edge list written by the extraction stage.
///
/// # Errors
///
/// Returns [`newsnet_core::NetworkError::Read`] if the file cannot be read,
/// [`newsnet_core::NetworkError::MissingColumn`] if `nodeA`, `nodeB` or
/// `weight` is absent, and [`newsnet_core::NetworkError::MalformedRecord`]
/// naming the row whose weight is not a non-negative integer.
#[instrument(fields(path = %path.display()))]
pub fn load_edges(path: &Path) -> Result<Vec<WeightedEdge>> {
    let edges = edgelist::read_edgelist(path)?;
    debug!(rows = edges.len(), "edges ready for filtering");
    Ok(edges)
}

/// Keep the edges whose weight is strictly greater than `threshold`.
///
/// Raising the threshold never adds an edge back.
#[must_use]
pub fn filter_by_weight(edges: &[WeightedEdge], threshold: u64) -> Vec<WeightedEdge> {
    let kept: Vec<WeightedEdge> = edges
        .iter()
        .filter(|e| e.weight > threshold)
        .cloned()
        .collect();
    debug!(
        threshold,
        kept = kept.len(),
        dropped = edges.len() - kept.len(),
        "edges filtered by weight"
    );
    kept
}

/// Build the analysis graph from already-filtered edges.
///
/// # Errors
///
/// See [`CooccurrenceGraph::from_edges`].
pub fn build_graph(filtered_edges: &[WeightedEdge]) -> Result<CooccurrenceGraph> {
    CooccurrenceGraph::from_edges(filtered_edges)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash of the sorted, merged edge set.
fn compute_edge_hash(edges: &BTreeMap<EntityPair, u64>) -> String {
    let mut hasher = blake3::Hasher::new();
    for (pair, weight) in edges {
        hasher.update(pair.node_a().as_bytes());
        hasher.update(b"\x00");
        hasher.update(pair.node_b().as_bytes());
        hasher.update(b"\x00");
        hasher.update(&weight.to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
