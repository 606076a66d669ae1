//! Co-occurrence graph module.
//!
//! # Overview
//!
//! Builds the petgraph-based undirected graph every metric and renderer
//! works on.
//!
//! ## Pipeline
//!
//! ```text
//! weighted_edgelist.csv
//!        ↓  build::load_edges()
//! Vec<WeightedEdge>
//!        ↓  build::filter_by_weight(threshold)   (weight > threshold)
//! Vec<WeightedEdge>
//!        ↓  build::CooccurrenceGraph::from_edges()
//! CooccurrenceGraph (UnGraph<String, u64>, no self-loops, no parallel edges)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, transitivity, components, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use newsnet_graph::graph::{build_graph, filter_by_weight, GraphStats};
//!
//! let edges = newsnet_core::edgelist::read_edgelist(path)?;
//! let g = build_graph(&filter_by_weight(&edges, 500))?;
//! let stats = GraphStats::from_graph(&g);
//!
//! println!("nodes={} edges={} density={:.3}", stats.node_count, stats.edge_count, stats.density);
//! ```

pub mod build;
pub mod stats;

pub use build::{CooccurrenceGraph, build_graph, filter_by_weight, load_edges};
pub use stats::GraphStats;
