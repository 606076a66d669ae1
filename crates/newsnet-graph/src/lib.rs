#![forbid(unsafe_code)]
//! newsnet-graph library.
//!
//! Analysis stage: weighted edge list in, centrality table, network picture
//! and summary report out.
//!
//! ```text
//! load_edges → filter_by_weight → build_graph ─┬─ layout_and_render  → network_graph.png / .dot
//!                                              ├─ compute_centrality → centrality_measures.csv
//!                                              └─ summarize          → network_information.txt
//! ```
//!
//! # Conventions
//!
//! - **Errors**: [`newsnet_core::NetworkError`] via [`newsnet_core::error::Result`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod centrality;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod render;
pub mod report;

pub use centrality::{
    CentralityRow, CentralityTable, Measure, compute_centrality, write_centrality_csv,
};
pub use graph::{CooccurrenceGraph, GraphStats, build_graph, filter_by_weight, load_edges};
pub use layout::{Layout, spring_layout};
pub use render::{RenderedArtifacts, layout_and_render};
pub use report::{NetworkSummary, summarize};
