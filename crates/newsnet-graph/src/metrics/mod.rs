//! Centrality metrics for the co-occurrence graph.
//!
//! # Overview
//!
//! Each metric answers a different question about a person's place in the
//! network:
//!
//! - **Degree centrality** (`degree`): How many of the others does this
//!   person appear with?
//! - **Betweenness centrality** (`betweenness`): Who brokers between people
//!   who rarely appear together?
//! - **Eigenvector centrality** (`eigenvector`): Who appears alongside the
//!   other well-connected people?
//!
//! # Usage
//!
//! All metrics take a [`crate::graph::CooccurrenceGraph`] and return scores
//! keyed by person name.
//!
//! ```rust,ignore
//! use newsnet_graph::metrics::betweenness::betweenness_centrality;
//! use newsnet_graph::metrics::degree::degree_centrality;
//! use newsnet_graph::metrics::eigenvector::eigenvector_centrality;
//!
//! let dc = degree_centrality(&g);
//! let bc = betweenness_centrality(&g);
//! let ev = eigenvector_centrality(&g, &EigenvectorConfig::default())?;
//! ```

pub mod betweenness;
pub mod degree;
pub mod eigenvector;
