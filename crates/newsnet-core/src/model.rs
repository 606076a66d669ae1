//! Co-occurrence data model.
//!
//! An [`EntityPair`] is an undirected edge between two entity names. The
//! constructor sorts its endpoints, so `EntityPair::new("Bob", "Alice")` and
//! `EntityPair::new("Alice", "Bob")` are the same value: derived `Eq`, `Hash`
//! and `Ord` never see insertion order.
//!
//! A [`WeightedEdge`] is one row of the on-disk edge list.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EntityPair
// ---------------------------------------------------------------------------

/// Canonical unordered pair of entity names (`node_a <= node_b`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityPair {
    node_a: String,
    node_b: String,
}

impl EntityPair {
    /// Build a pair, sorting the endpoints lexicographically.
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let a = a.into();
        let b = b.into();
        if a <= b {
            Self { node_a: a, node_b: b }
        } else {
            Self { node_a: b, node_b: a }
        }
    }

    /// The lexicographically smaller endpoint.
    #[must_use]
    pub fn node_a(&self) -> &str {
        &self.node_a
    }

    /// The lexicographically larger endpoint.
    #[must_use]
    pub fn node_b(&self) -> &str {
        &self.node_b
    }

    /// True when both endpoints are the same name.
    #[must_use]
    pub fn is_self_pair(&self) -> bool {
        self.node_a == self.node_b
    }

    /// Attach a weight, producing an edge-list row.
    #[must_use]
    pub fn with_weight(self, weight: u64) -> WeightedEdge {
        WeightedEdge {
            node_a: self.node_a,
            node_b: self.node_b,
            weight,
        }
    }

    /// Split into `(node_a, node_b)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.node_a, self.node_b)
    }
}

impl fmt::Display for EntityPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.node_a, self.node_b)
    }
}

// ---------------------------------------------------------------------------
// WeightedEdge
// ---------------------------------------------------------------------------

/// One `nodeA,nodeB,weight` row of the weighted edge list.
///
/// Rows written by the extractor are canonical (`node_a <= node_b`); rows
/// read from third-party files are taken as given and canonicalized by
/// [`WeightedEdge::pair`] where it matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedEdge {
    #[serde(rename = "nodeA")]
    pub node_a: String,
    #[serde(rename = "nodeB")]
    pub node_b: String,
    pub weight: u64,
}

impl WeightedEdge {
    #[must_use]
    pub fn new(node_a: impl Into<String>, node_b: impl Into<String>, weight: u64) -> Self {
        Self {
            node_a: node_a.into(),
            node_b: node_b.into(),
            weight,
        }
    }

    /// The canonical unordered pair for this row.
    #[must_use]
    pub fn pair(&self) -> EntityPair {
        EntityPair::new(self.node_a.clone(), self.node_b.clone())
    }

    /// True when the row connects a name to itself.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.node_a == self.node_b
    }
}
