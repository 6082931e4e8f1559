use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical edge identity: the `(source_id, target_id, relation)` triple
///
/// A graph holds at most one edge per key; the derived `Ord` gives the
/// canonical sort order used for deterministic iteration and changeset output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source_id: String,
    pub target_id: String,
    pub relation: String,
}

impl EdgeKey {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation: relation.into(),
        }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source_id, self.relation, self.target_id)
    }
}

/// Edge - a directed relationship between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Canonical key of the source node
    pub source_id: String,

    /// Canonical key of the target node
    pub target_id: String,

    /// Relationship type label (e.g. "requires", "reports-to")
    pub relation: String,

    /// Optional metadata (e.g. conditionality, effective date text)
    pub attributes: BTreeMap<String, String>,
}

impl Edge {
    /// Create a new edge with no attributes
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation: relation.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute (builder-phase convenience)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The identity triple for this edge
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(
            self.source_id.clone(),
            self.target_id.clone(),
            self.relation.clone(),
        )
    }
}
