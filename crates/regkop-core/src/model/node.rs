use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node - a regulatory entity
///
/// Nodes are keyed by a canonical `id` derived from the entity's surface name
/// (case-folded, whitespace-collapsed), which tolerates LLM extraction
/// variance in capitalization and spacing without claiming semantic
/// equivalence across genuinely different phrasings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Canonical key, unique within a graph
    pub id: String,

    /// Display name as extracted
    pub label: String,

    /// Entity category (e.g. obligation, party, instrument); unknown allowed
    pub kind: Option<String>,

    /// Extracted key-value metadata, free-form and version-specific
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    /// Create a new node with no kind and no attributes
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Set the entity kind (builder-phase convenience)
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set an attribute (builder-phase convenience)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = Node::new("bank a", "Bank A");
        assert_eq!(node.id, "bank a");
        assert_eq!(node.label, "Bank A");
        assert!(node.kind.is_none());
        assert!(node.attributes.is_empty());
    }

    #[test]
    fn test_builder_conveniences() {
        let node = Node::new("bank a", "Bank A")
            .with_kind("party")
            .with_attribute("jurisdiction", "EU");
        assert_eq!(node.kind.as_deref(), Some("party"));
        assert_eq!(
            node.attributes.get("jurisdiction").map(String::as_str),
            Some("EU")
        );
    }
}
