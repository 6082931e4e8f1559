use crate::errors::{KopError, Result};
use crate::model::{Edge, EdgeKey, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Graph - a named, versioned container of nodes and edges
///
/// A Graph is a frozen value: it is assembled by the builder (or
/// [`Graph::from_parts`]) and never mutated afterwards. Construction validates
/// referential integrity; every edge endpoint must exist as a node in the same
/// graph. Nodes and edges are held in `BTreeMap`s so iteration order is the
/// canonical sort order (node id, edge triple), which downstream diffing and
/// serialization rely on for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    version_id: String,
    nodes: BTreeMap<String, Node>,
    edges: BTreeMap<EdgeKey, Edge>,
}

impl Graph {
    /// Create an empty graph for the given version
    ///
    /// Used as the old side of a first-time comparison, where every node and
    /// edge of the new version classifies as added.
    pub fn empty(version_id: impl Into<String>) -> Self {
        Self {
            version_id: version_id.into(),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Assemble a graph from already-keyed parts, validating integrity
    ///
    /// # Errors
    /// * `GraphIntegrity` - if any edge endpoint is not present as a node, or
    ///   an entry's map key disagrees with its own identity
    pub fn from_parts(
        version_id: impl Into<String>,
        nodes: BTreeMap<String, Node>,
        edges: BTreeMap<EdgeKey, Edge>,
    ) -> Result<Self> {
        let version_id = version_id.into();

        for (id, node) in &nodes {
            if id != &node.id {
                return Err(KopError::GraphIntegrity {
                    version_id,
                    reason: format!("node keyed as '{}' carries id '{}'", id, node.id),
                });
            }
        }

        for (key, edge) in &edges {
            if key != &edge.key() {
                return Err(KopError::GraphIntegrity {
                    version_id,
                    reason: format!("edge keyed as '{}' carries triple '{}'", key, edge.key()),
                });
            }
            if !nodes.contains_key(&edge.source_id) {
                return Err(KopError::GraphIntegrity {
                    version_id,
                    reason: format!(
                        "edge '{}' references non-existent source node '{}'",
                        key, edge.source_id
                    ),
                });
            }
            if !nodes.contains_key(&edge.target_id) {
                return Err(KopError::GraphIntegrity {
                    version_id,
                    reason: format!(
                        "edge '{}' references non-existent target node '{}'",
                        key, edge.target_id
                    ),
                });
            }
        }

        Ok(Self {
            version_id,
            nodes,
            edges,
        })
    }

    /// The document version this graph was built from
    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    /// Look up a node by canonical id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check whether a node exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up an edge by its identity triple
    pub fn edge(&self, key: &EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    /// Check whether an edge exists
    pub fn contains_edge(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    /// Iterate nodes in canonical (id) order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate edges in canonical (triple) order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing edges of a node, in canonical order
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.values().filter(move |e| e.source_id == id)
    }

    /// Incoming edges of a node, in canonical order
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.values().filter(move |e| e.target_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Node {
        Node::new(id, id.to_uppercase())
    }

    #[test]
    fn test_from_parts_rejects_dangling_edge() {
        let mut nodes = BTreeMap::new();
        nodes.insert("bank a".to_string(), node("bank a"));

        let edge = Edge::new("bank a", "regulator x", "reports-to");
        let mut edges = BTreeMap::new();
        edges.insert(edge.key(), edge);

        let err = Graph::from_parts("v1", nodes, edges).unwrap_err();
        assert_eq!(err.code(), "ERR_GRAPH_INTEGRITY");
    }

    #[test]
    fn test_from_parts_rejects_mismatched_key() {
        let mut nodes = BTreeMap::new();
        nodes.insert("wrong key".to_string(), node("bank a"));

        let err = Graph::from_parts("v1", nodes, BTreeMap::new()).unwrap_err();
        assert_eq!(err.code(), "ERR_GRAPH_INTEGRITY");
    }

    #[test]
    fn test_neighbor_queries() {
        let mut nodes = BTreeMap::new();
        for id in ["bank a", "regulator x", "regulator y"] {
            nodes.insert(id.to_string(), node(id));
        }
        let mut edges = BTreeMap::new();
        for e in [
            Edge::new("bank a", "regulator x", "reports-to"),
            Edge::new("bank a", "regulator y", "notifies"),
            Edge::new("regulator x", "bank a", "supervises"),
        ] {
            edges.insert(e.key(), e);
        }
        let graph = Graph::from_parts("v1", nodes, edges).unwrap();

        // Triple order sorts by target before relation
        let out: Vec<_> = graph.outgoing("bank a").map(|e| e.relation.clone()).collect();
        assert_eq!(out, vec!["reports-to".to_string(), "notifies".to_string()]);

        let inc: Vec<_> = graph.incoming("bank a").map(|e| e.relation.clone()).collect();
        assert_eq!(inc, vec!["supervises".to_string()]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::empty("v0");
        assert_eq!(graph.version_id(), "v0");
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
