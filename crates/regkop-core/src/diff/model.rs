//! Graph diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Collections use `BTreeMap` and sorted `Vec` for deterministic serialization:
//! the serialized changeset doubles as the input to the audit digest.

use crate::model::{Edge, EdgeKey, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// High-level classification of the diff result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiffClassification {
    /// Old and new graphs hold identical node/edge sets with identical attributes
    Identical,
    /// At least one node or edge was added, removed, or changed
    Changed,
}

/// A change to a single compared field.
///
/// `old`/`new` are `None` when the field is absent on that side (an attribute
/// key that only one version carries).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldChange {
    /// Value in the old graph
    pub old: Option<String>,
    /// Value in the new graph
    pub new: Option<String>,
}

/// Per-field deltas for a node present in both graphs with differences.
///
/// `label` and `kind` deltas are recorded under the reserved field names
/// `"label"` and `"kind"`; all other keys are attribute names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeDelta {
    /// Canonical node id
    pub id: String,
    /// Changed fields, keyed by field name (sorted)
    pub field_deltas: BTreeMap<String, FieldChange>,
}

/// Per-field deltas for an edge triple present in both graphs with differences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeDelta {
    /// Identity triple
    pub key: EdgeKey,
    /// Changed attribute keys (sorted)
    pub field_deltas: BTreeMap<String, FieldChange>,
}

/// The typed, ordered changeset between two graph versions.
///
/// The eight bucket collections partition the node-id and edge-triple spaces
/// of `old ∪ new`: every id/triple appears in exactly one bucket. All buckets
/// are sorted by their natural key (node id, edge triple), so identical inputs
/// always serialize to identical bytes.
///
/// A Changeset is a pure value owned by the caller; it is never mutated after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Changeset {
    /// Schema version of this changeset structure (always 1)
    pub changeset_schema_version: u32,
    /// Version id of the old graph
    pub old_version_id: String,
    /// Version id of the new graph
    pub new_version_id: String,
    /// High-level classification
    pub classification: DiffClassification,

    /// Nodes present only in the new graph
    pub added_nodes: Vec<Node>,
    /// Nodes present only in the old graph
    pub removed_nodes: Vec<Node>,
    /// Nodes present in both graphs with differing label/kind/attributes
    pub changed_nodes: Vec<NodeDelta>,
    /// Ids of nodes identical in both graphs
    pub unchanged_nodes: Vec<String>,

    /// Edge triples present only in the new graph
    pub added_edges: Vec<Edge>,
    /// Edge triples present only in the old graph
    pub removed_edges: Vec<Edge>,
    /// Triples present in both graphs with differing attributes
    pub changed_edges: Vec<EdgeDelta>,
    /// Triples identical in both graphs
    pub unchanged_edges: Vec<EdgeKey>,
}

impl Changeset {
    /// True if nothing was added, removed, or changed
    pub fn is_empty_delta(&self) -> bool {
        self.added_nodes.is_empty()
            && self.removed_nodes.is_empty()
            && self.changed_nodes.is_empty()
            && self.added_edges.is_empty()
            && self.removed_edges.is_empty()
            && self.changed_edges.is_empty()
    }
}
