//! Graph diff computation engine.
//!
//! The core entry point is [`diff`], which accepts two validated graphs and
//! produces a [`Changeset`].

#![allow(clippy::result_large_err)]

use crate::diff::model::{Changeset, DiffClassification, EdgeDelta, FieldChange, NodeDelta};
use crate::errors::{KopError, Result};
use crate::model::{Edge, Graph, Node};
use regkop_core_types::schema::{EVENT_END, EVENT_START};
use std::collections::BTreeMap;
use tracing::debug;

/// Reserved field names for the non-attribute node fields.
///
/// Attribute keys come from LLM extraction and are compared verbatim; these
/// two names identify the structured `label`/`kind` fields in a delta map.
const FIELD_LABEL: &str = "label";
const FIELD_KIND: &str = "kind";

/// Compare two optional field values, recording a delta on mismatch.
fn field_change(old: Option<&str>, new: Option<&str>) -> Option<FieldChange> {
    if old != new {
        Some(FieldChange {
            old: old.map(str::to_string),
            new: new.map(str::to_string),
        })
    } else {
        None
    }
}

/// Field-by-field comparison of two attribute maps over the union of keys.
fn attribute_deltas(
    old: &BTreeMap<String, String>,
    new: &BTreeMap<String, String>,
) -> BTreeMap<String, FieldChange> {
    let mut deltas = BTreeMap::new();
    for key in old.keys().chain(new.keys()) {
        if deltas.contains_key(key) {
            continue;
        }
        if let Some(change) = field_change(
            old.get(key).map(String::as_str),
            new.get(key).map(String::as_str),
        ) {
            deltas.insert(key.clone(), change);
        }
    }
    deltas
}

/// Compare two nodes sharing an id; `None` means identical.
fn node_delta(old: &Node, new: &Node) -> Option<NodeDelta> {
    let mut field_deltas = attribute_deltas(&old.attributes, &new.attributes);
    if let Some(change) = field_change(Some(&old.label), Some(&new.label)) {
        field_deltas.insert(FIELD_LABEL.to_string(), change);
    }
    if let Some(change) = field_change(old.kind.as_deref(), new.kind.as_deref()) {
        field_deltas.insert(FIELD_KIND.to_string(), change);
    }
    if field_deltas.is_empty() {
        None
    } else {
        Some(NodeDelta {
            id: new.id.clone(),
            field_deltas,
        })
    }
}

/// Compare two edges sharing a triple; `None` means identical.
fn edge_delta(old: &Edge, new: &Edge) -> Option<EdgeDelta> {
    let field_deltas = attribute_deltas(&old.attributes, &new.attributes);
    if field_deltas.is_empty() {
        None
    } else {
        Some(EdgeDelta {
            key: new.key(),
            field_deltas,
        })
    }
}

/// Compute a structured, deterministic diff between two graph versions.
///
/// Pure over its inputs: identical `(old, new)` pairs always yield an
/// identical changeset, with no dependence on extraction order or wall clock.
/// Edges are classified independently of node status, so an edge whose
/// endpoint disappeared still reports in `removed_edges`; narrating that
/// relationship is the synthesizer's concern.
///
/// For a first-time comparison (no old version) callers pass
/// [`Graph::empty`] as `old`, which classifies every node and edge as added.
///
/// # Errors
///
/// - `DeterminismViolation` - the computed changeset fails its round-trip
///   sanity check (should never occur in correct builds)
pub fn diff(old: &Graph, new: &Graph) -> Result<Changeset> {
    debug!(
        component = module_path!(),
        op = "diff",
        event = EVENT_START,
        old_version_id = %old.version_id(),
        new_version_id = %new.version_id(),
    );

    // Node classification
    let mut added_nodes: Vec<Node> = Vec::new();
    let mut removed_nodes: Vec<Node> = Vec::new();
    let mut changed_nodes: Vec<NodeDelta> = Vec::new();
    let mut unchanged_nodes: Vec<String> = Vec::new();

    for node in new.nodes() {
        match old.node(&node.id) {
            None => added_nodes.push(node.clone()),
            Some(old_node) => match node_delta(old_node, node) {
                Some(delta) => changed_nodes.push(delta),
                None => unchanged_nodes.push(node.id.clone()),
            },
        }
    }
    for node in old.nodes() {
        if !new.contains_node(&node.id) {
            removed_nodes.push(node.clone());
        }
    }

    // Edge classification, keyed by the (source, target, relation) triple
    let mut added_edges: Vec<Edge> = Vec::new();
    let mut removed_edges: Vec<Edge> = Vec::new();
    let mut changed_edges: Vec<EdgeDelta> = Vec::new();
    let mut unchanged_edges = Vec::new();

    for edge in new.edges() {
        let key = edge.key();
        match old.edge(&key) {
            None => added_edges.push(edge.clone()),
            Some(old_edge) => match edge_delta(old_edge, edge) {
                Some(delta) => changed_edges.push(delta),
                None => unchanged_edges.push(key),
            },
        }
    }
    for edge in old.edges() {
        if !new.contains_edge(&edge.key()) {
            removed_edges.push(edge.clone());
        }
    }

    // Graph iteration is already in canonical order, so each bucket built
    // from a single pass is sorted by construction.
    let classification = if added_nodes.is_empty()
        && removed_nodes.is_empty()
        && changed_nodes.is_empty()
        && added_edges.is_empty()
        && removed_edges.is_empty()
        && changed_edges.is_empty()
    {
        DiffClassification::Identical
    } else {
        DiffClassification::Changed
    };

    let changeset = Changeset {
        changeset_schema_version: 1,
        old_version_id: old.version_id().to_string(),
        new_version_id: new.version_id().to_string(),
        classification,
        added_nodes,
        removed_nodes,
        changed_nodes,
        unchanged_nodes,
        added_edges,
        removed_edges,
        changed_edges,
        unchanged_edges,
    };

    // Determinism guard: round-trip through JSON must produce an equal struct
    let serialized = serde_json::to_string(&changeset).map_err(|e| {
        KopError::DeterminismViolation {
            message: format!("failed to serialize changeset: {}", e),
        }
    })?;
    let reparsed: Changeset =
        serde_json::from_str(&serialized).map_err(|e| KopError::DeterminismViolation {
            message: format!("failed to re-parse changeset: {}", e),
        })?;
    if reparsed != changeset {
        return Err(KopError::DeterminismViolation {
            message: "changeset is not deterministic: round-trip produced different struct"
                .to_string(),
        });
    }

    debug!(
        component = module_path!(),
        op = "diff",
        event = EVENT_END,
        added_nodes = changeset.added_nodes.len(),
        removed_nodes = changeset.removed_nodes.len(),
        changed_nodes = changeset.changed_nodes.len(),
        added_edges = changeset.added_edges.len(),
        removed_edges = changeset.removed_edges.len(),
        changed_edges = changeset.changed_edges.len(),
    );

    Ok(changeset)
}
