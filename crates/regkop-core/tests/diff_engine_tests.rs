//! Diff engine tests: determinism, the no-op case, complement symmetry,
//! partition completeness, and the dangling-edge policy.

mod common;

use common::{graph, record, record_with_attr};
use regkop_core::diff::{diff, Changeset, DiffClassification};
use regkop_core::model::{EdgeKey, Graph};
use std::collections::BTreeSet;

fn old_new_pair() -> (Graph, Graph) {
    let old = graph(
        "v1",
        &[
            record("Bank A", "reports-to", "Regulator X"),
            record_with_attr("Bank A", "notifies", "Regulator X", "frequency", "monthly"),
            record("Bank B", "reports-to", "Regulator X"),
        ],
    );
    let new = graph(
        "v2",
        &[
            record("Bank A", "reports-to", "Regulator Y"),
            record_with_attr("Bank A", "notifies", "Regulator X", "frequency", "quarterly"),
            record("Bank B", "reports-to", "Regulator X"),
        ],
    );
    (old, new)
}

// Identical inputs always yield byte-identical serialized changesets
#[test]
fn test_diff_is_deterministic() {
    let (old, new) = old_new_pair();
    let c1 = diff(&old, &new).unwrap();
    let c2 = diff(&old, &new).unwrap();
    assert_eq!(c1, c2);
    let s1 = serde_json::to_string(&c1).unwrap();
    let s2 = serde_json::to_string(&c2).unwrap();
    assert_eq!(s1, s2);
}

// diff(G, G) yields empty delta buckets and full unchanged sets
#[test]
fn test_diff_self_is_noop() {
    let (_, g) = old_new_pair();
    let changeset = diff(&g, &g).unwrap();
    assert_eq!(changeset.classification, DiffClassification::Identical);
    assert!(changeset.is_empty_delta());
    assert_eq!(changeset.unchanged_nodes.len(), g.node_count());
    assert_eq!(changeset.unchanged_edges.len(), g.edge_count());
}

// diff(old, new).added == diff(new, old).removed, for nodes and edges
#[test]
fn test_complement_symmetry() {
    let (old, new) = old_new_pair();
    let forward = diff(&old, &new).unwrap();
    let backward = diff(&new, &old).unwrap();

    assert_eq!(forward.added_nodes, backward.removed_nodes);
    assert_eq!(forward.removed_nodes, backward.added_nodes);
    assert_eq!(forward.added_edges, backward.removed_edges);
    assert_eq!(forward.removed_edges, backward.added_edges);
    assert_eq!(forward.unchanged_nodes, backward.unchanged_nodes);
    assert_eq!(forward.unchanged_edges, backward.unchanged_edges);
}

fn node_id_partition(changeset: &Changeset) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    ids.extend(changeset.added_nodes.iter().map(|n| n.id.clone()));
    ids.extend(changeset.removed_nodes.iter().map(|n| n.id.clone()));
    ids.extend(changeset.changed_nodes.iter().map(|d| d.id.clone()));
    ids.extend(changeset.unchanged_nodes.iter().cloned());
    ids
}

// Every id in old ∪ new appears in exactly one node bucket (same for edges)
#[test]
fn test_partition_completeness() {
    let (old, new) = old_new_pair();
    let changeset = diff(&old, &new).unwrap();

    let ids = node_id_partition(&changeset);
    let unique: BTreeSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len(), "a node id appears in two buckets");

    let union: BTreeSet<String> = old
        .nodes()
        .chain(new.nodes())
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(unique.len(), union.len());

    let mut keys: Vec<EdgeKey> = Vec::new();
    keys.extend(changeset.added_edges.iter().map(|e| e.key()));
    keys.extend(changeset.removed_edges.iter().map(|e| e.key()));
    keys.extend(changeset.changed_edges.iter().map(|d| d.key.clone()));
    keys.extend(changeset.unchanged_edges.iter().cloned());
    let unique_keys: BTreeSet<&EdgeKey> = keys.iter().collect();
    assert_eq!(keys.len(), unique_keys.len(), "an edge appears in two buckets");

    let key_union: BTreeSet<EdgeKey> = old.edges().chain(new.edges()).map(|e| e.key()).collect();
    assert_eq!(unique_keys.len(), key_union.len());
}

// Moving a relationship to a new counterparty is a removal plus an
// addition, not a change
#[test]
fn test_regulator_swap_reports_as_removed_plus_added() {
    let old = graph("v1", &[record("Bank A", "reports-to", "Regulator X")]);
    let new = graph("v2", &[record("Bank A", "reports-to", "Regulator Y")]);
    let changeset = diff(&old, &new).unwrap();

    assert_eq!(changeset.removed_edges.len(), 1);
    assert_eq!(
        changeset.removed_edges[0].key(),
        EdgeKey::new("bank a", "regulator x", "reports-to")
    );
    assert_eq!(changeset.added_edges.len(), 1);
    assert_eq!(
        changeset.added_edges[0].key(),
        EdgeKey::new("bank a", "regulator y", "reports-to")
    );
    assert!(changeset.changed_edges.is_empty());

    // The endpoint that moved shows up in the node buckets too
    assert_eq!(changeset.added_nodes.len(), 1);
    assert_eq!(changeset.added_nodes[0].id, "regulator y");
    assert_eq!(changeset.removed_nodes.len(), 1);
    assert_eq!(changeset.removed_nodes[0].id, "regulator x");
    assert_eq!(changeset.unchanged_nodes, vec!["bank a".to_string()]);
}

// An edge whose endpoint node disappeared still reports in removed_edges
#[test]
fn test_dangling_edge_reported_independently() {
    let old = graph(
        "v1",
        &[
            record("Bank A", "reports-to", "Regulator X"),
            record("Bank B", "notifies", "Regulator X"),
        ],
    );
    let new = graph("v2", &[record("Bank A", "reports-to", "Regulator X")]);
    let changeset = diff(&old, &new).unwrap();

    assert_eq!(changeset.removed_nodes.len(), 1);
    assert_eq!(changeset.removed_nodes[0].id, "bank b");
    assert_eq!(changeset.removed_edges.len(), 1);
    assert_eq!(
        changeset.removed_edges[0].key(),
        EdgeKey::new("bank b", "regulator x", "notifies")
    );
}

// Attribute-only differences classify as changed with per-field deltas
#[test]
fn test_attribute_change_yields_field_delta() {
    let (old, new) = old_new_pair();
    let changeset = diff(&old, &new).unwrap();

    assert_eq!(changeset.changed_edges.len(), 1);
    let delta = &changeset.changed_edges[0];
    assert_eq!(delta.key, EdgeKey::new("bank a", "regulator x", "notifies"));
    let change = &delta.field_deltas["frequency"];
    assert_eq!(change.old.as_deref(), Some("monthly"));
    assert_eq!(change.new.as_deref(), Some("quarterly"));
}

// First comparison of a brand-new regulation: everything is added
#[test]
fn test_first_upload_degenerates_to_all_added() {
    let new = graph("v1", &[record("Bank A", "reports-to", "Regulator X")]);
    let changeset = diff(&Graph::empty("none"), &new).unwrap();

    assert_eq!(changeset.added_nodes.len(), 2);
    assert_eq!(changeset.added_edges.len(), 1);
    assert!(changeset.removed_nodes.is_empty());
    assert!(changeset.removed_edges.is_empty());
    assert!(changeset.unchanged_nodes.is_empty());
    assert!(changeset.unchanged_edges.is_empty());
}

// Inputs are immutable: diffing never changes either graph
#[test]
fn test_diff_does_not_mutate_inputs() {
    let (old, new) = old_new_pair();
    let old_before = old.clone();
    let new_before = new.clone();
    let _ = diff(&old, &new).unwrap();
    assert_eq!(old, old_before);
    assert_eq!(new, new_before);
}

// Output buckets are sorted by natural key
#[test]
fn test_bucket_ordering_is_canonical() {
    let old = Graph::empty("v0");
    let new = graph(
        "v1",
        &[
            record("Zeta Corp", "reports-to", "Regulator X"),
            record("Alpha Corp", "notifies", "Regulator X"),
        ],
    );
    let changeset = diff(&old, &new).unwrap();

    let ids: Vec<&str> = changeset.added_nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha corp", "regulator x", "zeta corp"]);

    let keys: Vec<EdgeKey> = changeset.added_edges.iter().map(|e| e.key()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}
