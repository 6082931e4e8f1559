//! Human-readable summary renderer for graph changesets.

use crate::diff::model::{Changeset, DiffClassification};

/// Render a human-readable Markdown summary of a [`Changeset`].
///
/// The summary is intended for review screens and approval workflows.
/// It is informational only and does not affect the structured changeset.
pub fn render_human_summary(changeset: &Changeset) -> String {
    let mut out = String::new();

    // Header
    out.push_str("## Regulation Graph Diff\n\n");
    out.push_str(&format!(
        "**Old version**: `{}`  \n**New version**: `{}`\n\n",
        changeset.old_version_id, changeset.new_version_id
    ));

    let class_label = match &changeset.classification {
        DiffClassification::Identical => "Identical",
        DiffClassification::Changed => "Changed",
    };
    out.push_str(&format!("**Classification**: {class_label}\n\n"));

    if changeset.classification == DiffClassification::Identical {
        out.push_str("_No changes detected._\n");
        return out;
    }

    // Node changes
    if !changeset.added_nodes.is_empty()
        || !changeset.removed_nodes.is_empty()
        || !changeset.changed_nodes.is_empty()
    {
        out.push_str("### Entity Changes\n\n");
        if !changeset.added_nodes.is_empty() {
            out.push_str(&format!(
                "- **Added** ({}): {}\n",
                changeset.added_nodes.len(),
                changeset
                    .added_nodes
                    .iter()
                    .map(|n| n.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        if !changeset.removed_nodes.is_empty() {
            out.push_str(&format!(
                "- **Removed** ({}): {}\n",
                changeset.removed_nodes.len(),
                changeset
                    .removed_nodes
                    .iter()
                    .map(|n| n.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        for delta in &changeset.changed_nodes {
            let fields: Vec<&str> = delta.field_deltas.keys().map(String::as_str).collect();
            out.push_str(&format!(
                "- **Changed**: `{}` ({})\n",
                delta.id,
                fields.join(", ")
            ));
        }
        out.push('\n');
    }

    // Edge changes
    if !changeset.added_edges.is_empty()
        || !changeset.removed_edges.is_empty()
        || !changeset.changed_edges.is_empty()
    {
        out.push_str("### Relationship Changes\n\n");
        for edge in &changeset.added_edges {
            out.push_str(&format!("- **Added**: `{}`\n", edge.key()));
        }
        for edge in &changeset.removed_edges {
            out.push_str(&format!("- **Removed**: `{}`\n", edge.key()));
        }
        for delta in &changeset.changed_edges {
            let fields: Vec<&str> = delta.field_deltas.keys().map(String::as_str).collect();
            out.push_str(&format!(
                "- **Changed**: `{}` ({})\n",
                delta.key,
                fields.join(", ")
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "_Unchanged: {} entities, {} relationships._\n",
        changeset.unchanged_nodes.len(),
        changeset.unchanged_edges.len()
    ));

    out
}
