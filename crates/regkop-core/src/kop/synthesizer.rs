//! Changeset-to-procedure synthesis.
//!
//! Every step is templated from structured changeset fields and carries
//! `source_refs` back to the node ids / edge triples it was derived from;
//! no narrative text is invented beyond what the changeset and summaries
//! provide.

use crate::diff::model::{Changeset, EdgeDelta, FieldChange, NodeDelta};
use crate::errors::{KopError, Result};
use crate::kop::model::{ProcedureDocument, Provenance, Section, Step};
use crate::model::Edge;
use regkop_core_types::schema::{EVENT_END, EVENT_START};
use regkop_core_types::ProcedureId;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Section title for the version-summary preamble
const CONTEXT_SECTION_TITLE: &str = "Regulatory Context";

/// Section title for entity-level (node) steps
const ENTITY_SECTION_TITLE: &str = "Entities in Scope";

/// Synthesize a procedure document from a changeset and version summaries.
///
/// `old_summary == None` marks a first-time upload: the document is a
/// baseline procedure with one section per relation type and one baseline
/// step per edge. Otherwise the document narrates the delta: added and
/// modified steps first, explicit removal notices (never silent drops),
/// then carried-forward baseline steps.
///
/// # Errors
///
/// - `IncompleteInput` - `new_summary` is empty or whitespace-only; a
///   procedure cannot be produced without the new version's context
pub fn synthesize(
    changeset: &Changeset,
    old_summary: Option<&str>,
    new_summary: &str,
) -> Result<ProcedureDocument> {
    let new_summary = new_summary.trim();
    if new_summary.is_empty() {
        return Err(KopError::IncompleteInput {
            reason: "new-version summary is empty; re-run with a summary".to_string(),
        });
    }

    debug!(
        component = module_path!(),
        op = "synthesize",
        event = EVENT_START,
        new_version_id = %changeset.new_version_id,
        baseline = old_summary.is_none(),
    );

    let labels = label_index(changeset);

    let mut sections = vec![context_section(old_summary, new_summary)];

    if old_summary.is_none() {
        sections.extend(baseline_sections(changeset, &labels));
    } else {
        if let Some(section) = entity_section(changeset) {
            sections.push(section);
        }
        sections.extend(delta_sections(changeset, &labels));
    }

    let document = ProcedureDocument {
        procedure_id: ProcedureId::new(),
        title: format!("Key Operating Procedure ({})", changeset.new_version_id),
        sections,
    };

    debug!(
        component = module_path!(),
        op = "synthesize",
        event = EVENT_END,
        procedure_id = %document.procedure_id,
        step_count = document.step_count(),
    );

    Ok(document)
}

/// Display labels for node ids, drawn from the node buckets that carry
/// full nodes. Unchanged nodes are tracked by id only, so their id (a
/// normalized surface form) doubles as the display form.
fn label_index(changeset: &Changeset) -> BTreeMap<String, String> {
    changeset
        .added_nodes
        .iter()
        .chain(changeset.removed_nodes.iter())
        .map(|n| (n.id.clone(), n.label.clone()))
        .collect()
}

fn display<'a>(labels: &'a BTreeMap<String, String>, id: &'a str) -> &'a str {
    labels.get(id).map(String::as_str).unwrap_or(id)
}

fn context_section(old_summary: Option<&str>, new_summary: &str) -> Section {
    let mut steps = Vec::new();
    if let Some(old) = old_summary {
        let old = old.trim();
        if !old.is_empty() {
            steps.push(Step {
                text: format!("Previous version summary: {}", old),
                provenance: Provenance::Baseline,
                source_refs: Vec::new(),
            });
        }
    }
    steps.push(Step {
        text: format!("Current version summary: {}", new_summary),
        provenance: Provenance::Baseline,
        source_refs: Vec::new(),
    });
    Section {
        title: CONTEXT_SECTION_TITLE.to_string(),
        steps,
    }
}

/// Render a field-delta map as "field 'old' -> 'new'" clauses.
fn render_deltas(field_deltas: &BTreeMap<String, FieldChange>) -> String {
    field_deltas
        .iter()
        .map(|(field, change)| {
            format!(
                "{} '{}' -> '{}'",
                field,
                change.old.as_deref().unwrap_or("(absent)"),
                change.new.as_deref().unwrap_or("(absent)")
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render an edge's attributes as a parenthesized suffix, empty if none.
fn render_edge_attributes(edge: &Edge) -> String {
    if edge.attributes.is_empty() {
        return String::new();
    }
    let clauses: Vec<String> = edge
        .attributes
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect();
    format!(" ({})", clauses.join("; "))
}

fn edge_phrase(labels: &BTreeMap<String, String>, edge: &Edge) -> String {
    format!(
        "{} {} {}{}",
        display(labels, &edge.source_id),
        edge.relation,
        display(labels, &edge.target_id),
        render_edge_attributes(edge)
    )
}

fn baseline_edge_step(labels: &BTreeMap<String, String>, edge: &Edge) -> Step {
    Step {
        text: format!("{}.", edge_phrase(labels, edge)),
        provenance: Provenance::Baseline,
        source_refs: vec![edge.key().to_string()],
    }
}

fn added_edge_step(labels: &BTreeMap<String, String>, edge: &Edge) -> Step {
    Step {
        text: format!("New requirement: {}.", edge_phrase(labels, edge)),
        provenance: Provenance::Added,
        source_refs: vec![edge.key().to_string()],
    }
}

fn modified_edge_step(delta: &EdgeDelta) -> Step {
    Step {
        text: format!(
            "Requirement {} changed: {}.",
            delta.key,
            render_deltas(&delta.field_deltas)
        ),
        provenance: Provenance::Modified,
        source_refs: vec![delta.key.to_string()],
    }
}

fn removed_edge_step(labels: &BTreeMap<String, String>, edge: &Edge) -> Step {
    Step {
        text: format!(
            "Removed: {} no longer applies.",
            edge_phrase(labels, edge)
        ),
        provenance: Provenance::Removed,
        source_refs: vec![edge.key().to_string()],
    }
}

fn added_node_step(node: &crate::model::Node) -> Step {
    let kind_suffix = node
        .kind
        .as_deref()
        .map(|k| format!(" ({})", k))
        .unwrap_or_default();
    Step {
        text: format!("New entity in scope: {}{}.", node.label, kind_suffix),
        provenance: Provenance::Added,
        source_refs: vec![node.id.clone()],
    }
}

fn modified_node_step(delta: &NodeDelta) -> Step {
    Step {
        text: format!(
            "Entity {} changed: {}.",
            delta.id,
            render_deltas(&delta.field_deltas)
        ),
        provenance: Provenance::Modified,
        source_refs: vec![delta.id.clone()],
    }
}

fn removed_node_step(node: &crate::model::Node) -> Step {
    Step {
        text: format!(
            "Removed: entity {} is no longer covered by this procedure.",
            node.label
        ),
        provenance: Provenance::Removed,
        source_refs: vec![node.id.clone()],
    }
}

/// First-upload mode: one section per distinct relation in the new graph's
/// edges (which all sit in `added_edges`), one baseline step per edge.
fn baseline_sections(
    changeset: &Changeset,
    labels: &BTreeMap<String, String>,
) -> Vec<Section> {
    let mut by_relation: BTreeMap<&str, Vec<Step>> = BTreeMap::new();
    for edge in &changeset.added_edges {
        by_relation
            .entry(edge.relation.as_str())
            .or_default()
            .push(baseline_edge_step(labels, edge));
    }
    by_relation
        .into_iter()
        .map(|(relation, steps)| Section {
            title: relation.to_string(),
            steps,
        })
        .collect()
}

/// Entity-level steps for a two-version comparison.
fn entity_section(changeset: &Changeset) -> Option<Section> {
    let mut steps = Vec::new();
    steps.extend(changeset.added_nodes.iter().map(added_node_step));
    steps.extend(changeset.changed_nodes.iter().map(modified_node_step));
    steps.extend(changeset.removed_nodes.iter().map(removed_node_step));
    if steps.is_empty() {
        None
    } else {
        Some(Section {
            title: ENTITY_SECTION_TITLE.to_string(),
            steps,
        })
    }
}

/// Relation sections for a two-version comparison.
///
/// Step order inside each section is the fixed provenance order
/// (added, modified, removed, baseline); each bucket arrives pre-sorted by
/// its natural key from the diff engine, so appending bucket-by-bucket
/// preserves both orderings.
fn delta_sections(changeset: &Changeset, labels: &BTreeMap<String, String>) -> Vec<Section> {
    let removed_node_ids: BTreeSet<&str> = changeset
        .removed_nodes
        .iter()
        .map(|n| n.id.as_str())
        .collect();

    let mut relations: BTreeSet<&str> = BTreeSet::new();
    for edge in changeset
        .added_edges
        .iter()
        .chain(changeset.removed_edges.iter())
    {
        relations.insert(edge.relation.as_str());
    }
    for delta in &changeset.changed_edges {
        relations.insert(delta.key.relation.as_str());
    }
    for key in &changeset.unchanged_edges {
        relations.insert(key.relation.as_str());
    }

    let mut sections = Vec::new();
    for relation in relations {
        let mut steps = Vec::new();

        steps.extend(
            changeset
                .added_edges
                .iter()
                .filter(|e| e.relation == relation)
                .map(|e| added_edge_step(labels, e)),
        );
        steps.extend(
            changeset
                .changed_edges
                .iter()
                .filter(|d| d.key.relation == relation)
                .map(modified_edge_step),
        );
        steps.extend(
            changeset
                .removed_edges
                .iter()
                .filter(|e| e.relation == relation)
                .map(|e| removed_edge_step(labels, e)),
        );
        // Carried forward unless a governing endpoint was removed
        for key in changeset
            .unchanged_edges
            .iter()
            .filter(|k| k.relation == relation)
        {
            if removed_node_ids.contains(key.source_id.as_str())
                || removed_node_ids.contains(key.target_id.as_str())
            {
                continue;
            }
            steps.push(Step {
                text: format!(
                    "{} {} {}.",
                    display(labels, &key.source_id),
                    key.relation,
                    display(labels, &key.target_id)
                ),
                provenance: Provenance::Baseline,
                source_refs: vec![key.to_string()],
            });
        }

        if !steps.is_empty() {
            sections.push(Section {
                title: relation.to_string(),
                steps,
            });
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_deltas_marks_absent_sides() {
        let mut deltas = BTreeMap::new();
        deltas.insert(
            "frequency".to_string(),
            FieldChange {
                old: None,
                new: Some("quarterly".to_string()),
            },
        );
        let text = render_deltas(&deltas);
        assert_eq!(text, "frequency '(absent)' -> 'quarterly'");
    }

    #[test]
    fn test_context_section_includes_both_summaries() {
        let section = context_section(Some("old text"), "new text");
        assert_eq!(section.steps.len(), 2);
        assert!(section.steps[0].text.contains("old text"));
        assert!(section.steps[1].text.contains("new text"));
    }
}
