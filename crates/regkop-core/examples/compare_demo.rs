//! Comparison Pipeline Demonstration
//!
//! This example walks the full core pipeline for two versions of a
//! regulation: build both graphs, diff them, synthesize the procedure,
//! and produce the audit record.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use regkop_core::audit::AuditRecord;
use regkop_core::builder::{build_graph, RawEntity, RawRecord};
use regkop_core::diff::{diff, render_human_summary};
use regkop_core::kop::synthesize;
use regkop_core::logging_facility::{init, Profile};
use regkop_core::render::render_procedure;
use std::collections::BTreeMap;

fn record(a: &str, rel: &str, b: &str, attrs: &[(&str, &str)]) -> RawRecord {
    let mut attributes = BTreeMap::new();
    for (k, v) in attrs {
        attributes.insert(k.to_string(), v.to_string());
    }
    RawRecord {
        entity_a: RawEntity::named(a),
        relation: rel.to_string(),
        entity_b: RawEntity::named(b),
        attributes,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    println!("=== RegKOP Comparison Demo ===\n");

    // ===== Part 1: Build both graph versions =====
    println!("## Part 1: Graph Construction\n");

    let old_records = vec![
        record("Bank A", "reports-to", "Regulator X", &[]),
        record("Bank A", "notifies", "Regulator X", &[("frequency", "monthly")]),
        record("Bank B", "reports-to", "Regulator X", &[]),
    ];
    let new_records = vec![
        record("Bank A", "reports-to", "Regulator Y", &[]),
        record("Bank A", "notifies", "Regulator X", &[("frequency", "quarterly")]),
        record("BANK B", "reports-to", "Regulator X", &[]),
    ];

    let old = build_graph("2024-rev1", &old_records)?;
    let new = build_graph("2025-rev2", &new_records)?;
    println!(
        "Old graph: {} nodes, {} edges",
        old.node_count(),
        old.edge_count()
    );
    println!(
        "New graph: {} nodes, {} edges",
        new.node_count(),
        new.edge_count()
    );
    // "BANK B" and "Bank B" normalized to the same node
    assert!(new.contains_node("bank b"));

    // ===== Part 2: Diff =====
    println!("\n## Part 2: Changeset\n");

    let changeset = diff(&old, &new)?;
    println!(
        "added edges: {}, removed edges: {}, changed edges: {}, unchanged edges: {}",
        changeset.added_edges.len(),
        changeset.removed_edges.len(),
        changeset.changed_edges.len(),
        changeset.unchanged_edges.len()
    );
    println!("\n{}", render_human_summary(&changeset));

    // ===== Part 3: Procedure synthesis =====
    println!("## Part 3: Key Operating Procedure\n");

    let document = synthesize(
        &changeset,
        Some("Banks report to Regulator X with monthly notification."),
        "Reporting moves to Regulator Y; notification drops to quarterly.",
    )?;
    println!("{}", render_procedure(&document));

    // ===== Part 4: Audit record =====
    println!("## Part 4: Audit Record\n");

    let audit = AuditRecord::for_run(&changeset, &document, false)?;
    println!("run_id:            {}", audit.run_id);
    println!("old_version_id:    {:?}", audit.old_version_id);
    println!("new_version_id:    {}", audit.new_version_id);
    println!("changeset_digest:  {}", audit.changeset_digest);
    println!("procedure_id:      {}", audit.created_procedure_id);

    // Re-running the same comparison reproduces the digest
    let rerun = diff(&old, &new)?;
    let redoc = synthesize(&changeset, Some("old"), "new")?;
    let rerun_audit = AuditRecord::for_run(&rerun, &redoc, false)?;
    assert_eq!(audit.changeset_digest, rerun_audit.changeset_digest);
    println!("\n✓ Re-run produced an identical changeset digest");

    Ok(())
}
