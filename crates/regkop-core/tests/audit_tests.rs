//! Audit record and changeset digest tests: digest stability across runs,
//! sensitivity to any changeset difference, and the run-identity fields.

mod common;

use common::{graph, record, record_with_attr};
use regkop_core::audit::{compute_changeset_digest, AuditRecord};
use regkop_core::diff::diff;
use regkop_core::kop::synthesize;
use regkop_core::model::Graph;

// Re-running the same comparison yields the same digest, which is what an
// idempotency check against the last stored audit record relies on
#[test]
fn test_digest_stable_across_runs() {
    let old = graph("v1", &[record("Bank A", "reports-to", "Regulator X")]);
    let new = graph("v2", &[record("Bank A", "reports-to", "Regulator Y")]);

    let d1 = compute_changeset_digest(&diff(&old, &new).unwrap()).unwrap();
    let d2 = compute_changeset_digest(&diff(&old, &new).unwrap()).unwrap();
    assert_eq!(d1, d2);
    assert_eq!(d1.len(), 64);
    assert!(d1.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_digest_changes_with_any_delta() {
    let old = graph("v1", &[record("Bank A", "reports-to", "Regulator X")]);
    let new = graph("v2", &[record("Bank A", "reports-to", "Regulator Y")]);
    let baseline = compute_changeset_digest(&diff(&old, &new).unwrap()).unwrap();

    // A different edge attribute
    let new_attr = graph(
        "v2",
        &[record_with_attr("Bank A", "reports-to", "Regulator Y", "frequency", "monthly")],
    );
    let with_attr = compute_changeset_digest(&diff(&old, &new_attr).unwrap()).unwrap();
    assert_ne!(baseline, with_attr);

    // A different version id alone also changes the digest
    let renamed = graph("v3", &[record("Bank A", "reports-to", "Regulator Y")]);
    let with_rename = compute_changeset_digest(&diff(&old, &renamed).unwrap()).unwrap();
    assert_ne!(baseline, with_rename);
}

#[test]
fn test_ingestion_order_does_not_affect_digest() {
    let old = Graph::empty("v0");
    let forward = graph(
        "v1",
        &[
            record("Bank A", "reports-to", "Regulator X"),
            record("Bank B", "notifies", "Regulator X"),
        ],
    );
    let reversed = graph(
        "v1",
        &[
            record("Bank B", "notifies", "Regulator X"),
            record("Bank A", "reports-to", "Regulator X"),
        ],
    );

    let d1 = compute_changeset_digest(&diff(&old, &forward).unwrap()).unwrap();
    let d2 = compute_changeset_digest(&diff(&old, &reversed).unwrap()).unwrap();
    assert_eq!(d1, d2);
}

#[test]
fn test_audit_record_links_run_to_procedure() {
    let old = graph("v1", &[record("Bank A", "reports-to", "Regulator X")]);
    let new = graph("v2", &[record("Bank A", "reports-to", "Regulator Y")]);
    let changeset = diff(&old, &new).unwrap();
    let document = synthesize(&changeset, Some("old summary"), "new summary").unwrap();

    let audit = AuditRecord::for_run(&changeset, &document, false).unwrap();
    assert_eq!(audit.old_version_id.as_deref(), Some("v1"));
    assert_eq!(audit.new_version_id, "v2");
    assert_eq!(audit.created_procedure_id, document.procedure_id);
    assert_eq!(
        audit.changeset_digest,
        compute_changeset_digest(&changeset).unwrap()
    );
}

#[test]
fn test_first_upload_audit_has_no_old_version() {
    let new = graph("v1", &[record("Bank A", "reports-to", "Regulator X")]);
    let changeset = diff(&Graph::empty("none"), &new).unwrap();
    let document = synthesize(&changeset, None, "summary").unwrap();

    let audit = AuditRecord::for_run(&changeset, &document, true).unwrap();
    assert!(audit.old_version_id.is_none());
}

// Two runs over the same inputs are distinguishable by run identity even
// though their digests match
#[test]
fn test_each_run_gets_fresh_identity() {
    let new = graph("v1", &[record("Bank A", "reports-to", "Regulator X")]);
    let changeset = diff(&Graph::empty("none"), &new).unwrap();

    let doc1 = synthesize(&changeset, None, "summary").unwrap();
    let doc2 = synthesize(&changeset, None, "summary").unwrap();
    let a1 = AuditRecord::for_run(&changeset, &doc1, true).unwrap();
    let a2 = AuditRecord::for_run(&changeset, &doc2, true).unwrap();

    assert_ne!(a1.run_id, a2.run_id);
    assert_ne!(a1.created_procedure_id, a2.created_procedure_id);
    assert_eq!(a1.changeset_digest, a2.changeset_digest);
}
