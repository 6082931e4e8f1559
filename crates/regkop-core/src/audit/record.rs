use crate::diff::model::Changeset;
use crate::errors::Result;
use crate::kop::model::ProcedureDocument;
use chrono::{DateTime, Utc};
use regkop_core_types::{ProcedureId, RunId};
use serde::{Deserialize, Serialize};

use super::digest::compute_changeset_digest;

/// Append-only description of one comparison run
///
/// Created once per successful diff + synthesize pair, never mutated. The
/// external persistence collaborator stores it as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Identity of this run (UUIDv7)
    pub run_id: RunId,

    /// Version id of the old graph; None for a first-time upload
    pub old_version_id: Option<String>,

    /// Version id of the new graph
    pub new_version_id: String,

    /// Content hash of the sorted, serialized changeset
    pub changeset_digest: String,

    /// Identity of the procedure document this run produced
    pub created_procedure_id: ProcedureId,

    /// Timestamp when this record was created
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Create the audit record for a completed run.
    ///
    /// `first_upload` distinguishes a baseline run, whose `old_version_id`
    /// is recorded as absent even though the diff was computed against an
    /// empty placeholder graph.
    ///
    /// # Errors
    /// * `Serialization` - the changeset could not be canonically serialized
    pub fn for_run(
        changeset: &Changeset,
        document: &ProcedureDocument,
        first_upload: bool,
    ) -> Result<Self> {
        let changeset_digest = compute_changeset_digest(changeset)?;
        Ok(Self {
            run_id: RunId::new(),
            old_version_id: if first_upload {
                None
            } else {
                Some(changeset.old_version_id.clone())
            },
            new_version_id: changeset.new_version_id.clone(),
            changeset_digest,
            created_procedure_id: document.procedure_id.clone(),
            created_at: Utc::now(),
        })
    }
}
