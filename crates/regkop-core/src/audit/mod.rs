//! Audit record for comparison runs
//!
//! One append-only record per successful diff + synthesize pair. The record
//! carries a stable digest of the changeset so a later run over the same
//! inputs can be recognized as a re-generation rather than a new result.
//! Persistence itself belongs to the external store.

pub mod digest;
pub mod record;

pub use digest::compute_changeset_digest;
pub use record::AuditRecord;
