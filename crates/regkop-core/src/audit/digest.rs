//! Digest computation for changesets.
//!
//! Provides a deterministic SHA256 digest over the canonical serialized
//! changeset. Because every changeset collection is sorted by its natural
//! key, the same `(old, new)` inputs always hash to the same value, which is
//! what makes the digest usable for idempotent re-generation checks.

use crate::diff::model::Changeset;
use crate::errors::Result;
use sha2::{Digest, Sha256};

/// Compute the content digest of a changeset.
///
/// ## Returns
///
/// Hex-encoded SHA256 digest (64 characters)
///
/// ## Errors
///
/// Returns `KopError::Serialization` if JSON serialization fails.
pub fn compute_changeset_digest(changeset: &Changeset) -> Result<String> {
    let canonical = serde_json::to_string(changeset)?;
    Ok(hash_string(&canonical))
}

/// Hash a string using SHA256.
///
/// Internal helper for deterministic digest computation.
fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
