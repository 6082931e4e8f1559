//! Canonical key derivation for entity surface forms
//!
//! The extraction service is an LLM and produces the same entity with varying
//! capitalization and spacing across versions. The key function folds those
//! variants together without claiming semantic equivalence across genuinely
//! different phrasings.

/// Derive the canonical node id for an entity surface form
///
/// Case-folded (Unicode lowercase), whitespace-collapsed, trimmed.
/// Deterministic: the same surface form always yields the same key.
pub fn normalize_key(surface: &str) -> String {
    surface
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
