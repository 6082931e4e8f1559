//! Graph diff computation
//!
//! Pure, deterministic differencing of two canonical graphs into a typed
//! [`Changeset`], plus a human-readable summary renderer for review
//! workflows.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::diff;
pub use human_summary::render_human_summary;
pub use model::{
    Changeset, DiffClassification, EdgeDelta, FieldChange, NodeDelta,
};
