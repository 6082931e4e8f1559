//! KOP (Key Operating Procedure) synthesis
//!
//! Turns a [`Changeset`](crate::diff::Changeset) plus per-version summaries
//! into an ordered, provenance-tagged procedure document for the external
//! document writer.

pub mod model;
pub mod synthesizer;

pub use model::{ProcedureDocument, Provenance, Section, Step};
pub use synthesizer::synthesize;
