//! RegKOP Core - graph differencing and procedure synthesis for regulatory documents
//!
//! This crate provides the algorithmic core of the RegKOP pipeline:
//! - Canonical graph model for entity-relationship extractions (nodes + directed edges)
//! - Builder/normalizer that turns noisy extraction records into validated graphs
//! - Deterministic diff engine producing a typed changeset between two graph versions
//! - KOP synthesizer turning a changeset plus version summaries into an ordered
//!   procedure document with per-step provenance
//! - Audit record with a stable changeset digest for idempotent re-generation
//!
//! Text extraction, LLM calls, persistence, and document serialization are
//! external collaborators; this crate only consumes and produces immutable values.

pub mod audit;
pub mod builder;
pub mod diff;
pub mod errors;
pub mod kop;
pub mod logging_facility;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use audit::AuditRecord;
pub use builder::{build_graph, GraphBuilder, RawEntity, RawRecord};
pub use diff::{diff, Changeset};
pub use errors::{KopError, Result};
pub use kop::{synthesize, ProcedureDocument, Provenance, Section, Step};
pub use model::{Edge, EdgeKey, Graph, Node};
