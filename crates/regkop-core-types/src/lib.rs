//! Core types shared across RegKOP facilities
//!
//! This crate provides foundational types used by the graph core and its
//! logging and audit facilities:
//!
//! - **Correlation types**: RunId, ProcedureId, RequestContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{ProcedureId, RequestContext, RunId};
