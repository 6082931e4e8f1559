//! Canonical graph model for regulatory entity-relationship extractions
//!
//! A [`Graph`] is a frozen, validated value: construction checks referential
//! integrity, and every query surface iterates in sorted order so downstream
//! diffing and serialization are reproducible across runs.

pub mod edge;
pub mod graph;
pub mod node;

pub use edge::{Edge, EdgeKey};
pub use graph::Graph;
pub use node::Node;
