//! Shared helpers for integration tests.

use regkop_core::builder::{RawEntity, RawRecord};
use regkop_core::model::Graph;
use std::collections::BTreeMap;

/// Build a bare raw record: two named entities and a relation.
pub fn record(a: &str, rel: &str, b: &str) -> RawRecord {
    RawRecord {
        entity_a: RawEntity::named(a),
        relation: rel.to_string(),
        entity_b: RawEntity::named(b),
        attributes: BTreeMap::new(),
    }
}

/// Build a raw record with one relationship-level attribute.
pub fn record_with_attr(a: &str, rel: &str, b: &str, key: &str, value: &str) -> RawRecord {
    let mut r = record(a, rel, b);
    r.attributes.insert(key.to_string(), value.to_string());
    r
}

/// Build a small graph from records, panicking on builder errors.
pub fn graph(version_id: &str, records: &[RawRecord]) -> Graph {
    regkop_core::build_graph(version_id, records).unwrap()
}
