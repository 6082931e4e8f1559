//! Graph builder / normalizer
//!
//! Turns the ordered sequence of raw extraction records produced by the
//! external LLM service into a validated [`Graph`]. All tolerance-for-noise
//! logic lives here: surface-form normalization, duplicate merging, and
//! rejection of malformed records. The diff engine downstream assumes clean,
//! well-formed graphs.

pub mod normalize;

use crate::errors::{KopError, Result};
use crate::model::{Edge, EdgeKey, Graph, Node};
use regkop_core_types::schema::{EVENT_END, EVENT_START};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub use normalize::normalize_key;

/// One side of a raw relationship extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    /// Surface name as extracted; must be non-empty after trimming
    pub name: String,

    /// Entity category, if the extractor emitted one
    #[serde(default)]
    pub kind: Option<String>,

    /// Entity-level metadata
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl RawEntity {
    /// Create an entity mention with just a surface name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            attributes: BTreeMap::new(),
        }
    }
}

/// A raw extraction record from the external LLM service
///
/// Ordered sequences of these are the boundary contract with the extraction
/// collaborator; nothing downstream of the builder ever sees this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub entity_a: RawEntity,
    pub relation: String,
    pub entity_b: RawEntity,

    /// Relationship-level metadata (e.g. conditionality, frequency)
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Incremental graph assembly
///
/// The only mutable phase in a graph's life: `ingest` records in extraction
/// order, then `finish` to freeze into a validated [`Graph`].
#[derive(Debug)]
pub struct GraphBuilder {
    version_id: String,
    nodes: BTreeMap<String, Node>,
    edges: BTreeMap<EdgeKey, Edge>,
    record_count: usize,
}

impl GraphBuilder {
    /// Start assembling a graph for the given document version
    pub fn new(version_id: impl Into<String>) -> Self {
        Self {
            version_id: version_id.into(),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            record_count: 0,
        }
    }

    /// Ingest one raw extraction record
    ///
    /// Both entities and the connecting edge are upserted under the merge
    /// policy: first write wins for `label`/`kind`, last write wins per
    /// attribute key.
    ///
    /// # Errors
    /// * `MalformedExtraction` - if `entity_a.name`, `entity_b.name`, or
    ///   `relation` is empty after trimming
    pub fn ingest(&mut self, record: &RawRecord) -> Result<()> {
        let relation = record.relation.trim();
        if relation.is_empty() {
            return Err(KopError::MalformedExtraction {
                reason: "record is missing 'relation'".to_string(),
            });
        }

        let source_id = self.upsert_node(&record.entity_a, "entity_a")?;
        let target_id = self.upsert_node(&record.entity_b, "entity_b")?;

        let key = EdgeKey::new(source_id.clone(), target_id.clone(), relation);
        match self.edges.get_mut(&key) {
            Some(existing) => {
                // Re-extraction of a known triple: merge attributes, later wins
                for (k, v) in &record.attributes {
                    existing.attributes.insert(k.clone(), v.clone());
                }
            }
            None => {
                let mut edge = Edge::new(source_id, target_id, relation);
                edge.attributes = record.attributes.clone();
                self.edges.insert(key, edge);
            }
        }

        self.record_count += 1;
        Ok(())
    }

    fn upsert_node(&mut self, entity: &RawEntity, field: &str) -> Result<String> {
        let id = normalize_key(&entity.name);
        if id.is_empty() {
            return Err(KopError::MalformedExtraction {
                reason: format!("record is missing '{}'", field),
            });
        }

        match self.nodes.get_mut(&id) {
            Some(existing) => {
                // Duplicate mention: first write keeps label, kind fills in
                // only if absent, attributes merge with later wins
                if existing.kind.is_none() {
                    existing.kind = entity.kind.clone();
                }
                for (k, v) in &entity.attributes {
                    existing.attributes.insert(k.clone(), v.clone());
                }
            }
            None => {
                let mut node = Node::new(id.clone(), entity.name.trim());
                node.kind = entity.kind.clone();
                node.attributes = entity.attributes.clone();
                self.nodes.insert(id.clone(), node);
            }
        }
        Ok(id)
    }

    /// Freeze the assembly into a validated, immutable graph
    pub fn finish(self) -> Result<Graph> {
        debug!(
            component = module_path!(),
            op = "finish",
            event = EVENT_END,
            version_id = %self.version_id,
            record_count = self.record_count,
            node_count = self.nodes.len(),
            edge_count = self.edges.len(),
        );
        Graph::from_parts(self.version_id, self.nodes, self.edges)
    }
}

/// Build a graph from an ordered sequence of raw extraction records
///
/// One-shot wrapper over [`GraphBuilder`].
///
/// # Errors
/// * `MalformedExtraction` - any record missing `entity_a`, `entity_b`, or `relation`
/// * `GraphIntegrity` - assembled parts fail validation (indicates a builder bug)
pub fn build_graph(version_id: impl Into<String>, records: &[RawRecord]) -> Result<Graph> {
    let version_id = version_id.into();
    debug!(
        component = module_path!(),
        op = "build_graph",
        event = EVENT_START,
        version_id = %version_id,
        record_count = records.len(),
    );
    let mut builder = GraphBuilder::new(version_id);
    for record in records {
        builder.ingest(record)?;
    }
    builder.finish()
}
