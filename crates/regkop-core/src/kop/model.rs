use regkop_core_types::ProcedureId;
use serde::{Deserialize, Serialize};

/// Why a procedure step exists.
///
/// The derived `Ord` is the fixed presentation order within a section:
/// added, then modified, then removed notices, then carried-forward baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Introduced by the new version
    Added,
    /// Present in both versions with a recorded delta
    Modified,
    /// Explicit notice of something the procedure no longer covers
    Removed,
    /// Carried forward unchanged (or first-upload baseline)
    Baseline,
}

impl Provenance {
    /// Short display tag used by renderers
    pub fn tag(&self) -> &'static str {
        match self {
            Provenance::Added => "added",
            Provenance::Modified => "modified",
            Provenance::Removed => "removed",
            Provenance::Baseline => "baseline",
        }
    }
}

/// A single procedure step with traceable provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step text, templated from structured changeset fields only
    pub text: String,
    /// Why this step exists
    pub provenance: Provenance,
    /// Node ids / edge triples this step was derived from
    pub source_refs: Vec<String>,
}

/// An ordered group of steps under one heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub steps: Vec<Step>,
}

/// The synthesized procedure document
///
/// Built once per comparison run and handed off immutably to the external
/// document writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDocument {
    /// Identity of this document (UUIDv7)
    pub procedure_id: ProcedureId,
    /// Document title
    pub title: String,
    /// Ordered sections
    pub sections: Vec<Section>,
}

impl ProcedureDocument {
    /// Total number of steps across all sections
    pub fn step_count(&self) -> usize {
        self.sections.iter().map(|s| s.steps.len()).sum()
    }

    /// Iterate all steps in document order
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.sections.iter().flat_map(|s| s.steps.iter())
    }
}
