use thiserror::Error;

/// Result type alias using KopError
pub type Result<T> = std::result::Result<T, KopError>;

/// Error taxonomy for the RegKOP core
///
/// The first three variants are the recoverable, caller-facing conditions:
/// malformed extraction records, graphs that fail referential integrity, and
/// synthesis invoked without a usable new-version summary. The remaining
/// variants are programming-error classes: they indicate a contract violation
/// inside the core rather than bad user input, and are never silently
/// swallowed or degraded into a partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KopError {
    /// Raw extraction record is missing a required field
    #[error("Malformed extraction record: {reason}")]
    MalformedExtraction { reason: String },

    /// Edge references a node that does not exist in the same graph
    #[error("Graph integrity violation in version {version_id}: {reason}")]
    GraphIntegrity { version_id: String, reason: String },

    /// Synthesis invoked without a usable new-version summary
    #[error("Incomplete input: {reason}")]
    IncompleteInput { reason: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A computed value failed its round-trip determinism check
    #[error("Determinism violation: {message}")]
    DeterminismViolation { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl KopError {
    /// Get the stable error code for this error
    ///
    /// Codes are part of the external contract: callers (web layer, tests)
    /// match on them rather than on display strings.
    pub fn code(&self) -> &'static str {
        match self {
            KopError::MalformedExtraction { .. } => "ERR_MALFORMED_EXTRACTION",
            KopError::GraphIntegrity { .. } => "ERR_GRAPH_INTEGRITY",
            KopError::IncompleteInput { .. } => "ERR_INCOMPLETE_INPUT",
            KopError::Serialization { .. } => "ERR_SERIALIZATION",
            KopError::DeterminismViolation { .. } => "ERR_DETERMINISM_VIOLATION",
            KopError::Internal { .. } => "ERR_INTERNAL",
        }
    }
}

/// Conversion from serde_json::Error to KopError
impl From<serde_json::Error> for KopError {
    fn from(err: serde_json::Error) -> Self {
        KopError::Serialization {
            message: err.to_string(),
        }
    }
}
