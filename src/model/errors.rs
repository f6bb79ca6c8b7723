//! Model construction errors
//!
//! All model errors are fatal: no schema is written when any occurs.
//! Row numbers are 1-based and count the header row.

use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while turning rows into the rule model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Row does not belong to any phase; the first data row must open a phase (row {row})")]
    MissingPhaseTitle { row: usize },

    #[error("New phase row is missing new pattern title (row {row})")]
    MissingPatternTitle { row: usize },

    #[error("New pattern row is missing new rule context (row {row})")]
    MissingRuleContext { row: usize },

    #[error("Row is missing assert test (row {row})")]
    MissingAssertTest { row: usize },

    #[error("Unknown assert severity '{value}', expected ERROR, WARNING or INFO (row {row})")]
    UnknownSeverity { row: usize, value: String },

    #[error("Id '{id}' is already used in this document (row {row})")]
    DuplicateId { row: usize, id: String },

    #[error("Synthesized prerequisite pattern id '{id}' collides with an existing id")]
    PrerequisiteIdCollision { id: String },
}

impl ModelError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::MissingPhaseTitle { .. } => "SCHGEN_MISSING_PHASE_TITLE",
            ModelError::MissingPatternTitle { .. } => "SCHGEN_MISSING_PATTERN_TITLE",
            ModelError::MissingRuleContext { .. } => "SCHGEN_MISSING_RULE_CONTEXT",
            ModelError::MissingAssertTest { .. } => "SCHGEN_MISSING_ASSERT_TEST",
            ModelError::UnknownSeverity { .. } => "SCHGEN_UNKNOWN_SEVERITY",
            ModelError::DuplicateId { .. } => "SCHGEN_DUPLICATE_ID",
            ModelError::PrerequisiteIdCollision { .. } => "SCHGEN_PREREQUISITE_ID_COLLISION",
        }
    }

    /// Returns the offending table row, if the error is tied to one
    pub fn row(&self) -> Option<usize> {
        match self {
            ModelError::MissingPhaseTitle { row }
            | ModelError::MissingPatternTitle { row }
            | ModelError::MissingRuleContext { row }
            | ModelError::MissingAssertTest { row }
            | ModelError::UnknownSeverity { row, .. }
            | ModelError::DuplicateId { row, .. } => Some(*row),
            ModelError::PrerequisiteIdCollision { .. } => None,
        }
    }
}
