//! Exemplar loading errors
//!
//! Only loading the exemplar can fail. Problems found while checking
//! contexts are advisory diagnostics, never errors.

use std::io;

use thiserror::Error;

/// Result type for coverage operations
pub type CoverageResult<T> = Result<T, CoverageError>;

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("Exemplar document is not well-formed XML: {reason}")]
    MalformedExemplar { reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CoverageError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CoverageError::MalformedExemplar { .. } => "SCHGEN_MALFORMED_EXEMPLAR",
            CoverageError::Io(_) => "SCHGEN_IO_ERROR",
        }
    }
}
