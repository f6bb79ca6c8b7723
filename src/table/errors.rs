//! Rule table errors

use std::io;

use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while reading the rule table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Rule table is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Malformed rule table record (row {row}): {reason}")]
    Malformed { row: usize, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TableError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TableError::MissingColumn { .. } => "SCHGEN_TABLE_MISSING_COLUMN",
            TableError::Malformed { .. } => "SCHGEN_TABLE_MALFORMED",
            TableError::Io(_) => "SCHGEN_IO_ERROR",
        }
    }
}
