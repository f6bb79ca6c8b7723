//! Compilation errors
//!
//! Every variant is fatal and raised before the output is touched, except
//! `Io`, which may also come from the final write.

use std::io;

use thiserror::Error;

use crate::coverage::CoverageError;
use crate::model::ModelError;
use crate::serializer::SerializeError;
use crate::table::TableError;

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Exemplar(#[from] CoverageError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CompileError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Table(e) => e.code(),
            CompileError::Model(e) => e.code(),
            CompileError::Exemplar(e) => e.code(),
            CompileError::Serialize(e) => e.code(),
            CompileError::Io(_) => "SCHGEN_IO_ERROR",
        }
    }

    /// Returns the underlying platform error, if this is an I/O failure
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            CompileError::Io(e)
            | CompileError::Table(TableError::Io(e))
            | CompileError::Exemplar(CoverageError::Io(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns the model error, if the table content was rejected
    pub fn model_error(&self) -> Option<&ModelError> {
        match self {
            CompileError::Model(e) => Some(e),
            _ => None,
        }
    }
}
