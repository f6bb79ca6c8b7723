//! Serialization errors

use thiserror::Error;

/// Result type for serialization
pub type SerializeResult<T> = Result<T, SerializeError>;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Failed to render schema XML: {0}")]
    Xml(String),
}

impl SerializeError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            SerializeError::Xml(_) => "SCHGEN_SERIALIZE_FAILED",
        }
    }
}
