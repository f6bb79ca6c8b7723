//! Compiler configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an empty
//! object (or no file at all) yields the BuildingSync setup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Schematron namespace
pub const SCHEMATRON_NS_URI: &str = "http://purl.oclc.org/dsdl/schematron";

/// Default namespace of validated documents
pub const TARGET_NS_URI: &str = "http://buildingsync.net/schemas/bedes-auc/2019";

/// A prefix bound to a namespace uri
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceBinding {
    pub prefix: String,
    pub uri: String,
}

impl NamespaceBinding {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Prefix and uri of the emitted Schematron elements
    #[serde(default = "default_schematron_namespace")]
    pub schematron_namespace: NamespaceBinding,

    /// Namespace rule contexts and tests are written against
    #[serde(default = "default_target_namespace")]
    pub target_namespace: NamespaceBinding,

    /// Extension substituted into the table path when no output is given
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

fn default_schematron_namespace() -> NamespaceBinding {
    NamespaceBinding::new("sch", SCHEMATRON_NS_URI)
}
fn default_target_namespace() -> NamespaceBinding {
    NamespaceBinding::new("auc", TARGET_NS_URI)
}
fn default_output_extension() -> String {
    "sch".to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            schematron_namespace: default_schematron_namespace(),
            target_namespace: default_target_namespace(),
            output_extension: default_output_extension(),
        }
    }
}

impl CompilerConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: CompilerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, binding) in [
            ("schematron_namespace", &self.schematron_namespace),
            ("target_namespace", &self.target_namespace),
        ] {
            if binding.prefix.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{}.prefix must not be empty", name)));
            }
            if binding.uri.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{}.uri must not be empty", name)));
            }
        }

        if self.output_extension.trim().is_empty() || self.output_extension.contains('.') {
            return Err(ConfigError::Invalid(format!(
                "output_extension '{}' must be a non-empty extension without dots",
                self.output_extension
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config: CompilerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.schematron_namespace.prefix, "sch");
        assert_eq!(config.target_namespace.prefix, "auc");
        assert_eq!(config.output_extension, "sch");
    }

    #[test]
    fn test_config_load_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("schematron-gen.json");
        fs::write(
            &path,
            r#"{"target_namespace": {"prefix": "bs", "uri": "urn:bs"}, "output_extension": "xml"}"#,
        )
        .unwrap();

        let config = CompilerConfig::load(&path).unwrap();
        assert_eq!(config.target_namespace, NamespaceBinding::new("bs", "urn:bs"));
        assert_eq!(config.output_extension, "xml");
        assert_eq!(config.schematron_namespace.uri, SCHEMATRON_NS_URI);
    }

    #[test]
    fn test_config_validates_prefix() {
        let mut config = CompilerConfig::default();
        config.target_namespace.prefix = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validates_extension() {
        let mut config = CompilerConfig::default();
        config.output_extension = ".sch".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(CompilerConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
