//! Compiled rule model
//!
//! The model mirrors the Schematron hierarchy:
//! - Schema: ordered phases
//! - Phase: ordered patterns (synthesized prerequisites interleaved)
//! - Pattern: ordered rules
//! - Rule: one context and its ordered asserts
//!
//! Row order of the input table is preserved at every level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Context selecting the document root.
pub const ROOT_CONTEXT: &str = "/";

/// Derives a document id from a title.
///
/// Ids are the lower-cased title with every space replaced by `_`.
pub fn to_id(title: &str) -> String {
    title.to_lowercase().replace(' ', "_")
}

/// Assert severity, rendered as the Schematron `role` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Document is invalid
    Error,
    /// Document is suspicious but acceptable
    Warning,
    /// Informational only
    Info,
}

impl Severity {
    /// Returns the role string written to the schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Severity::Error),
            "WARNING" => Ok(Severity::Warning),
            "INFO" => Ok(Severity::Info),
            _ => Err(s.to_string()),
        }
    }
}

/// A single assertion inside a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assert {
    /// Boolean test expression
    pub test: String,
    /// Human-readable message, may be empty
    pub description: String,
    /// Role reported by the engine on failure
    pub severity: Severity,
}

impl Assert {
    pub fn new(test: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            test: test.into(),
            description: description.into(),
            severity,
        }
    }

    /// Text reported when the assert fails.
    ///
    /// Falls back to the test expression when no description was given.
    pub fn message(&self) -> &str {
        if self.description.is_empty() {
            &self.test
        } else {
            &self.description
        }
    }
}

/// A rule: one context path plus its asserts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub title: String,
    pub context: String,
    pub asserts: Vec<Assert>,
}

impl Rule {
    pub fn new(title: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            context: context.into(),
            asserts: Vec::new(),
        }
    }
}

/// A named group of rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub title: String,
    pub id: String,
    pub see: String,
    pub rules: Vec<Rule>,
}

impl Pattern {
    /// Creates an empty pattern, deriving its id from the title
    pub fn new(title: impl Into<String>, see: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: to_id(&title),
            title,
            see: see.into(),
            rules: Vec::new(),
        }
    }

    /// Distinct rule contexts in first-seen order
    pub fn distinct_contexts(&self) -> Vec<&str> {
        let mut contexts: Vec<&str> = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !contexts.contains(&rule.context.as_str()) {
                contexts.push(&rule.context);
            }
        }
        contexts
    }
}

/// An independently selectable set of patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub title: String,
    pub id: String,
    pub see: String,
    pub patterns: Vec<Pattern>,
}

impl Phase {
    /// Creates an empty phase, deriving its id from the title
    pub fn new(title: impl Into<String>, see: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: to_id(&title),
            title,
            see: see.into(),
            patterns: Vec::new(),
        }
    }
}

/// Root of the compiled artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub phases: Vec<Phase>,
}

impl Schema {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// All patterns in document order
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.phases.iter().flat_map(|phase| phase.patterns.iter())
    }

    /// Number of patterns across all phases
    pub fn pattern_count(&self) -> usize {
        self.phases.iter().map(|phase| phase.patterns.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_id_lowercases_and_replaces_spaces() {
        assert_eq!(to_id("Area Checks"), "area_checks");
        assert_eq!(to_id("P1"), "p1");
        assert_eq!(to_id("Two  Spaces"), "two__spaces");
    }

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!("ERROR".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!(" Info ".parse::<Severity>(), Ok(Severity::Info));
    }

    #[test]
    fn test_severity_rejects_unknown_values() {
        assert_eq!("FATAL".parse::<Severity>(), Err("FATAL".to_string()));
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn test_assert_message_falls_back_to_test() {
        let bare = Assert::new("count(x) = 1", "", Severity::Error);
        assert_eq!(bare.message(), "count(x) = 1");

        let described = Assert::new("count(x) = 1", "Exactly one x", Severity::Error);
        assert_eq!(described.message(), "Exactly one x");
    }

    #[test]
    fn test_distinct_contexts_keep_first_seen_order() {
        let mut pattern = Pattern::new("Area Checks", "");
        for context in ["/b", "/a", "/b", "/c", "/a"] {
            pattern.rules.push(Rule::new("", context));
        }
        assert_eq!(pattern.distinct_contexts(), vec!["/b", "/a", "/c"]);
    }
}
