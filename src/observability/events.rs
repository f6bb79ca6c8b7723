//! Observable compilation events
//!
//! Events are explicit and typed.

use std::fmt;

use crate::coverage::Diagnostic;

/// Observable events of a compilation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Compilation of one table begins
    CompileStart,
    /// Compilation of one table finished
    CompileComplete,
    /// Compilation aborted (no output written)
    CompileFailed,

    // Inputs
    /// Configuration loaded
    ConfigLoaded,

    // Context diagnostics
    /// Rule context matched nothing in the exemplar
    ContextNoMatch,
    /// Rule context re-matched nodes within a pattern
    ContextOverlap,
    /// Rule context could not be evaluated
    ContextCheckFailed,

    // Output
    /// Output written
    SchemaWritten,
    /// Output already up to date
    SchemaUnchanged,
    /// Dry run, output left untouched
    SchemaDryRun,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::CompileStart => "COMPILE_START",
            Event::CompileComplete => "COMPILE_COMPLETE",
            Event::CompileFailed => "COMPILE_FAILED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ContextNoMatch => "CONTEXT_NO_MATCH",
            Event::ContextOverlap => "CONTEXT_OVERLAP",
            Event::ContextCheckFailed => "CONTEXT_CHECK_FAILED",
            Event::SchemaWritten => "SCHEMA_WRITTEN",
            Event::SchemaUnchanged => "SCHEMA_UNCHANGED",
            Event::SchemaDryRun => "SCHEMA_DRY_RUN",
        }
    }

    /// Event reported for a context diagnostic
    pub fn for_diagnostic(diagnostic: &Diagnostic) -> Self {
        match diagnostic {
            Diagnostic::NoMatch { .. } => Event::ContextNoMatch,
            Diagnostic::Overlap { .. } => Event::ContextOverlap,
            Diagnostic::EvaluationFailed { .. } => Event::ContextCheckFailed,
        }
    }

    /// Returns true if the event means no output was produced
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::CompileFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::CompileStart,
            Event::CompileComplete,
            Event::CompileFailed,
            Event::ConfigLoaded,
            Event::ContextNoMatch,
            Event::ContextOverlap,
            Event::ContextCheckFailed,
            Event::SchemaWritten,
            Event::SchemaUnchanged,
            Event::SchemaDryRun,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_diagnostic_events_match_diagnostic_kind() {
        let diagnostics = [
            Diagnostic::NoMatch {
                pattern_id: "a".into(),
                context: "/x".into(),
            },
            Diagnostic::Overlap {
                pattern_id: "a".into(),
                context: "/x".into(),
                already_visited: 1,
                newly_visited: 0,
            },
            Diagnostic::EvaluationFailed {
                pattern_id: "a".into(),
                context: "/x[".into(),
                reason: "bad".into(),
            },
        ];

        for diagnostic in &diagnostics {
            assert_eq!(Event::for_diagnostic(diagnostic).as_str(), diagnostic.kind());
        }
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::CompileFailed.is_failure());
        assert!(!Event::SchemaUnchanged.is_failure());
    }
}
