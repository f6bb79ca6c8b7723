//! Observability for schematron-gen
//!
//! Structured one-line JSON logs for compilation lifecycle events and
//! context diagnostics.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on compilation
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! The library never logs on its own. Callers (the CLI) log reports.
//!
//! # Usage
//!
//! ```ignore
//! use schematron_gen::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::CompileStart, &[("table", "rules.csv")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{format_line, Logger, Severity};

use crate::coverage::Diagnostic;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    if event.is_failure() {
        Logger::error(event.as_str(), fields);
    } else {
        Logger::info(event.as_str(), fields);
    }
}

/// Log fields describing one diagnostic
pub fn diagnostic_fields(table: &str, diagnostic: &Diagnostic) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("table", table.to_string()),
        ("pattern", diagnostic.pattern_id().to_string()),
        ("context", diagnostic.context().to_string()),
        ("message", diagnostic.to_string()),
    ];
    if let Diagnostic::Overlap {
        already_visited,
        newly_visited,
        ..
    } = diagnostic
    {
        fields.push(("already_visited", already_visited.to_string()));
        fields.push(("newly_visited", newly_visited.to_string()));
    }
    fields
}

/// Log an advisory context diagnostic at WARN
pub fn log_diagnostic(table: &str, diagnostic: &Diagnostic) {
    let fields = diagnostic_fields(table, diagnostic);
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    Logger::warn(Event::for_diagnostic(diagnostic).as_str(), &borrowed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::CompileStart);
        log_event(Event::CompileComplete);
    }

    #[test]
    fn test_overlap_fields_carry_counts() {
        let diagnostic = Diagnostic::Overlap {
            pattern_id: "area_checks".into(),
            context: "/a/b".into(),
            already_visited: 1,
            newly_visited: 3,
        };
        let fields = diagnostic_fields("rules.csv", &diagnostic);
        assert!(fields.contains(&("already_visited", "1".to_string())));
        assert!(fields.contains(&("newly_visited", "3".to_string())));
        assert!(fields.contains(&("pattern", "area_checks".to_string())));
    }

    #[test]
    fn test_no_match_fields() {
        let diagnostic = Diagnostic::NoMatch {
            pattern_id: "a".into(),
            context: "/missing".into(),
        };
        let fields = diagnostic_fields("rules.csv", &diagnostic);
        assert_eq!(fields.len(), 4);
        log_diagnostic("rules.csv", &diagnostic);
    }
}
