//! Rule context coverage diagnostics
//!
//! The downstream engine treats a rule whose context matches no node as
//! satisfied, which silently disables the rule. Checking every context
//! against a known-good exemplar surfaces that at compile time:
//!
//! - a context matching nothing (other than the root selector) is reported
//! - a context re-matching nodes an earlier rule of the same pattern already
//!   matched is reported as an overlap (only the first matching rule fires)
//! - a context that fails to evaluate is reported with the failure text
//!
//! All diagnostics are advisory.

use std::fmt;

use super::registry::CoverageRegistry;
use super::selector::ContextSelector;
use crate::model::{Pattern, Schema, ROOT_CONTEXT};

/// Advisory finding about one rule context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Context matched no node of the exemplar
    NoMatch { pattern_id: String, context: String },
    /// Context matched nodes already matched earlier in the pattern
    Overlap {
        pattern_id: String,
        context: String,
        already_visited: usize,
        newly_visited: usize,
    },
    /// Context could not be evaluated
    EvaluationFailed {
        pattern_id: String,
        context: String,
        reason: String,
    },
}

impl Diagnostic {
    /// Returns the diagnostic kind as a log event name
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::NoMatch { .. } => "CONTEXT_NO_MATCH",
            Diagnostic::Overlap { .. } => "CONTEXT_OVERLAP",
            Diagnostic::EvaluationFailed { .. } => "CONTEXT_CHECK_FAILED",
        }
    }

    pub fn pattern_id(&self) -> &str {
        match self {
            Diagnostic::NoMatch { pattern_id, .. }
            | Diagnostic::Overlap { pattern_id, .. }
            | Diagnostic::EvaluationFailed { pattern_id, .. } => pattern_id,
        }
    }

    pub fn context(&self) -> &str {
        match self {
            Diagnostic::NoMatch { context, .. }
            | Diagnostic::Overlap { context, .. }
            | Diagnostic::EvaluationFailed { context, .. } => context,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoMatch { context, .. } => {
                write!(f, "found no matches with exemplar for rule context: {}", context)
            }
            Diagnostic::Overlap {
                context,
                already_visited,
                newly_visited,
                ..
            } => write!(
                f,
                "rule matches nodes that have already been visited in this pattern: \
                 matched and already visited: {}; matched and unvisited: {}; context: {}",
                already_visited, newly_visited, context
            ),
            Diagnostic::EvaluationFailed {
                context, reason, ..
            } => write!(f, "failed to check rule: {}; context: {}", reason, context),
        }
    }
}

/// Coverage check for a single pattern.
///
/// Owns a fresh registry; drop it when the pattern is done.
pub struct PatternCoverage<'s, S: ContextSelector + 's> {
    selector: &'s S,
    pattern_id: String,
    registry: CoverageRegistry<S::Node<'s>>,
}

impl<'s, S: ContextSelector + 's> PatternCoverage<'s, S> {
    pub fn new(selector: &'s S, pattern_id: impl Into<String>) -> Self {
        Self {
            selector,
            pattern_id: pattern_id.into(),
            registry: CoverageRegistry::new(),
        }
    }

    /// Checks one rule context, in rule order.
    pub fn check_context(&mut self, context: &str) -> Vec<Diagnostic> {
        let nodes = match self.selector.select(context) {
            Ok(nodes) => nodes,
            Err(reason) => {
                return vec![Diagnostic::EvaluationFailed {
                    pattern_id: self.pattern_id.clone(),
                    context: context.to_string(),
                    reason,
                }]
            }
        };

        let visit = self.registry.record(nodes);
        let mut diagnostics = Vec::new();

        if !visit.matched_any() && context != ROOT_CONTEXT {
            diagnostics.push(Diagnostic::NoMatch {
                pattern_id: self.pattern_id.clone(),
                context: context.to_string(),
            });
        }

        if visit.overlaps() {
            diagnostics.push(Diagnostic::Overlap {
                pattern_id: self.pattern_id.clone(),
                context: context.to_string(),
                already_visited: visit.already_visited,
                newly_visited: visit.newly_visited,
            });
        }

        diagnostics
    }
}

/// Checks every rule of `pattern` with a fresh registry.
pub fn check_pattern<S: ContextSelector>(selector: &S, pattern: &Pattern) -> Vec<Diagnostic> {
    let mut coverage = PatternCoverage::new(selector, &pattern.id);
    pattern
        .rules
        .iter()
        .flat_map(|rule| coverage.check_context(&rule.context))
        .collect()
}

/// Checks every pattern of `schema`, pattern by pattern in document order.
pub fn check_schema<S: ContextSelector>(selector: &S, schema: &Schema) -> Vec<Diagnostic> {
    schema
        .patterns()
        .flat_map(|pattern| check_pattern(selector, pattern))
        .collect()
}
