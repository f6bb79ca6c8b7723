//! Structural prerequisite patterns
//!
//! The downstream engine treats a rule whose context matches nothing as
//! satisfied. For every authored pattern we therefore synthesize a companion
//! pattern, anchored at the document root, asserting that each of the
//! pattern's contexts matches at least one node.
//!
//! The companion is placed directly before the pattern it guards, inside the
//! same phase.

use std::collections::HashSet;

use super::errors::{ModelError, ModelResult};
use super::types::{Assert, Pattern, Phase, Rule, Schema, Severity, ROOT_CONTEXT};

/// Title prefix of synthesized patterns
pub const PREREQUISITE_TITLE_PREFIX: &str = "Document Structure Prerequisites ";

/// Builds the prerequisite pattern guarding `pattern`.
///
/// The result holds a single root rule with one existence assert per
/// distinct context of `pattern`, in first-seen order.
pub fn prerequisite_for(pattern: &Pattern) -> Pattern {
    let mut prerequisite = Pattern::new(format!("{}{}", PREREQUISITE_TITLE_PREFIX, pattern.title), "");

    let mut rule = Rule::new("", ROOT_CONTEXT);
    rule.asserts = pattern
        .distinct_contexts()
        .into_iter()
        .map(|context| Assert::new(context, "", Severity::Error))
        .collect();

    prerequisite.rules.push(rule);
    prerequisite
}

/// Returns a new schema with a prerequisite pattern before every pattern.
///
/// Each phase's pattern list is rebuilt as `[P1', P1, P2', P2, ...]`.
///
/// # Errors
///
/// `PrerequisiteIdCollision` if a synthesized id equals any phase id,
/// authored pattern id, or another synthesized id.
pub fn with_prerequisites(schema: &Schema) -> ModelResult<Schema> {
    let mut ids: HashSet<&str> = schema.phases.iter().map(|phase| phase.id.as_str()).collect();
    ids.extend(schema.patterns().map(|pattern| pattern.id.as_str()));

    let mut synthesized_ids: HashSet<String> = HashSet::new();
    let mut phases = Vec::with_capacity(schema.phases.len());

    for phase in &schema.phases {
        let mut patterns = Vec::with_capacity(phase.patterns.len() * 2);
        for pattern in &phase.patterns {
            let prerequisite = prerequisite_for(pattern);
            if ids.contains(prerequisite.id.as_str())
                || !synthesized_ids.insert(prerequisite.id.clone())
            {
                return Err(ModelError::PrerequisiteIdCollision { id: prerequisite.id });
            }
            patterns.push(prerequisite);
            patterns.push(pattern.clone());
        }

        phases.push(Phase {
            title: phase.title.clone(),
            id: phase.id.clone(),
            see: phase.see.clone(),
            patterns,
        });
    }

    Ok(Schema::new(phases))
}
