//! Row-driven model builder
//!
//! Turns the flat rule table into the nested model with an explicit state
//! machine:
//!
//! ```text
//! NoPhase -> InPhase -> InPattern -> InRule
//! ```
//!
//! A row may open a phase, a pattern and a rule at once. Opening a level
//! requires the next level to be opened on the same row, and every row adds
//! exactly one assert to the current rule.

use std::collections::HashSet;

use super::errors::{ModelError, ModelResult};
use super::types::{Assert, Pattern, Phase, Rule, Schema, Severity};
use crate::table::RuleRow;

/// Rows before the first data row (the header)
const HEADER_ROWS: usize = 1;

/// Builder cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuilderState {
    /// No phase opened yet
    NoPhase,
    /// A phase is open but holds no pattern yet
    InPhase,
    /// A pattern is open but holds no rule yet
    InPattern,
    /// A rule is open and accepts asserts
    InRule,
}

/// Builds a `Schema` from rule rows in table order.
///
/// The builder does no I/O. Feed it rows with [`ModelBuilder::push_row`] and
/// take the result with [`ModelBuilder::finish`].
#[derive(Debug)]
pub struct ModelBuilder {
    state: BuilderState,
    phases: Vec<Phase>,
    ids: HashSet<String>,
    rows_consumed: usize,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            state: BuilderState::NoPhase,
            phases: Vec::new(),
            ids: HashSet::new(),
            rows_consumed: 0,
        }
    }

    /// Builds a schema from a complete sequence of rows
    pub fn build<'a, I>(rows: I) -> ModelResult<Schema>
    where
        I: IntoIterator<Item = &'a RuleRow>,
    {
        let mut builder = Self::new();
        for row in rows {
            builder.push_row(row)?;
        }
        Ok(builder.finish())
    }

    /// Current cursor position
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Number of rows accepted so far
    pub fn rows_consumed(&self) -> usize {
        self.rows_consumed
    }

    /// Table row number (1-based, header included) of the next row
    fn next_row_number(&self) -> usize {
        self.rows_consumed + HEADER_ROWS + 1
    }

    /// Consumes one row.
    ///
    /// # Errors
    ///
    /// - `MissingPhaseTitle` if no phase is open and the row opens none
    /// - `MissingPatternTitle` if the row opens a phase without a pattern
    /// - `MissingRuleContext` if the row opens a pattern without a rule
    /// - `MissingAssertTest` if the row carries no assert test
    /// - `UnknownSeverity` if the severity cell is not a known role
    /// - `DuplicateId` if a phase or pattern id was already used
    pub fn push_row(&mut self, row: &RuleRow) -> ModelResult<()> {
        let row_number = self.next_row_number();

        if self.state == BuilderState::NoPhase && row.phase_title.is_empty() {
            return Err(ModelError::MissingPhaseTitle { row: row_number });
        }

        if !row.phase_title.is_empty() {
            if row.pattern_title.is_empty() {
                return Err(ModelError::MissingPatternTitle { row: row_number });
            }
            self.open_phase(Phase::new(&row.phase_title, &row.phase_see), row_number)?;
        }

        if !row.pattern_title.is_empty() {
            if row.rule_context.is_empty() {
                return Err(ModelError::MissingRuleContext { row: row_number });
            }
            self.open_pattern(Pattern::new(&row.pattern_title, &row.pattern_see), row_number)?;
        }

        if !row.rule_context.is_empty() {
            if row.assert_test.is_empty() {
                return Err(ModelError::MissingAssertTest { row: row_number });
            }
            self.open_rule(Rule::new(&row.rule_title, &row.rule_context), row_number)?;
        }

        if row.assert_test.is_empty() {
            return Err(ModelError::MissingAssertTest { row: row_number });
        }

        let severity: Severity = row.assert_severity.parse().map_err(|value| {
            ModelError::UnknownSeverity {
                row: row_number,
                value,
            }
        })?;
        self.add_assert(
            Assert::new(&row.assert_test, &row.assert_description, severity),
            row_number,
        )?;

        self.rows_consumed += 1;
        Ok(())
    }

    /// Finishes building and returns the schema
    pub fn finish(self) -> Schema {
        Schema::new(self.phases)
    }

    fn claim_id(&mut self, id: &str, row: usize) -> ModelResult<()> {
        if !self.ids.insert(id.to_string()) {
            return Err(ModelError::DuplicateId {
                row,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn open_phase(&mut self, phase: Phase, row: usize) -> ModelResult<()> {
        self.claim_id(&phase.id, row)?;
        self.phases.push(phase);
        self.state = BuilderState::InPhase;
        Ok(())
    }

    fn open_pattern(&mut self, pattern: Pattern, row: usize) -> ModelResult<()> {
        if self.state < BuilderState::InPhase {
            return Err(ModelError::MissingPhaseTitle { row });
        }
        self.claim_id(&pattern.id, row)?;
        let phase = self
            .phases
            .last_mut()
            .ok_or(ModelError::MissingPhaseTitle { row })?;
        phase.patterns.push(pattern);
        self.state = BuilderState::InPattern;
        Ok(())
    }

    fn open_rule(&mut self, rule: Rule, row: usize) -> ModelResult<()> {
        if self.state < BuilderState::InPattern {
            return Err(ModelError::MissingPatternTitle { row });
        }
        let pattern = self
            .phases
            .last_mut()
            .and_then(|phase| phase.patterns.last_mut())
            .ok_or(ModelError::MissingPatternTitle { row })?;
        pattern.rules.push(rule);
        self.state = BuilderState::InRule;
        Ok(())
    }

    fn add_assert(&mut self, assert: Assert, row: usize) -> ModelResult<()> {
        if self.state < BuilderState::InRule {
            return Err(ModelError::MissingRuleContext { row });
        }
        let rule = self
            .phases
            .last_mut()
            .and_then(|phase| phase.patterns.last_mut())
            .and_then(|pattern| pattern.rules.last_mut())
            .ok_or(ModelError::MissingRuleContext { row })?;
        rule.asserts.push(assert);
        Ok(())
    }
}
