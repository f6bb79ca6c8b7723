//! Rule table records

use serde::Deserialize;

/// One record of the rule table.
///
/// Field values are trimmed by the reader. Empty strings mean "no value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleRow {
    #[serde(rename = "phase title")]
    pub phase_title: String,
    #[serde(rename = "phase see", default)]
    pub phase_see: String,
    #[serde(rename = "pattern title")]
    pub pattern_title: String,
    #[serde(rename = "pattern see", default)]
    pub pattern_see: String,
    #[serde(rename = "rule context")]
    pub rule_context: String,
    #[serde(rename = "rule title", default)]
    pub rule_title: String,
    #[serde(rename = "assert test")]
    pub assert_test: String,
    #[serde(rename = "assert description", default)]
    pub assert_description: String,
    #[serde(rename = "assert severity")]
    pub assert_severity: String,
}

/// Columns every table must declare
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "phase title",
    "pattern title",
    "rule context",
    "assert test",
    "assert severity",
];
