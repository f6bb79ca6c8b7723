//! Context coverage subsystem
//!
//! Checks rule contexts against an optional exemplar document and reports
//! authoring mistakes as advisory diagnostics.
//!
//! # Design Principles
//!
//! - Visitation state is scoped to one pattern, never global
//! - Diagnostics never abort compilation
//! - Context evaluation failures are reported, not propagated

mod errors;
mod registry;
mod selector;
mod tracker;

pub use errors::{CoverageError, CoverageResult};
pub use registry::{CoverageRegistry, Visit};
pub use selector::{ContextSelector, Exemplar};
pub use tracker::{check_pattern, check_schema, Diagnostic, PatternCoverage};
