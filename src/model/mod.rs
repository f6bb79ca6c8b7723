//! Rule model subsystem
//!
//! Turns rule rows into the Phase -> Pattern -> Rule -> Assert hierarchy and
//! synthesizes the structural prerequisite patterns.
//!
//! # Design Principles
//!
//! - Row order is document order
//! - Ids are derived from titles and unique per document
//! - Every rule has at least one assert, every pattern at least one rule
//! - Construction errors are fatal and name the table row

mod builder;
mod errors;
mod prerequisites;
mod types;

pub use builder::{BuilderState, ModelBuilder};
pub use errors::{ModelError, ModelResult};
pub use prerequisites::{prerequisite_for, with_prerequisites, PREREQUISITE_TITLE_PREFIX};
pub use types::{to_id, Assert, Pattern, Phase, Rule, Schema, Severity, ROOT_CONTEXT};
