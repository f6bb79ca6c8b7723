//! schematron-gen - compiles rule tables into Schematron schemas
//!
//! A rule table (CSV) lists phases, patterns, rules and asserts in a flat,
//! forward-filled layout. The compiler folds it into a hierarchical model,
//! checks rule contexts against an optional exemplar document, adds one
//! structural prerequisite pattern per authored pattern, and writes a
//! canonical schema only when its bytes change.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod coverage;
pub mod model;
pub mod observability;
pub mod serializer;
pub mod table;

pub use compiler::{compile, CompileError, CompileReport, CompileRequest, Compiler};
pub use config::CompilerConfig;
