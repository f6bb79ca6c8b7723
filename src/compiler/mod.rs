//! Compilation driver subsystem
//!
//! Orchestrates table reading, model building, context diagnostics,
//! prerequisite synthesis, rendering and the idempotent write, and reports
//! whether the output changed.

mod driver;
mod errors;

pub use driver::{compile, CompileReport, CompileRequest, CompiledSchema, Compiler};
pub use errors::{CompileError, CompileResult};
