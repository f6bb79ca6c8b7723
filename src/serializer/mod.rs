//! Schema serializer
//!
//! Renders the compiled model to canonical Schematron XML and writes it with
//! idempotent-write semantics.

mod errors;
mod output;
mod writer;

pub use errors::{SerializeError, SerializeResult};
pub use output::{output_changed, write_if_changed, WriteOutcome, WritePolicy};
pub use writer::render;
