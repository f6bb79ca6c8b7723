//! CLI module for schematron-gen
//!
//! Provides command-line interface for:
//! - generate: Compile rule tables and write their schemas
//! - check: Fail when committed schemas are missing or out of date

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, generate, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{diagnostic_json, report_json, write_error, write_response};
