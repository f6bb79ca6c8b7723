//! CLI argument definitions using clap
//!
//! Commands:
//! - schematron-gen generate <TABLE>... [--output] [--exemplar] [--dry-run] [--force]
//! - schematron-gen check <TABLE>... [--exemplar]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// schematron-gen - compile rule tables into Schematron schemas
#[derive(Parser, Debug)]
#[command(name = "schematron-gen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile rule tables and write their schemas
    Generate {
        /// Rule table CSV files
        #[arg(required = true)]
        tables: Vec<PathBuf>,

        /// Output path (single table only; defaults to the table path with the output extension)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Known-good XML document used to check rule contexts
        #[arg(long)]
        exemplar: Option<PathBuf>,

        /// Report changes without writing
        #[arg(long)]
        dry_run: bool,

        /// Rewrite outputs even when they are up to date
        #[arg(long, conflicts_with = "dry_run")]
        force: bool,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fail if any schema is missing or out of date
    Check {
        /// Rule table CSV files
        #[arg(required = true)]
        tables: Vec<PathBuf>,

        /// Known-good XML document used to check rule contexts
        #[arg(long)]
        exemplar: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
