//! Compilation driver
//!
//! Pipeline (strict order):
//! 1. Read the rule table
//! 2. Build the rule model (fatal on malformed rows)
//! 3. Load the exemplar, if any, and check rule contexts (advisory)
//! 4. Synthesize prerequisite patterns
//! 5. Render canonical bytes
//! 6. Write with idempotent-write semantics
//!
//! Nothing is written unless steps 1-5 succeed.

use std::path::{Path, PathBuf};

use super::errors::CompileResult;
use crate::config::CompilerConfig;
use crate::coverage::{check_schema, ContextSelector, Diagnostic, Exemplar};
use crate::model::{with_prerequisites, ModelBuilder, Schema};
use crate::serializer::{render, write_if_changed, WritePolicy};
use crate::table::{RuleRow, RuleTable};

/// One compilation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub table_path: PathBuf,
    /// Defaults to the table path with the configured extension
    pub output_path: Option<PathBuf>,
    pub exemplar_path: Option<PathBuf>,
    pub policy: WritePolicy,
}

impl CompileRequest {
    pub fn new(table_path: impl Into<PathBuf>) -> Self {
        Self {
            table_path: table_path.into(),
            output_path: None,
            exemplar_path: None,
            policy: WritePolicy::default(),
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn exemplar(mut self, path: impl Into<PathBuf>) -> Self {
        self.exemplar_path = Some(path.into());
        self
    }

    pub fn policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// An in-memory compilation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSchema {
    /// Model including the synthesized prerequisite patterns
    pub schema: Schema,
    /// Canonical document bytes
    pub bytes: Vec<u8>,
    /// Advisory context diagnostics, in pattern then rule order
    pub diagnostics: Vec<Diagnostic>,
    /// Patterns authored in the table (prerequisites excluded)
    pub authored_patterns: usize,
}

/// Outcome of a compilation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub output_path: PathBuf,
    /// Output was missing or differs from the compiled bytes
    pub changed: bool,
    /// Output file was written
    pub written: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub phase_count: usize,
    pub pattern_count: usize,
}

/// Compiles rule tables into Schematron schemas.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Output path used when a request names none
    pub fn default_output_path(&self, table_path: &Path) -> PathBuf {
        table_path.with_extension(&self.config.output_extension)
    }

    /// Loads an exemplar with the configured target namespace
    pub fn load_exemplar(&self, path: &Path) -> CompileResult<Exemplar> {
        Ok(Exemplar::from_path(
            path,
            vec![self.config.target_namespace.clone()],
        )?)
    }

    /// Compiles rows without touching the filesystem.
    ///
    /// Contexts are checked only when `selector` is given.
    pub fn compile_rows<S: ContextSelector>(
        &self,
        rows: &[RuleRow],
        selector: Option<&S>,
    ) -> CompileResult<CompiledSchema> {
        let authored = ModelBuilder::build(rows)?;

        let diagnostics = match selector {
            Some(selector) => check_schema(selector, &authored),
            None => Vec::new(),
        };

        let schema = with_prerequisites(&authored)?;
        let bytes = render(&schema, &self.config)?;

        Ok(CompiledSchema {
            schema,
            bytes,
            diagnostics,
            authored_patterns: authored.pattern_count(),
        })
    }

    /// Runs a full compilation job.
    ///
    /// # Errors
    ///
    /// Table, model, exemplar and rendering errors abort before any write.
    /// I/O errors are propagated unchanged.
    pub fn compile(&self, request: &CompileRequest) -> CompileResult<CompileReport> {
        let table = RuleTable::from_path(&request.table_path)?;

        let compiled = match &request.exemplar_path {
            Some(path) => {
                let exemplar = self.load_exemplar(path)?;
                self.compile_rows(table.rows(), Some(&exemplar))?
            }
            None => self.compile_rows(table.rows(), None::<&Exemplar>)?,
        };

        let output_path = request
            .output_path
            .clone()
            .unwrap_or_else(|| self.default_output_path(&request.table_path));

        let outcome = write_if_changed(&output_path, &compiled.bytes, request.policy)?;

        Ok(CompileReport {
            output_path,
            changed: outcome.changed,
            written: outcome.written,
            diagnostics: compiled.diagnostics,
            phase_count: compiled.schema.phases.len(),
            pattern_count: compiled.authored_patterns,
        })
    }
}

/// Compiles `table_path` with the default configuration.
///
/// Returns the report; `report.changed` tells whether the output was missing
/// or out of date.
pub fn compile(
    table_path: &Path,
    output_path: Option<&Path>,
    exemplar_path: Option<&Path>,
    dry_run: bool,
) -> CompileResult<CompileReport> {
    let mut request = CompileRequest::new(table_path);
    request.output_path = output_path.map(Path::to_path_buf);
    request.exemplar_path = exemplar_path.map(Path::to_path_buf);
    request.policy.dry_run = dry_run;

    Compiler::default().compile(&request)
}
