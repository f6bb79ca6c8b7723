//! CLI command implementations
//!
//! Each table is compiled independently with the same configuration. The
//! first failing table stops the run; outputs already written stay.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::compiler::{CompileReport, CompileRequest, Compiler};
use crate::config::CompilerConfig;
use crate::observability::{log_diagnostic, log_event_with_fields, Event};
use crate::serializer::WritePolicy;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{report_json, write_error, write_response};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let mut stdout = io::stdout();
    let result = match cmd {
        Command::Generate {
            tables,
            output,
            exemplar,
            dry_run,
            force,
            config,
        } => {
            let policy = WritePolicy { dry_run, force };
            generate(
                &tables,
                output.as_deref(),
                exemplar.as_deref(),
                policy,
                config.as_deref(),
                &mut stdout,
            )
            .map(|_| ())
        }
        Command::Check {
            tables,
            exemplar,
            config,
        } => check(
            &tables,
            exemplar.as_deref(),
            config.as_deref(),
            &mut stdout,
        )
        .map(|_| ()),
    };

    if let Err(e) = &result {
        write_error(&mut stdout, e.code_str(), e.message())?;
    }
    result
}

/// Compile every table, writing outputs according to `policy`.
///
/// One response line per table goes to `out`.
pub fn generate<W: Write>(
    tables: &[PathBuf],
    output: Option<&Path>,
    exemplar: Option<&Path>,
    policy: WritePolicy,
    config: Option<&Path>,
    out: &mut W,
) -> CliResult<Vec<CompileReport>> {
    if output.is_some() && tables.len() > 1 {
        return Err(CliError::invalid_arguments(
            "--output can only be used with a single table",
        ));
    }

    let compiler = Compiler::new(load_config(config)?);
    let mut reports = Vec::with_capacity(tables.len());

    for table in tables {
        let mut request = CompileRequest::new(table).policy(policy);
        request.output_path = output.map(Path::to_path_buf);
        request.exemplar_path = exemplar.map(Path::to_path_buf);

        let report = compile_table(&compiler, &request)?;
        write_response(out, report_json(&table.display().to_string(), &report))?;
        reports.push(report);
    }

    Ok(reports)
}

/// Dry-run every table and fail if any output is missing or out of date.
pub fn check<W: Write>(
    tables: &[PathBuf],
    exemplar: Option<&Path>,
    config: Option<&Path>,
    out: &mut W,
) -> CliResult<Vec<CompileReport>> {
    let reports = generate(tables, None, exemplar, WritePolicy::dry_run(), config, out)?;

    let stale: Vec<String> = reports
        .iter()
        .filter(|r| r.changed)
        .map(|r| r.output_path.display().to_string())
        .collect();

    if !stale.is_empty() {
        return Err(CliError::stale_output(&stale));
    }

    Ok(reports)
}

/// Load configuration, or the defaults when no path is given
fn load_config(path: Option<&Path>) -> CliResult<CompilerConfig> {
    match path {
        Some(path) => {
            let config = CompilerConfig::load(path)?;
            let shown = path.display().to_string();
            log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
            Ok(config)
        }
        None => Ok(CompilerConfig::default()),
    }
}

/// Compile one table and log its lifecycle
fn compile_table(compiler: &Compiler, request: &CompileRequest) -> CliResult<CompileReport> {
    let table = request.table_path.display().to_string();
    log_event_with_fields(Event::CompileStart, &[("table", table.as_str())]);

    let report = match compiler.compile(request) {
        Ok(report) => report,
        Err(e) => {
            let error = e.to_string();
            log_event_with_fields(
                Event::CompileFailed,
                &[
                    ("table", table.as_str()),
                    ("code", e.code()),
                    ("error", error.as_str()),
                ],
            );
            return Err(CliError::compile_failed(&table, &e));
        }
    };

    for diagnostic in &report.diagnostics {
        log_diagnostic(&table, diagnostic);
    }

    let output = report.output_path.display().to_string();
    let outcome = if report.written {
        Event::SchemaWritten
    } else if request.policy.dry_run {
        Event::SchemaDryRun
    } else {
        Event::SchemaUnchanged
    };
    log_event_with_fields(
        outcome,
        &[("output", output.as_str()), ("changed", bool_str(report.changed))],
    );

    let phases = report.phase_count.to_string();
    let patterns = report.pattern_count.to_string();
    let diagnostics = report.diagnostics.len().to_string();
    log_event_with_fields(
        Event::CompileComplete,
        &[
            ("table", table.as_str()),
            ("phases", phases.as_str()),
            ("patterns", patterns.as_str()),
            ("diagnostics", diagnostics.as_str()),
        ],
    );

    Ok(report)
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "phase title,phase see,pattern title,pattern see,rule context,rule title,assert test,assert description,assert severity";

    fn write_table(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("{}\n{}", HEADER, body)).unwrap();
        path
    }

    fn responses(out: &[u8]) -> Vec<Value> {
        std::str::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_generate_writes_then_reports_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let table = write_table(temp_dir.path(), "rules.csv", "P1,,Area Checks,,/a,,x=1,,ERROR\n");
        let tables = vec![table];

        let mut out = Vec::new();
        let first = generate(&tables, None, None, WritePolicy::default(), None, &mut out).unwrap();
        assert!(first[0].changed);
        assert!(first[0].written);

        let second = generate(&tables, None, None, WritePolicy::default(), None, &mut out).unwrap();
        assert!(!second[0].changed);
        assert!(!second[0].written);

        let lines = responses(&out);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[0]["data"]["changed"], true);
        assert_eq!(lines[0]["data"]["written"], true);
        assert_eq!(lines[1]["data"]["changed"], false);
        assert_eq!(
            lines[1]["data"]["output"],
            temp_dir.path().join("rules.sch").display().to_string()
        );
    }

    #[test]
    fn test_generate_rejects_output_with_many_tables() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_table(temp_dir.path(), "a.csv", "P1,,A,,/a,,x=1,,ERROR\n");
        let b = write_table(temp_dir.path(), "b.csv", "P1,,B,,/b,,x=1,,ERROR\n");
        let output = temp_dir.path().join("out.sch");

        let mut out = Vec::new();
        let err = generate(&[a, b], Some(&output), None, WritePolicy::default(), None, &mut out)
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidArguments);
        assert!(!output.exists());
        assert!(out.is_empty());
    }

    #[test]
    fn test_generate_compile_failure() {
        let temp_dir = TempDir::new().unwrap();
        let table = write_table(temp_dir.path(), "rules.csv", "P1,,,,/a,,x=1,,ERROR\n");

        let mut out = Vec::new();
        let err = generate(&[table], None, None, WritePolicy::default(), None, &mut out)
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::CompileFailed);
        assert!(err.message().contains("SCHGEN_MISSING_PATTERN_TITLE"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_check_detects_stale_output() {
        let temp_dir = TempDir::new().unwrap();
        let table = write_table(temp_dir.path(), "rules.csv", "P1,,Area Checks,,/a,,x=1,,ERROR\n");
        let tables = vec![table];

        let mut out = Vec::new();
        let err = check(&tables, None, None, &mut out).unwrap_err();
        assert_eq!(err.code_str(), "SCHGEN_CLI_STALE_OUTPUT");
        assert!(!temp_dir.path().join("rules.sch").exists());
        let stale = responses(&out);
        assert_eq!(stale[0]["data"]["changed"], true);
        assert_eq!(stale[0]["data"]["written"], false);

        let mut sink = Vec::new();
        generate(&tables, None, None, WritePolicy::default(), None, &mut sink).unwrap();

        let mut out = Vec::new();
        let reports = check(&tables, None, None, &mut out).unwrap();
        assert!(!reports[0].changed);
        assert_eq!(responses(&out)[0]["data"]["changed"], false);
    }

    #[test]
    fn test_generate_reports_diagnostics() {
        let temp_dir = TempDir::new().unwrap();
        let table = write_table(temp_dir.path(), "rules.csv", "P1,,Area Checks,,/a/z,,x=1,,ERROR\n");
        let exemplar = temp_dir.path().join("exemplar.xml");
        fs::write(&exemplar, "<a><b/></a>").unwrap();

        let mut out = Vec::new();
        generate(&[table], None, Some(&exemplar), WritePolicy::dry_run(), None, &mut out).unwrap();

        let lines = responses(&out);
        let diagnostics = &lines[0]["data"]["diagnostics"];
        assert_eq!(diagnostics[0]["kind"], "CONTEXT_NO_MATCH");
        assert_eq!(diagnostics[0]["context"], "/a/z");
    }

    #[test]
    fn test_generate_with_config() {
        let temp_dir = TempDir::new().unwrap();
        let table = write_table(temp_dir.path(), "rules.csv", "P1,,Area Checks,,/a,,x=1,,ERROR\n");
        let config = temp_dir.path().join("config.json");
        fs::write(&config, r#"{"output_extension": "xml"}"#).unwrap();

        let mut out = Vec::new();
        let reports = generate(
            &[table],
            None,
            None,
            WritePolicy::default(),
            Some(&config),
            &mut out,
        )
        .unwrap();
        assert_eq!(reports[0].output_path, temp_dir.path().join("rules.xml"));
        assert!(reports[0].output_path.exists());
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let table = write_table(temp_dir.path(), "rules.csv", "P1,,Area Checks,,/a,,x=1,,ERROR\n");
        let config = temp_dir.path().join("config.json");
        fs::write(&config, r#"{"output_extension": ""}"#).unwrap();

        let mut out = Vec::new();
        let err = generate(
            &[table],
            None,
            None,
            WritePolicy::default(),
            Some(&config),
            &mut out,
        )
        .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
