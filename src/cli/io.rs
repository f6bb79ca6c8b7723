//! JSON output for the CLI
//!
//! - One JSON object per line (stdout in `run`)
//! - UTF-8 only
//! - Logs never go to stdout

use std::io::Write;

use serde_json::{json, Value};

use super::errors::CliResult;
use crate::compiler::CompileReport;
use crate::coverage::Diagnostic;

/// JSON form of one diagnostic
pub fn diagnostic_json(diagnostic: &Diagnostic) -> Value {
    let mut value = json!({
        "kind": diagnostic.kind(),
        "pattern": diagnostic.pattern_id(),
        "context": diagnostic.context(),
        "message": diagnostic.to_string(),
    });
    if let Diagnostic::Overlap {
        already_visited,
        newly_visited,
        ..
    } = diagnostic
    {
        value["already_visited"] = json!(already_visited);
        value["newly_visited"] = json!(newly_visited);
    }
    value
}

/// JSON form of a compile report
pub fn report_json(table: &str, report: &CompileReport) -> Value {
    json!({
        "table": table,
        "output": report.output_path.display().to_string(),
        "changed": report.changed,
        "written": report.written,
        "phases": report.phase_count,
        "patterns": report.pattern_count,
        "diagnostics": report.diagnostics.iter().map(diagnostic_json).collect::<Vec<_>>(),
    })
}

/// Write a success response line
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Write an error response line
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(writer, &response)
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
