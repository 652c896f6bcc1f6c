//! JSON I/O handling for CLI
//!
//! - Input: attribute text from a file or stdin, passed through unparsed
//! - Output: one JSON object on stdout per command
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::attributes::ValidationReport;

use super::errors::{CliError, CliResult};

/// Reads raw attribute text. Parsing is the validator's job, so malformed
/// text is returned as-is.
pub fn read_attributes(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read '{}': {}", path.display(), e))
        }),
        None => {
            let mut text = String::new();
            io::stdin().lock().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Builds the response for a validation report
pub fn report_response(report: &ValidationReport, all: bool) -> Value {
    match report.first() {
        None => json!({
            "status": "ok",
            "data": { "valid": true }
        }),
        Some(first) if all => json!({
            "status": "invalid",
            "error": first.message,
            "errors": report.violations
        }),
        Some(first) => json!({
            "status": "invalid",
            "error": first.message
        }),
    }
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_json(&json!({
        "status": "ok",
        "data": data
    }))
}

/// Write any JSON value to stdout as one line
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
