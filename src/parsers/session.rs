use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::models::LogLine;
use crate::parsers::records::{Decoded, decode_record};
use crate::utils::validate_file_size;

/// How the session file was laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFormat {
    /// A single JSON document: an array of records, `{"loglines": [...]}`, or one record.
    JsonDocument,
    /// One JSON record per line.
    JsonLines,
}

/// A record that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// One-based line number (JSONL) or array position (JSON document).
    pub position: usize,
    pub message: String,
}

/// Result of parsing one session file.
#[derive(Debug, Clone)]
pub struct ParsedSession {
    pub lines: Vec<LogLine>,
    pub warnings: Vec<ParseWarning>,
    /// Bookkeeping records skipped on purpose (not counted as warnings).
    pub metadata_skipped: usize,
    pub format: SessionFormat,
}

/// Parse a session file, detecting JSON vs JSONL automatically.
///
/// Malformed records are skipped and reported in [`ParsedSession::warnings`]. The call fails
/// only when the file cannot be read or yields no usable records.
pub fn parse_session_file(path: &Path) -> Result<ParsedSession, ParseError> {
    let mut file = File::open(path)
        .map_err(|source| ParseError::Io { path: path.to_path_buf(), source })?;
    validate_file_size(&file, path)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| ParseError::Io { path: path.to_path_buf(), source })?;

    let input = String::from_utf8_lossy(&bytes);
    parse_session_str(&input, path)
}

/// Parse session data already in memory. `source` names the data in errors and logs.
pub fn parse_session_str(input: &str, source: &Path) -> Result<ParsedSession, ParseError> {
    let mut session = match serde_json::from_str::<Value>(input) {
        Ok(document @ (Value::Array(_) | Value::Object(_))) => parse_document(document),
        _ => parse_lines(input, source),
    };

    if session.lines.is_empty() {
        return Err(ParseError::NoRecords {
            path: source.to_path_buf(),
            skipped: session.warnings.len(),
        });
    }

    if !session.warnings.is_empty() {
        warn!(
            path = %source.display(),
            records = session.lines.len(),
            skipped = session.warnings.len(),
            "Parsed session with malformed records skipped"
        );
    }

    // Sequence numbers are assigned as lines are kept, so they already match file order.
    session.lines.shrink_to_fit();
    Ok(session)
}

fn parse_document(document: Value) -> ParsedSession {
    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut object) => match object.remove("loglines") {
            Some(Value::Array(records)) => records,
            Some(_) | None => vec![Value::Object(object)],
        },
        _ => Vec::new(),
    };

    let mut session = ParsedSession {
        lines: Vec::with_capacity(records.len()),
        warnings: Vec::new(),
        metadata_skipped: 0,
        format: SessionFormat::JsonDocument,
    };

    for (index, record) in records.into_iter().enumerate() {
        accept(&mut session, record, index + 1);
    }

    session
}

fn parse_lines(input: &str, source: &Path) -> ParsedSession {
    let mut session = ParsedSession {
        lines: Vec::new(),
        warnings: Vec::new(),
        metadata_skipped: 0,
        format: SessionFormat::JsonLines,
    };

    for (line_num, line) in input.lines().enumerate() {
        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(value) => accept(&mut session, value, line_num + 1),
            Err(e) => {
                warn!(
                    path = %source.display(),
                    line = line_num + 1,
                    error = %e,
                    "Failed to parse JSON line"
                );
                session
                    .warnings
                    .push(ParseWarning { position: line_num + 1, message: e.to_string() });
            }
        }
    }

    session
}

fn accept(session: &mut ParsedSession, value: Value, position: usize) {
    match decode_record(value, session.lines.len()) {
        Ok(Decoded::Line(line)) => session.lines.push(line),
        Ok(Decoded::Metadata) => {
            session.metadata_skipped += 1;
        }
        Err(message) => {
            debug!(position, error = %message, "Skipping malformed record");
            session.warnings.push(ParseWarning { position, message });
        }
    }
}
