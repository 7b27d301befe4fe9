//! Decoding of individual session records into [`LogLine`]s.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{ContentBlock, LogLine, RecordKind, Role};
use crate::parsers::deserializers::{deserialize_flag, deserialize_optional_timestamp};

/// Outcome of decoding one JSON record.
#[derive(Debug)]
pub enum Decoded {
    Line(LogLine),
    /// Bookkeeping record without a message (`summary`, `file-history-snapshot`, ...).
    Metadata,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(rename = "type", default)]
    record_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    uuid: Option<String>,
    #[serde(default)]
    parent_uuid: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    cwd: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_compact_summary: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_meta: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_sidechain: bool,
    #[serde(default)]
    message: Option<RawMessage>,
    /// System records carry their text at the top level.
    #[serde(default)]
    content: Option<Value>,
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Option<Value>,
}

/// Decode one record. `sequence` is the position the line will take if kept.
///
/// Fails only when the value is not an object or a known field has the wrong type.
pub fn decode_record(value: Value, sequence: usize) -> Result<Decoded, String> {
    if !value.is_object() {
        return Err(format!("expected a JSON object, found {}", value_kind(&value)));
    }

    let raw = RawRecord::deserialize(value).map_err(|e| e.to_string())?;
    let record_type = raw.record_type.as_deref().unwrap_or_default();

    let (role, model, content) = match raw.message {
        Some(message) => {
            let role = message.role.as_deref().map(Role::from_name);
            (role, message.model, blocks_from_content(message.content))
        }
        None if record_type == "system" => match raw.content {
            Some(Value::String(text)) => (None, None, vec![ContentBlock::Text { text }]),
            _ => return Ok(Decoded::Metadata),
        },
        None => return Ok(Decoded::Metadata),
    };

    let kind = if record_type.is_empty() {
        // No record type: infer it from the message role.
        match role {
            Some(Role::User) => RecordKind::User,
            Some(Role::Assistant) => RecordKind::Assistant,
            Some(Role::System) => RecordKind::System,
            _ => RecordKind::Other(String::new()),
        }
    } else {
        RecordKind::from_type(record_type)
    };

    let mut line = LogLine::new(sequence, kind, content);
    if let Some(role) = role.filter(|r| *r != Role::Unknown) {
        line.role = role;
    }
    line.timestamp = raw.timestamp;
    line.uuid = raw.uuid;
    line.parent_uuid = raw.parent_uuid;
    line.session_id = raw.session_id;
    line.model = model;
    line.cwd = raw.cwd;
    line.is_compact_summary = raw.is_compact_summary;
    line.is_meta = raw.is_meta;
    line.is_sidechain = raw.is_sidechain;

    Ok(Decoded::Line(line))
}

/// `message.content` is either a plain string or an array of typed blocks.
fn blocks_from_content(content: Option<Value>) -> Vec<ContentBlock> {
    match content {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(text)) if text.is_empty() => Vec::new(),
        Some(Value::String(text)) => vec![ContentBlock::Text { text }],
        Some(Value::Array(items)) => items.into_iter().map(ContentBlock::from_value).collect(),
        Some(other) => vec![ContentBlock::from_value(other)],
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
