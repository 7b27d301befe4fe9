use chrono::{DateTime, Utc};

use super::content::ContentBlock;

/// The record `type` of a session log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    User,
    Assistant,
    System,
    Other(String),
}

impl RecordKind {
    pub fn from_type(record_type: &str) -> Self {
        match record_type {
            "user" => RecordKind::User,
            "assistant" => RecordKind::Assistant,
            "system" => RecordKind::System,
            other => RecordKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordKind::User => "user",
            RecordKind::Assistant => "assistant",
            RecordKind::System => "system",
            RecordKind::Other(kind) => kind,
        }
    }
}

/// Author role of the message carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
    Unknown,
}

impl Role {
    pub fn from_name(name: &str) -> Self {
        match name {
            "user" | "human" => Role::User,
            "assistant" | "agent" => Role::Assistant,
            "system" => Role::System,
            "tool" => Role::Tool,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
            Role::Unknown => "unknown",
        }
    }
}

impl From<&RecordKind> for Role {
    fn from(kind: &RecordKind) -> Self {
        match kind {
            RecordKind::User => Role::User,
            RecordKind::Assistant => Role::Assistant,
            RecordKind::System => Role::System,
            RecordKind::Other(_) => Role::Unknown,
        }
    }
}

/// One parsed record of a session file. Built once by the parser and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    /// Zero-based position among the session's log lines.
    pub sequence: usize,
    pub kind: RecordKind,
    pub role: Role,
    pub timestamp: Option<DateTime<Utc>>,
    pub content: Vec<ContentBlock>,
    pub uuid: Option<String>,
    pub parent_uuid: Option<String>,
    pub session_id: Option<String>,
    pub model: Option<String>,
    /// Working directory recorded by the session.
    pub cwd: Option<String>,
    /// Summary injected when a session continues after context compaction.
    pub is_compact_summary: bool,
    /// Harness-generated record rather than something the user typed.
    pub is_meta: bool,
    pub is_sidechain: bool,
}

impl LogLine {
    pub fn new(sequence: usize, kind: RecordKind, content: Vec<ContentBlock>) -> Self {
        let role = Role::from(&kind);
        Self {
            sequence,
            kind,
            role,
            timestamp: None,
            content,
            uuid: None,
            parent_uuid: None,
            session_id: None,
            model: None,
            cwd: None,
            is_compact_summary: false,
            is_meta: false,
            is_sidechain: false,
        }
    }

    /// Text blocks joined by newlines; `None` when there are none.
    pub fn text(&self) -> Option<String> {
        let text_parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if text_parts.is_empty() {
            return None;
        }

        let total_len: usize = text_parts.iter().map(|s| s.len()).sum();
        let mut result = String::with_capacity(total_len + text_parts.len() - 1);
        result.push_str(text_parts[0]);
        for text in &text_parts[1..] {
            result.push('\n');
            result.push_str(text);
        }
        Some(result)
    }

    pub fn has_tool_result(&self) -> bool {
        self.content.iter().any(ContentBlock::is_tool_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_roundtrip_names() {
        assert_eq!(RecordKind::from_type("user"), RecordKind::User);
        assert_eq!(RecordKind::from_type("progress").as_str(), "progress");
    }

    #[test]
    fn test_role_defaults_from_kind() {
        let line = LogLine::new(0, RecordKind::Assistant, Vec::new());
        assert_eq!(line.role, Role::Assistant);
    }

    #[test]
    fn test_text_joins_only_text_blocks() {
        let line = LogLine::new(
            0,
            RecordKind::User,
            vec![
                ContentBlock::Text { text: "first".to_string() },
                ContentBlock::Thinking { thinking: "hidden".to_string() },
                ContentBlock::Text { text: "second".to_string() },
            ],
        );
        assert_eq!(line.text().as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn test_text_none_without_text_blocks() {
        let line = LogLine::new(0, RecordKind::User, Vec::new());
        assert!(line.text().is_none());
    }
}
