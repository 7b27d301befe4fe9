use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One typed unit of message content.
///
/// Decoding goes through a schema-checked intermediate type. Blocks with an unrecognised
/// `type`, or a recognised type with the wrong shape, become [`ContentBlock::Unknown`] with
/// the raw JSON kept for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text { text: String },
    Thinking { thinking: String },
    ToolUse { id: String, name: String, input: Value },
    ToolResult { tool_use_id: String, content: ToolResultContent, is_error: bool },
    Image { media_type: String, data: String },
    Code { language: Option<String>, code: String },
    Unknown { kind: String, raw: Value },
}

/// Payload of a tool result: plain text or nested blocks (text and images).
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResultContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl ToolResultContent {
    /// All text carried by the result, nested text blocks joined by newlines.
    pub fn text(&self) -> String {
        match self {
            ToolResultContent::Text(text) => text.clone(),
            ToolResultContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ToolResultContent::Text(text) => text.is_empty(),
            ToolResultContent::Blocks(blocks) => blocks.is_empty(),
        }
    }

    fn from_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => ToolResultContent::Text(String::new()),
            Some(Value::String(text)) => ToolResultContent::Text(text),
            Some(Value::Array(items)) => {
                ToolResultContent::Blocks(items.into_iter().map(ContentBlock::from_value).collect())
            }
            Some(other) => ToolResultContent::Text(other.to_string()),
        }
    }
}

impl ContentBlock {
    /// Decode a block, falling back to [`ContentBlock::Unknown`] instead of failing.
    pub fn from_value(value: Value) -> Self {
        if let Value::String(text) = value {
            return ContentBlock::Text { text };
        }

        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default().to_string();
        match RawBlock::deserialize(&value) {
            Ok(raw) => raw.into(),
            Err(_) => ContentBlock::Unknown { kind, raw: value },
        }
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, ContentBlock::ToolResult { .. })
    }

    /// Short lowercase name of the variant, used for CSS classes.
    pub fn kind(&self) -> &str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Thinking { .. } => "thinking",
            ContentBlock::ToolUse { .. } => "tool_use",
            ContentBlock::ToolResult { .. } => "tool_result",
            ContentBlock::Image { .. } => "image",
            ContentBlock::Code { .. } => "code",
            ContentBlock::Unknown { kind, .. } => kind,
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentBlock::from_value(value))
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawBlock {
    Text {
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    RedactedThinking {
        #[serde(default)]
        data: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        #[serde(default)]
        tool_use_id: String,
        #[serde(default)]
        content: Option<Value>,
        #[serde(default)]
        is_error: Option<bool>,
    },
    Image {
        source: RawImageSource,
    },
    Code {
        #[serde(default)]
        language: Option<String>,
        code: String,
    },
}

#[derive(Deserialize)]
struct RawImageSource {
    #[serde(default)]
    media_type: String,
    #[serde(default)]
    data: String,
}

impl From<RawBlock> for ContentBlock {
    fn from(raw: RawBlock) -> Self {
        match raw {
            RawBlock::Text { text } => ContentBlock::Text { text },
            RawBlock::Thinking { thinking } => ContentBlock::Thinking { thinking },
            RawBlock::RedactedThinking { data: _ } => {
                ContentBlock::Thinking { thinking: "[redacted thinking]".to_string() }
            }
            RawBlock::ToolUse { id, name, input } => ContentBlock::ToolUse { id, name, input },
            RawBlock::ToolResult { tool_use_id, content, is_error } => ContentBlock::ToolResult {
                tool_use_id,
                content: ToolResultContent::from_value(content),
                is_error: is_error.unwrap_or(false),
            },
            RawBlock::Image { source } => {
                ContentBlock::Image { media_type: source.media_type, data: source.data }
            }
            RawBlock::Code { language, code } => ContentBlock::Code { language, code },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_text_block() {
        let block = ContentBlock::from_value(json!({"type": "text", "text": "hello"}));
        assert_eq!(block, ContentBlock::Text { text: "hello".to_string() });
    }

    #[test]
    fn test_decode_tool_use_block() {
        let block = ContentBlock::from_value(
            json!({"type": "tool_use", "id": "tu_1", "name": "Bash", "input": {"command": "ls"}}),
        );
        match block {
            ContentBlock::ToolUse { id, name, input } => {
                assert_eq!(id, "tu_1");
                assert_eq!(name, "Bash");
                assert_eq!(input["command"], "ls");
            }
            other => panic!("expected ToolUse, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_tool_result_with_nested_blocks() {
        let block = ContentBlock::from_value(json!({
            "type": "tool_result",
            "tool_use_id": "tu_1",
            "content": [{"type": "text", "text": "line one"}, {"type": "text", "text": "line two"}],
            "is_error": true
        }));
        match block {
            ContentBlock::ToolResult { tool_use_id, content, is_error } => {
                assert_eq!(tool_use_id, "tu_1");
                assert!(is_error);
                assert_eq!(content.text(), "line one\nline two");
            }
            other => panic!("expected ToolResult, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_result_null_error_flag_defaults_false() {
        let block = ContentBlock::from_value(
            json!({"type": "tool_result", "tool_use_id": "x", "content": "ok", "is_error": null}),
        );
        assert!(matches!(block, ContentBlock::ToolResult { is_error: false, .. }));
    }

    #[test]
    fn test_unknown_type_is_kept_raw() {
        let raw = json!({"type": "server_tool_use", "payload": {"a": 1}});
        let block = ContentBlock::from_value(raw.clone());
        assert_eq!(block, ContentBlock::Unknown { kind: "server_tool_use".to_string(), raw });
    }

    #[test]
    fn test_known_type_with_wrong_shape_is_unknown() {
        let block = ContentBlock::from_value(json!({"type": "text", "text": 42}));
        assert!(matches!(block, ContentBlock::Unknown { ref kind, .. } if kind == "text"));
    }

    #[test]
    fn test_bare_string_becomes_text() {
        let block = ContentBlock::from_value(json!("plain"));
        assert_eq!(block, ContentBlock::Text { text: "plain".to_string() });
    }

    #[test]
    fn test_redacted_thinking_has_placeholder() {
        let block = ContentBlock::from_value(json!({"type": "redacted_thinking", "data": "xyz"}));
        assert_eq!(block, ContentBlock::Thinking { thinking: "[redacted thinking]".to_string() });
    }

    #[test]
    fn test_image_block() {
        let block = ContentBlock::from_value(json!({
            "type": "image",
            "source": {"type": "base64", "media_type": "image/png", "data": "iVBORw0KGgo="}
        }));
        assert_eq!(
            block,
            ContentBlock::Image {
                media_type: "image/png".to_string(),
                data: "iVBORw0KGgo=".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_from_json_array() {
        let blocks: Vec<ContentBlock> = serde_json::from_str(
            r#"[{"type":"text","text":"a"},{"type":"mystery"},{"type":"code","code":"fn main() {}","language":"rust"}]"#,
        )
        .unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].kind(), "mystery");
        assert!(matches!(&blocks[2], ContentBlock::Code { language: Some(l), .. } if l == "rust"));
    }
}
