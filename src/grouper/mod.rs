//! Partitioning of log lines into conversations.
//!
//! A conversation opens at every genuine user prompt and collects everything after it up to
//! the next one. Tool results travel in `user` records too, so each user record is classified
//! with [`classify_record`] before it is allowed to open a conversation.

use tracing::debug;

use crate::models::{ContentBlock, Conversation, LogLine, RecordKind};

/// How a record is treated when deciding where conversations start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptClass {
    /// Something the user actually typed. Opens a new conversation.
    Prompt,
    /// A `user` record carrying tool output back to the model.
    ToolResponse,
    /// Harness-injected notice (`isMeta`), e.g. command caveats.
    Meta,
    /// A `user` record with nothing displayable.
    Empty,
    /// Assistant, system and any other record type.
    NotUser,
}

/// Classify one record. The checks are applied in this order:
///
/// 1. record type other than `user` → [`PromptClass::NotUser`]
/// 2. `isMeta` set → [`PromptClass::Meta`]
/// 3. any `tool_result` block → [`PromptClass::ToolResponse`]
/// 4. any non-blank text block or any image → [`PromptClass::Prompt`]
/// 5. otherwise → [`PromptClass::Empty`]
///
/// A record holding both a tool result and text is a tool response: the text is commentary
/// attached to the result, not a new request.
pub fn classify_record(line: &LogLine) -> PromptClass {
    if line.kind != RecordKind::User {
        return PromptClass::NotUser;
    }
    if line.is_meta {
        return PromptClass::Meta;
    }
    if line.has_tool_result() {
        return PromptClass::ToolResponse;
    }

    let has_prompt_content = line.content.iter().any(|block| match block {
        ContentBlock::Text { text } => !text.trim().is_empty(),
        ContentBlock::Image { .. } => true,
        _ => false,
    });

    if has_prompt_content { PromptClass::Prompt } else { PromptClass::Empty }
}

/// Group ordered log lines into conversations.
///
/// Every line lands in exactly one conversation and order is preserved. Lines before the
/// first prompt form a leading conversation with no `user_text`.
pub fn group_conversations(lines: Vec<LogLine>) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> = Vec::new();
    let mut current: Option<Conversation> = None;

    for line in lines {
        if classify_record(&line) == PromptClass::Prompt {
            if let Some(done) = current.take() {
                conversations.push(done);
            }
            current = Some(Conversation {
                index: conversations.len(),
                user_text: Some(line.text().unwrap_or_default()),
                timestamp: line.timestamp,
                is_continuation: line.is_compact_summary,
                lines: vec![line],
            });
            continue;
        }

        match current.as_mut() {
            Some(conversation) => conversation.lines.push(line),
            None => {
                debug!(sequence = line.sequence, "Record precedes the first prompt");
                current = Some(Conversation {
                    index: conversations.len(),
                    user_text: None,
                    timestamp: line.timestamp,
                    is_continuation: false,
                    lines: vec![line],
                });
            }
        }
    }

    if let Some(done) = current {
        conversations.push(done);
    }

    conversations
}
