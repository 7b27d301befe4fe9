//! Positional anchor identifiers and cross-page link resolution.
//!
//! Anchors are derived from positions only (conversation, message and block index), never from
//! content, so re-running a conversion yields the same identifiers.

use std::collections::HashMap;

use crate::models::{ContentBlock, Page, page_file_name};

pub fn conversation_anchor(conversation: usize) -> String {
    format!("conv-{conversation:04}")
}

pub fn message_anchor(conversation: usize, message: usize) -> String {
    format!("msg-{conversation:04}-{message:03}")
}

pub fn tool_anchor(conversation: usize, message: usize, block: usize) -> String {
    format!("tool-{conversation:04}-{message:03}-{block:02}")
}

/// Where an addressable element ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTarget {
    pub page: usize,
    pub anchor: String,
}

impl AnchorTarget {
    /// Relative href to this target from a document showing `from_page`.
    ///
    /// `from_page` of `None` means the index document.
    pub fn href(&self, from_page: Option<usize>) -> String {
        if from_page == Some(self.page) {
            format!("#{}", self.anchor)
        } else {
            format!("{}#{}", page_file_name(self.page), self.anchor)
        }
    }
}

/// Maps tool call ids to the page and anchor of the call.
#[derive(Debug, Clone, Default)]
pub struct AnchorIndex {
    tools: HashMap<String, AnchorTarget>,
}

impl AnchorIndex {
    pub fn build(pages: &[Page]) -> Self {
        let mut tools = HashMap::new();

        for page in pages {
            for conversation in &page.conversations {
                for (m, line) in conversation.lines.iter().enumerate() {
                    for (b, block) in line.content.iter().enumerate() {
                        let ContentBlock::ToolUse { id, .. } = block else {
                            continue;
                        };
                        if id.is_empty() {
                            continue;
                        }
                        // First occurrence wins if a log repeats an id
                        tools.entry(id.clone()).or_insert_with(|| AnchorTarget {
                            page: page.number,
                            anchor: tool_anchor(conversation.index, m, b),
                        });
                    }
                }
            }
        }

        Self { tools }
    }

    pub fn tool_target(&self, tool_use_id: &str) -> Option<&AnchorTarget> {
        self.tools.get(tool_use_id)
    }
}

/// Link to a conversation's anchor from outside its page.
pub fn conversation_href(page: usize, conversation: usize) -> String {
    format!("{}#{}", page_file_name(page), conversation_anchor(conversation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_formats() {
        assert_eq!(conversation_anchor(3), "conv-0003");
        assert_eq!(message_anchor(3, 12), "msg-0003-012");
        assert_eq!(tool_anchor(3, 12, 1), "tool-0003-012-01");
    }

    #[test]
    fn test_href_same_and_other_page() {
        let target = AnchorTarget { page: 2, anchor: "tool-0005-001-00".to_string() };
        assert_eq!(target.href(Some(2)), "#tool-0005-001-00");
        assert_eq!(target.href(Some(1)), "page-002.html#tool-0005-001-00");
        assert_eq!(target.href(None), "page-002.html#tool-0005-001-00");
    }

    #[test]
    fn test_conversation_href() {
        assert_eq!(conversation_href(1, 0), "page-001.html#conv-0000");
    }
}
