use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A git commit spotted in tool output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Derived, read-only figures for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationStats {
    pub tool_counts: BTreeMap<String, usize>,
    pub long_texts: Vec<String>,
    pub commits: Vec<Commit>,
}

impl ConversationStats {
    pub fn tool_calls(&self) -> usize {
        self.tool_counts.values().sum()
    }
}

/// Session-wide totals shown at the top of the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub prompts: usize,
    pub messages: usize,
    pub tool_calls: usize,
    pub commits: usize,
    pub pages: usize,
}
