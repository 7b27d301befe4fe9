//! Packing conversations into pages.
//!
//! Pages are filled greedily under a [`PageBudget`]. A conversation is never split: one that
//! exceeds the budget on its own still gets a page to itself. Navigation links and the
//! [`AnchorIndex`] are computed after every page is known.

pub mod anchors;

use tracing::debug;

pub use anchors::{
    AnchorIndex, AnchorTarget, conversation_anchor, conversation_href, message_anchor, tool_anchor,
};

use crate::config::PageBudget;
use crate::models::{ContentBlock, Conversation, Page, PageLinks, page_file_name};

/// Index document file name.
pub const INDEX_FILE: &str = "index.html";

/// Pages in order plus the anchor lookup built over them.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub pages: Vec<Page>,
    pub anchors: AnchorIndex,
}

impl Pagination {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }
}

/// Rough content size of a conversation in bytes, used for the byte budget.
///
/// Counts text, thinking, code, tool input JSON and tool result text.
pub fn estimate_size(conversation: &Conversation) -> usize {
    conversation.lines.iter().flat_map(|line| line.content.iter()).map(block_size).sum()
}

fn block_size(block: &ContentBlock) -> usize {
    match block {
        ContentBlock::Text { text } => text.len(),
        ContentBlock::Thinking { thinking } => thinking.len(),
        ContentBlock::Code { code, .. } => code.len(),
        ContentBlock::ToolUse { name, input, .. } => name.len() + input.to_string().len(),
        ContentBlock::ToolResult { content, .. } => content.text().len(),
        ContentBlock::Image { data, .. } => data.len(),
        ContentBlock::Unknown { raw, .. } => raw.to_string().len(),
    }
}

/// Split conversations into pages under `budget`.
pub fn paginate(conversations: Vec<Conversation>, budget: &PageBudget) -> Pagination {
    let max_conversations = budget.max_conversations.max(1);

    let mut groups: Vec<Vec<Conversation>> = Vec::new();
    let mut current: Vec<Conversation> = Vec::new();
    let mut current_bytes = 0usize;

    for conversation in conversations {
        let size = if budget.max_bytes.is_some() { estimate_size(&conversation) } else { 0 };

        let over_count = current.len() >= max_conversations;
        let over_bytes = budget.max_bytes.is_some_and(|max| current_bytes + size > max);

        if !current.is_empty() && (over_count || over_bytes) {
            groups.push(std::mem::take(&mut current));
            current_bytes = 0;
        }

        if budget.max_bytes.is_some_and(|max| size > max) {
            debug!(
                conversation = conversation.index,
                size, "Conversation exceeds the page byte budget on its own"
            );
        }

        current_bytes += size;
        current.push(conversation);
    }

    if !current.is_empty() {
        groups.push(current);
    }

    let total_pages = groups.len();
    let pages: Vec<Page> = groups
        .into_iter()
        .enumerate()
        .map(|(i, conversations)| {
            let number = i + 1;
            Page { number, total_pages, conversations, links: page_links(number, total_pages) }
        })
        .collect();

    let anchors = AnchorIndex::build(&pages);
    Pagination { pages, anchors }
}

fn page_links(number: usize, total_pages: usize) -> PageLinks {
    PageLinks {
        prev: (number > 1).then(|| page_file_name(number - 1)),
        next: (number < total_pages).then(|| page_file_name(number + 1)),
        index: INDEX_FILE.to_string(),
    }
}
