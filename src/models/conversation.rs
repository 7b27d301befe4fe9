use chrono::{DateTime, Utc};

use super::log_line::LogLine;

/// A user prompt and every record produced in response, up to the next prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    /// Zero-based position in the session.
    pub index: usize,
    /// Prompt text; `None` for records that precede the first prompt.
    pub user_text: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub lines: Vec<LogLine>,
    /// Started by a compaction summary rather than a typed prompt.
    pub is_continuation: bool,
}

/// Relative hrefs to neighbouring documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub prev: Option<String>,
    pub next: Option<String>,
    pub index: String,
}

/// One output document's worth of conversations.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// One-based page number.
    pub number: usize,
    pub total_pages: usize,
    pub conversations: Vec<Conversation>,
    pub links: PageLinks,
}

impl Page {
    pub fn file_name(&self) -> String {
        page_file_name(self.number)
    }
}

pub fn page_file_name(number: usize) -> String {
    format!("page-{:03}.html", number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_name_is_zero_padded() {
        assert_eq!(page_file_name(1), "page-001.html");
        assert_eq!(page_file_name(42), "page-042.html");
        assert_eq!(page_file_name(1234), "page-1234.html");
    }
}
