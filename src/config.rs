//! Conversion settings.
//!
//! Everything the pipeline needs to know is carried in a [`TranscriptConfig`] value that the
//! caller builds and passes down explicitly. Nothing is read from process-wide state.

use std::path::PathBuf;

/// Default number of conversations placed on one page.
pub const DEFAULT_PROMPTS_PER_PAGE: usize = 5;

/// Text blocks at least this long are listed under their prompt in the index.
pub const DEFAULT_LONG_TEXT_THRESHOLD: usize = 300;

/// How conversations are packed into pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBudget {
    /// Maximum conversations per page (at least 1).
    pub max_conversations: usize,
    /// Optional cap on the estimated content size of a page, in bytes.
    pub max_bytes: Option<usize>,
}

impl PageBudget {
    pub fn new(max_conversations: usize, max_bytes: Option<usize>) -> Self {
        Self { max_conversations: max_conversations.max(1), max_bytes }
    }
}

impl Default for PageBudget {
    fn default() -> Self {
        Self { max_conversations: DEFAULT_PROMPTS_PER_PAGE, max_bytes: None }
    }
}

/// Limits applied to large tool inputs and outputs before display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationPolicy {
    pub max_chars: usize,
    pub max_lines: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self { max_chars: 20_000, max_lines: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptConfig {
    pub budget: PageBudget,
    pub truncation: TruncationPolicy,
    /// `owner/name`; detected from the session when `None`.
    pub github_repo: Option<String>,
    /// Base for shortening file paths; falls back to the session's recorded `cwd`.
    pub working_dir: Option<PathBuf>,
    pub long_text_threshold: usize,
    /// Include `agent-*` sub-agent sessions during batch conversion.
    pub include_agents: bool,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            budget: PageBudget::default(),
            truncation: TruncationPolicy::default(),
            github_repo: None,
            working_dir: None,
            long_text_threshold: DEFAULT_LONG_TEXT_THRESHOLD,
            include_agents: false,
        }
    }
}

impl TranscriptConfig {
    pub fn with_budget(mut self, budget: PageBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_github_repo(mut self, repo: Option<String>) -> Self {
        self.github_repo = repo;
        self
    }

    pub fn with_working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn with_include_agents(mut self, include: bool) -> Self {
        self.include_agents = include;
        self
    }
}
