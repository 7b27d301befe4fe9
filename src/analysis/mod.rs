//! Derived statistics over parsed log lines.
//!
//! Nothing in the conversion pipeline depends on these figures; they only enrich the index
//! document and the `stats` command.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{
    Commit, ContentBlock, Conversation, ConversationStats, LogLine, RecordKind, SessionStats,
};

/// `git commit` output: `[branch hash] message`.
pub static COMMIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[\w\-/]+ ([a-f0-9]{7,})\] (.+?)(?:\n|$)").expect("valid commit regex")
});

/// `git push` output suggesting a pull request, e.g. `github.com/owner/repo/pull/new/branch`.
pub static GITHUB_REPO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/([a-zA-Z0-9_-]+/[a-zA-Z0-9_-]+)/pull/new/")
        .expect("valid github repo regex")
});

/// Prompts injected by stop hooks are not listed in the index.
pub const STOP_HOOK_PREFIX: &str = "Stop hook feedback:";

/// `(hash, message)` pairs for every commit line in `text`.
pub fn find_commits(text: &str) -> Vec<(String, String)> {
    COMMIT_PATTERN
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].trim_end_matches('\r').to_string()))
        .collect()
}

/// First `owner/name` found in tool results, if any.
pub fn detect_github_repo(lines: &[LogLine]) -> Option<String> {
    lines
        .iter()
        .flat_map(|line| line.content.iter())
        .filter_map(|block| match block {
            ContentBlock::ToolResult { content, .. } => Some(content.text()),
            _ => None,
        })
        .find_map(|text| GITHUB_REPO_PATTERN.captures(&text).map(|caps| caps[1].to_string()))
}

/// Tool counts, long assistant texts and commits for a run of log lines.
pub fn analyze_conversation<'a, I>(lines: I, long_text_threshold: usize) -> ConversationStats
where
    I: IntoIterator<Item = &'a LogLine>,
{
    let mut stats = ConversationStats::default();

    for line in lines {
        for block in &line.content {
            match block {
                ContentBlock::ToolUse { name, .. } => {
                    let name = if name.is_empty() { "Unknown" } else { name.as_str() };
                    *stats.tool_counts.entry(name.to_string()).or_insert(0) += 1;
                }
                ContentBlock::ToolResult { content, .. } => {
                    for (hash, message) in find_commits(&content.text()) {
                        stats.commits.push(Commit { hash, message, timestamp: line.timestamp });
                    }
                }
                ContentBlock::Text { text }
                    if line.kind == RecordKind::Assistant
                        && text.chars().count() >= long_text_threshold =>
                {
                    stats.long_texts.push(text.clone());
                }
                _ => {}
            }
        }
    }

    stats
}

/// Short display name for a tool in summaries.
pub fn tool_abbreviation(name: &str) -> String {
    match name {
        "Bash" => "bash".to_string(),
        "Read" => "read".to_string(),
        "Write" => "write".to_string(),
        "Edit" => "edit".to_string(),
        "Glob" => "glob".to_string(),
        "Grep" => "grep".to_string(),
        "Task" => "task".to_string(),
        "TodoWrite" => "todo".to_string(),
        "WebFetch" => "fetch".to_string(),
        "WebSearch" => "search".to_string(),
        other => other.to_lowercase(),
    }
}

/// `"3 bash · 2 read · 1 todo"`: highest counts first, ties by name.
pub fn format_tool_stats(tool_counts: &BTreeMap<String, usize>) -> String {
    let mut counts: Vec<(&String, &usize)> = tool_counts.iter().collect();
    // BTreeMap order is by name, so a stable sort on count keeps ties alphabetical
    counts.sort_by(|a, b| b.1.cmp(a.1));

    counts
        .into_iter()
        .map(|(name, count)| format!("{count} {}", tool_abbreviation(name)))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Whether a conversation gets its own entry in the index timeline.
pub fn is_indexed_prompt(conversation: &Conversation) -> bool {
    match conversation.user_text.as_deref() {
        Some(text) => !conversation.is_continuation && !text.starts_with(STOP_HOOK_PREFIX),
        None => false,
    }
}

/// Session-wide totals.
pub fn session_stats<'a, I>(
    conversations: I,
    pages: usize,
    long_text_threshold: usize,
) -> SessionStats
where
    I: IntoIterator<Item = &'a Conversation>,
{
    let mut stats = SessionStats { pages, ..SessionStats::default() };

    for conversation in conversations {
        if is_indexed_prompt(conversation) {
            stats.prompts += 1;
        }
        stats.messages += conversation.lines.len();
        let figures = analyze_conversation(&conversation.lines, long_text_threshold);
        stats.tool_calls += figures.tool_calls();
        stats.commits += figures.commits.len();
    }

    stats
}
