//! Pipeline orchestration: session file in, linked HTML documents out.
//!
//! [`build_site`] does all the work in memory and is deterministic, so converting the same
//! input twice with the same configuration yields byte-identical documents.
//! [`generate_html`] adds parsing and writing around it.

pub mod batch;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub use batch::{BatchReport, FailedSession, generate_batch_html};

use crate::analysis::{
    analyze_conversation, detect_github_repo, format_tool_stats, is_indexed_prompt, session_stats,
};
use crate::config::TranscriptConfig;
use crate::error::GenerateError;
use crate::grouper::group_conversations;
use crate::models::{Conversation, LogLine};
use crate::output::Site;
use crate::output::templates::{commit_item, index_document, index_item, page_document};
use crate::paginate::{INDEX_FILE, Pagination, conversation_href, paginate};
use crate::parsers::{ParsedSession, parse_session_file};
use crate::render::{Markup, RenderContext, render_conversation, render_markdown, render_user_text};

/// Outcome of converting one session file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub pages: usize,
    /// Conversations rendered, including leading records without a prompt.
    pub conversations: usize,
    /// Prompts listed in the index.
    pub prompts: usize,
    /// Malformed records skipped while parsing.
    pub warnings: usize,
    pub github_repo: Option<String>,
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Convert the session at `path` into `output_dir`.
pub fn generate_html(
    path: &Path,
    output_dir: &Path,
    config: &TranscriptConfig,
) -> Result<GenerationReport, GenerateError> {
    let parsed = parse_session_file(path)?;
    let warnings = parsed.warnings.len();

    let site = build_site(parsed, config);
    if config.github_repo.is_none() && site.github_repo.is_none() {
        warn!(
            path = %path.display(),
            "Could not auto-detect GitHub repo; commit links are disabled"
        );
    }

    let files = site.write_to(output_dir)?;
    info!(
        path = %path.display(),
        output = %output_dir.display(),
        pages = site.stats.pages,
        conversations = site.conversations,
        "Generated transcript"
    );

    Ok(GenerationReport {
        pages: site.stats.pages,
        conversations: site.conversations,
        prompts: site.stats.prompts,
        warnings,
        github_repo: site.github_repo,
        output_dir: output_dir.to_path_buf(),
        files,
    })
}

/// Group, paginate and render a parsed session.
pub fn build_site(parsed: ParsedSession, config: &TranscriptConfig) -> Site {
    let lines = parsed.lines;

    let github_repo = config.github_repo.clone().or_else(|| detect_github_repo(&lines));
    if config.github_repo.is_none()
        && let Some(repo) = &github_repo
    {
        info!(repo = %repo, "Auto-detected GitHub repo");
    }
    let working_dir = config.working_dir.clone().or_else(|| recorded_cwd(&lines));

    let conversations = group_conversations(lines);
    let conversation_count = conversations.len();
    let pagination = paginate(conversations, &config.budget);

    let base_ctx = RenderContext::new(&config.truncation)
        .with_working_dir(working_dir.as_deref())
        .with_github_repo(github_repo.as_deref());

    let mut site = Site::default();
    for page in &pagination.pages {
        let ctx = base_ctx.with_anchors(&pagination.anchors, Some(page.number));
        let body: Markup =
            page.conversations.iter().map(|c| render_conversation(c, &ctx)).collect();
        site.push(page.file_name(), page_document(page, &body));
    }

    let stats = session_stats(
        pagination.pages.iter().flat_map(|p| p.conversations.iter()),
        pagination.total_pages(),
        config.long_text_threshold,
    );

    let items = index_timeline(&pagination, github_repo.as_deref(), config.long_text_threshold);
    site.push(INDEX_FILE, index_document(&stats, &items));

    site.stats = stats;
    site.conversations = conversation_count;
    site.github_repo = github_repo;
    site
}

fn recorded_cwd(lines: &[LogLine]) -> Option<PathBuf> {
    lines.iter().find_map(|line| line.cwd.as_deref()).map(PathBuf::from)
}

/// Prompt and commit entries of the index, stably sorted by timestamp.
fn index_timeline(pagination: &Pagination, github_repo: Option<&str>, threshold: usize) -> Markup {
    let placed: Vec<(usize, &Conversation)> = pagination
        .pages
        .iter()
        .flat_map(|page| page.conversations.iter().map(move |c| (page.number, c)))
        .collect();

    let mut items: Vec<(Option<DateTime<Utc>>, Markup)> = Vec::new();
    let mut prompt_number = 0;

    for (i, (page, conversation)) in placed.iter().enumerate() {
        if let Some(user_text) = conversation.user_text.as_deref()
            && is_indexed_prompt(conversation)
        {
            prompt_number += 1;

            // Continuations that directly follow belong to this prompt
            let following = placed[i + 1..]
                .iter()
                .take_while(|(_, next)| next.is_continuation)
                .flat_map(|(_, next)| next.lines.iter());
            let stats = analyze_conversation(conversation.lines.iter().chain(following), threshold);

            let long_texts: Vec<Markup> =
                stats.long_texts.iter().map(|t| render_markdown(t)).collect();
            items.push((
                conversation.timestamp,
                index_item(
                    prompt_number,
                    &conversation_href(*page, conversation.index),
                    conversation.timestamp.as_ref(),
                    &render_user_text(user_text),
                    &format_tool_stats(&stats.tool_counts),
                    &long_texts,
                ),
            ));
        }

        for commit in analyze_conversation(&conversation.lines, threshold).commits {
            items.push((commit.timestamp, commit_item(&commit, github_repo)));
        }
    }

    items.sort_by_key(|(timestamp, _)| *timestamp);
    items.into_iter().map(|(_, markup)| markup).collect()
}
