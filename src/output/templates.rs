//! Document templates.
//!
//! Templates only splice [`Markup`] produced by the renderer and escape every plain string they
//! are given, so a finished document never contains unescaped session text.

use chrono::{DateTime, Utc};

use crate::models::{Commit, Page, ProjectInfo, SessionStats, page_file_name};
use crate::output::assets::{SCRIPT_FILE, STYLESHEET_FILE};
use crate::paginate::INDEX_FILE;
use crate::render::{Markup, escape_html, render_commit_card, render_timestamp};
use crate::utils::safe_dir_name;

const TITLE: &str = "Claude Code transcript";

/// Full HTML document. `asset_prefix` is the relative path to the directory holding the assets.
fn document(title: &str, body: &Markup, asset_prefix: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{prefix}{STYLESHEET_FILE}">
<script src="{prefix}{SCRIPT_FILE}" defer></script>
</head>
<body>
<div class="container">
{body}
</div>
</body>
</html>
"#,
        title = escape_html(title),
        prefix = asset_prefix,
    )
}

/// Hrefs a navigation bar points at. `current` of `None` marks the index as the current document.
struct NavTargets<'a> {
    current: Option<usize>,
    total_pages: usize,
    prev: Option<&'a str>,
    next: Option<&'a str>,
    index: &'a str,
}

fn nav_bar(targets: &NavTargets<'_>) -> Markup {
    let mut out = Markup::raw(r#"<nav class="pagination">"#);

    match targets.prev {
        Some(href) => out.push_raw(&format!(r#"<a href="{}">← Prev</a>"#, escape_html(href))),
        None => out.push_raw(r#"<span class="disabled">← Prev</span>"#),
    }

    if targets.current.is_none() {
        out.push_raw(r#"<span class="current">Index</span>"#);
    } else {
        out.push_raw(&format!(
            r#"<a href="{}" class="index-link">Index</a>"#,
            escape_html(targets.index)
        ));
    }

    for page in 1..=targets.total_pages {
        if targets.current == Some(page) {
            out.push_raw(&format!(r#"<span class="current">{page}</span>"#));
        } else {
            out.push_raw(&format!(r#"<a href="{}">{page}</a>"#, page_file_name(page)));
        }
    }

    match targets.next {
        Some(href) => out.push_raw(&format!(r#"<a href="{}">Next →</a>"#, escape_html(href))),
        None => out.push_raw(r#"<span class="disabled">Next →</span>"#),
    }

    out.push_raw("</nav>");
    out
}

/// Navigation bar for the index document; "Next" leads to the first page.
pub fn index_pagination(total_pages: usize) -> Markup {
    let first = (total_pages > 0).then(|| page_file_name(1));
    nav_bar(&NavTargets {
        current: None,
        total_pages,
        prev: None,
        next: first.as_deref(),
        index: INDEX_FILE,
    })
}

/// Navigation bar for a transcript page, following the page's own links.
pub fn page_pagination(page: &Page) -> Markup {
    nav_bar(&NavTargets {
        current: Some(page.number),
        total_pages: page.total_pages,
        prev: page.links.prev.as_deref(),
        next: page.links.next.as_deref(),
        index: &page.links.index,
    })
}

/// One page of the transcript.
pub fn page_document(page: &Page, conversations: &Markup) -> String {
    let nav = page_pagination(page);
    let mut body = Markup::raw(format!(
        r#"<h1><a href="{}">{TITLE}</a> - page {}/{}</h1>"#,
        escape_html(&page.links.index),
        page.number,
        page.total_pages
    ));
    body.push(&nav);
    body.push(conversations);
    body.push(&nav);
    document(&format!("{TITLE} - page {}", page.number), &body, "")
}

/// Index timeline entry for one prompt.
pub fn index_item(
    number: usize,
    href: &str,
    timestamp: Option<&DateTime<Utc>>,
    content: &Markup,
    tool_stats: &str,
    long_texts: &[Markup],
) -> Markup {
    let mut out = Markup::raw(format!(
        r#"<div class="index-item"><div class="index-item-header"><a class="index-item-number" href="{}">#{number}</a>"#,
        escape_html(href)
    ));
    if let Some(timestamp) = timestamp {
        out.push(&render_timestamp(timestamp));
    }
    out.push_raw(r#"</div><div class="index-item-content">"#);
    out.push(content);
    out.push_raw("</div>");

    if !tool_stats.is_empty() || !long_texts.is_empty() {
        out.push_raw(r#"<div class="index-item-stats">"#);
        if !tool_stats.is_empty() {
            out.push_raw("<span>");
            out.push(&Markup::escape(tool_stats));
            out.push_raw("</span>");
        }
        for text in long_texts {
            out.push_raw(r#"<div class="index-long-text">"#);
            out.push(text);
            out.push_raw("</div>");
        }
        out.push_raw("</div>");
    }

    out.push_raw("</div>");
    out
}

/// Index timeline entry for a commit.
pub fn commit_item(commit: &Commit, github_repo: Option<&str>) -> Markup {
    let mut out = Markup::raw(r#"<div class="index-item index-commit">"#);
    if let Some(timestamp) = &commit.timestamp {
        out.push_raw(r#"<div class="index-item-header">"#);
        out.push(&render_timestamp(timestamp));
        out.push_raw("</div>");
    }
    out.push(&render_commit_card(&commit.hash, &commit.message, github_repo));
    out.push_raw("</div>");
    out
}

/// The session's index document.
pub fn index_document(stats: &SessionStats, items: &Markup) -> String {
    let nav = index_pagination(stats.pages);
    let mut body = Markup::raw(format!("<h1>{TITLE}</h1>"));
    body.push(&nav);
    body.push_raw(&format!(
        r#"<p class="stats">{} prompts · {} messages · {} tool calls · {} commits · {} pages</p>"#,
        stats.prompts, stats.messages, stats.tool_calls, stats.commits, stats.pages
    ));
    body.push(items);
    body.push(&nav);
    document(TITLE, &body, "")
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 { format!("{count} {noun}") } else { format!("{count} {noun}s") }
}

fn format_date(timestamp: Option<DateTime<Utc>>, fmt: &str) -> String {
    timestamp.map(|t| t.format(fmt).to_string()).unwrap_or_else(|| "N/A".to_string())
}

/// Listing of one project's sessions. Lives in `<output>/<project>/`.
pub fn project_index(project: &ProjectInfo) -> String {
    let mut body = Markup::raw(r#"<h1><a href="../index.html">Projects</a> / "#);
    body.push(&Markup::escape(&project.name));
    body.push_raw("</h1>");
    body.push_raw(&format!(
        r#"<p class="stats">{}</p><ul class="session-list">"#,
        plural(project.sessions.len(), "session")
    ));

    for session in &project.sessions {
        let session_dir = safe_dir_name(&session.name());
        body.push_raw(&format!(
            r#"<li><a href="{}/index.html">"#,
            escape_html(&session_dir)
        ));
        body.push(&Markup::escape(&session.summary));
        body.push_raw(&format!(
            r#"</a><div class="meta-line">{} · {:.1} KB · {}</div></li>"#,
            escape_html(&format_date(session.modified, "%Y-%m-%d %H:%M")),
            session.size_bytes as f64 / 1024.0,
            escape_html(&session.name())
        ));
    }

    body.push_raw("</ul>");
    document(&format!("{} - {TITLE}s", project.name), &body, "../")
}

/// Listing of every project. `dir_names` holds each project's output directory, in order.
pub fn master_index(projects: &[ProjectInfo], dir_names: &[String]) -> String {
    let total_sessions: usize = projects.iter().map(|p| p.sessions.len()).sum();
    let mut body = Markup::raw(format!("<h1>{TITLE}s</h1>"));

    if projects.is_empty() {
        body.push_raw(r#"<p class="stats">No projects found.</p>"#);
        return document(&format!("{TITLE}s"), &body, "");
    }

    body.push_raw(&format!(
        r#"<p class="stats">{} · {}</p><ul class="project-list">"#,
        plural(projects.len(), "project"),
        plural(total_sessions, "session")
    ));

    for (project, dir_name) in projects.iter().zip(dir_names) {
        body.push_raw(&format!(r#"<li><a href="{}/index.html">"#, escape_html(dir_name)));
        body.push(&Markup::escape(&project.name));
        body.push_raw(&format!(
            r#"</a><div class="meta-line">{} · last active {}</div></li>"#,
            plural(project.sessions.len(), "session"),
            escape_html(&format_date(project.most_recent(), "%Y-%m-%d"))
        ));
    }

    body.push_raw("</ul>");
    document(&format!("{TITLE}s"), &body, "")
}
