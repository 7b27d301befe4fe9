use serde_json::Value;
use tracing::trace;

use crate::analysis::find_commits;
use crate::models::{ContentBlock, Role, ToolResultContent};
use crate::paginate::tool_anchor;
use crate::render::context::RenderContext;
use crate::render::markdown::{render_code, render_markdown, render_user_text};
use crate::render::markup::{Markup, escape_html};
use crate::render::tools::render_tool_use;
use crate::render::truncate::truncated_pre;
use crate::utils::strip_ansi_codes;

/// Position of a block inside the session, used for anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSite {
    pub conversation: usize,
    pub message: usize,
    pub block: usize,
    pub role: Role,
}

/// Render one content block to markup.
pub fn render_content_block(
    block: &ContentBlock,
    site: BlockSite,
    ctx: &RenderContext<'_>,
) -> Markup {
    trace!(
        kind = block.kind(),
        conversation = site.conversation,
        message = site.message,
        "Rendering block"
    );

    match block {
        ContentBlock::Text { text } => {
            let inner = if site.role == Role::User {
                render_user_text(text)
            } else {
                render_markdown(text)
            };
            wrap("text-block", inner)
        }
        ContentBlock::Thinking { thinking } => {
            let mut out = Markup::raw(r#"<details class="thinking"><summary>Thinking</summary>"#);
            out.push(&render_markdown(thinking));
            out.push_raw("</details>");
            out
        }
        ContentBlock::ToolUse { id, name, input } => {
            let anchor = tool_anchor(site.conversation, site.message, site.block);
            render_tool_use(name, id, input, &anchor, ctx)
        }
        ContentBlock::ToolResult { tool_use_id, content, is_error } => {
            render_tool_result(tool_use_id, content, *is_error, ctx)
        }
        ContentBlock::Image { media_type, data } => render_image(media_type, data),
        ContentBlock::Code { language, code } => {
            wrap("code-block", render_code(code, language.as_deref()))
        }
        ContentBlock::Unknown { kind, raw } => render_unknown(kind, raw, ctx),
    }
}

fn wrap(class: &str, inner: Markup) -> Markup {
    let mut out = Markup::raw(format!(r#"<div class="{class}">"#));
    out.push(&inner);
    out.push_raw("</div>");
    out
}

fn render_tool_result(
    tool_use_id: &str,
    content: &ToolResultContent,
    is_error: bool,
    ctx: &RenderContext<'_>,
) -> Markup {
    let class = if is_error { "tool-result tool-error" } else { "tool-result" };
    let mut out = Markup::raw(format!(r#"<div class="{class}">"#));

    if let Some(target) = ctx.anchors.and_then(|anchors| anchors.tool_target(tool_use_id)) {
        out.push_raw(&format!(
            r#"<a class="tool-call-link" href="{}">↑ tool call</a>"#,
            escape_html(&target.href(ctx.page))
        ));
    }

    let text = strip_ansi_codes(&content.text());

    for (hash, message) in find_commits(&text) {
        out.push(&render_commit_card(&hash, &message, ctx.github_repo));
    }

    if !text.is_empty() {
        let pre_class = if is_error { "tool-output error-output" } else { "tool-output" };
        out.push(&truncated_pre(&text, ctx.truncation, pre_class));
    }

    if let ToolResultContent::Blocks(blocks) = content {
        for block in blocks {
            if let ContentBlock::Image { media_type, data } = block {
                out.push(&render_image(media_type, data));
            }
        }
    }

    if content.is_empty() {
        out.push_raw(r#"<div class="empty-result">(no output)</div>"#);
    }

    out.push_raw("</div>");
    out
}

/// A commit spotted in tool output, linked when the repository is known.
pub fn render_commit_card(hash: &str, message: &str, github_repo: Option<&str>) -> Markup {
    let short: String = hash.chars().take(7).collect();
    let hash_html = match github_repo {
        Some(repo) => format!(
            r#"<a href="https://github.com/{}/commit/{}">{}</a>"#,
            escape_html(repo),
            escape_html(hash),
            escape_html(&short)
        ),
        None => escape_html(&short),
    };
    Markup::raw(format!(
        r#"<div class="commit-card"><span class="commit-icon">📦</span> <code class="commit-hash">{hash_html}</code> <span class="commit-message">{}</span></div>"#,
        escape_html(message)
    ))
}

fn is_displayable_image(media_type: &str, data: &str) -> bool {
    let Some(subtype) = media_type.strip_prefix("image/") else {
        return false;
    };
    !subtype.is_empty()
        && subtype.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
        && !data.is_empty()
        && data
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=' | '\n' | '\r'))
}

fn render_image(media_type: &str, data: &str) -> Markup {
    if is_displayable_image(media_type, data) {
        Markup::raw(format!(
            r#"<div class="image-block"><img src="data:{media_type};base64,{data}" alt="image" loading="lazy"></div>"#
        ))
    } else {
        Markup::raw(format!(
            r#"<div class="image-block image-placeholder">[image: {}]</div>"#,
            escape_html(if media_type.is_empty() { "unknown type" } else { media_type })
        ))
    }
}

fn render_unknown(kind: &str, raw: &Value, ctx: &RenderContext<'_>) -> Markup {
    let label = if kind.is_empty() { "unknown block" } else { kind };
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    let mut out = Markup::raw(format!(
        r#"<div class="unknown-block"><div class="block-kind">{}</div>"#,
        escape_html(label)
    ));
    out.push(&truncated_pre(&pretty, ctx.truncation, "json"));
    out.push_raw("</div>");
    out
}
