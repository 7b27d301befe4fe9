//! Bounded display of large text with an explicit marker.

use std::borrow::Cow;

use crate::config::TruncationPolicy;
use crate::render::markup::Markup;

/// A possibly shortened prefix of some text and what was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated<'a> {
    pub text: Cow<'a, str>,
    pub omitted_lines: usize,
    pub omitted_chars: usize,
}

impl Truncated<'_> {
    pub fn was_truncated(&self) -> bool {
        self.omitted_chars > 0
    }
}

/// Keep at most `policy.max_lines` lines and `policy.max_chars` characters.
///
/// Cuts always land on a character boundary.
pub fn truncate<'a>(text: &'a str, policy: &TruncationPolicy) -> Truncated<'a> {
    let mut end = text.len();

    // Line limit: end of the max_lines-th line
    if let Some((idx, _)) = text.match_indices('\n').nth(policy.max_lines.saturating_sub(1))
        && idx + 1 < text.len()
    {
        end = idx;
    }

    // Character limit
    if let Some((idx, _)) = text[..end].char_indices().nth(policy.max_chars) {
        end = idx;
    }

    if end >= text.len() {
        return Truncated { text: Cow::Borrowed(text), omitted_lines: 0, omitted_chars: 0 };
    }

    let kept = &text[..end];
    let rest = &text[end..];
    let kept_lines = kept.lines().count().max(1);
    let total_lines = text.lines().count();

    Truncated {
        text: Cow::Borrowed(kept),
        omitted_lines: total_lines.saturating_sub(kept_lines),
        omitted_chars: rest.chars().count(),
    }
}

/// `<pre>` block for `text`, followed by a truncation notice when it was cut.
pub fn truncated_pre(text: &str, policy: &TruncationPolicy, class: &str) -> Markup {
    let truncated = truncate(text, policy);
    let mut out = Markup::raw(format!(r#"<pre class="{class}">"#));
    out.push(&Markup::escape(&truncated.text));
    out.push_raw("</pre>");
    if truncated.was_truncated() {
        out.push(&truncation_notice(&truncated));
    }
    out
}

fn truncation_notice(truncated: &Truncated<'_>) -> Markup {
    let detail = if truncated.omitted_lines > 0 {
        format!("{} more lines, {} characters", truncated.omitted_lines, truncated.omitted_chars)
    } else {
        format!("{} more characters", truncated.omitted_chars)
    };
    Markup::raw(format!(r#"<div class="truncated">… output truncated ({detail})</div>"#))
}
