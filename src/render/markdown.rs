//! Markdown to markup conversion with raw HTML neutralised.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use serde_json::Value;

use crate::render::markup::{Markup, escape_html};

/// Render markdown text (headings, emphasis, lists, tables, fenced code, inline code).
///
/// Raw HTML in the source is emitted as escaped text, quotes included, and links or images
/// pointing at script-capable URLs are neutralised. Fenced code keeps its whitespace and gets a
/// `language-*` class from the info string.
pub fn render_markdown(text: &str) -> Markup {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);

    // Image alt text is written as an attribute by the html writer, which escapes it itself
    let mut image_depth = 0usize;
    let parser = Parser::new_ext(text, opts).map(move |event| match event {
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            image_depth += 1;
            Event::Start(Tag::Image { link_type, dest_url: safe_url(dest_url), title, id })
        }
        Event::End(TagEnd::Image) => {
            image_depth = image_depth.saturating_sub(1);
            Event::End(TagEnd::Image)
        }
        Event::Html(raw) | Event::InlineHtml(raw) | Event::Text(raw) if image_depth == 0 => {
            Event::Html(CowStr::from(escape_html(&raw)))
        }
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Code(code) if image_depth == 0 => {
            Event::Html(CowStr::from(format!("<code>{}</code>", escape_html(&code))))
        }
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut html_output = String::with_capacity(text.len() + text.len() / 4);
    html::push_html(&mut html_output, parser);
    Markup::raw(html_output)
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lowered = url.trim_start().to_ascii_lowercase();
    let blocked = ["javascript:", "vbscript:", "data:"];
    if blocked.iter().any(|scheme| lowered.starts_with(scheme)) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Parse `text` as JSON when it is shaped like an object or array.
pub fn parse_json_like(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    let shaped = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    if !shaped {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

/// Pretty-printed JSON in a code block.
pub fn render_json(value: &Value) -> Markup {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    Markup::raw(format!(r#"<pre class="json"><code>{}</code></pre>"#, escape_html(&pretty)))
}

/// User prompts: JSON payloads are shown pretty-printed, everything else as markdown.
pub fn render_user_text(text: &str) -> Markup {
    match parse_json_like(text) {
        Some(value) => render_json(&value),
        None => render_markdown(text),
    }
}

/// A code block with the language as a class hint.
pub fn render_code(code: &str, language: Option<&str>) -> Markup {
    let class = language
        .filter(|lang| !lang.trim().is_empty())
        .map(|lang| format!(r#" class="language-{}""#, escape_html(lang.trim())))
        .unwrap_or_default();
    Markup::raw(format!("<pre><code{class}>{}</code></pre>", escape_html(code)))
}
