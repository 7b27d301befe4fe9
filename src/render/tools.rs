//! Tool call rendering.
//!
//! Well-known tools get a dedicated view built from a typed decoding of their input. Any tool
//! whose input does not decode, and every other tool, falls back to pretty-printed JSON.

use serde::Deserialize;
use serde_json::Value;

use crate::render::context::RenderContext;
use crate::render::markdown::render_json;
use crate::render::markup::{Markup, escape_html};
use crate::render::truncate::{truncate, truncated_pre};
use crate::utils::shorten_path;

#[derive(Deserialize)]
struct WriteInput {
    file_path: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct EditInput {
    file_path: String,
    #[serde(default)]
    old_string: String,
    #[serde(default)]
    new_string: String,
    #[serde(default)]
    replace_all: Option<bool>,
}

#[derive(Deserialize)]
struct MultiEditInput {
    file_path: String,
    #[serde(default)]
    edits: Vec<EditPair>,
}

#[derive(Deserialize)]
struct EditPair {
    #[serde(default)]
    old_string: String,
    #[serde(default)]
    new_string: String,
    #[serde(default)]
    replace_all: Option<bool>,
}

#[derive(Deserialize)]
struct BashInput {
    command: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct TodoWriteInput {
    todos: Vec<TodoItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoItem {
    content: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    active_form: Option<String>,
}

#[derive(Deserialize)]
struct ReadInput {
    file_path: String,
    #[serde(default)]
    offset: Option<u64>,
    #[serde(default)]
    limit: Option<u64>,
}

#[derive(Deserialize)]
struct SearchInput {
    pattern: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    glob: Option<String>,
}

/// Render a tool call as an addressable block with id `anchor`.
pub fn render_tool_use(
    name: &str,
    id: &str,
    input: &Value,
    anchor: &str,
    ctx: &RenderContext<'_>,
) -> Markup {
    let body = match name {
        "Write" => WriteInput::deserialize(input).ok().map(|i| render_write(&i, ctx)),
        "Edit" => EditInput::deserialize(input).ok().map(|i| render_edit(&i, ctx)),
        "MultiEdit" => MultiEditInput::deserialize(input).ok().map(|i| render_multi_edit(&i, ctx)),
        "Bash" => BashInput::deserialize(input).ok().map(|i| render_bash(&i, ctx)),
        "TodoWrite" => TodoWriteInput::deserialize(input).ok().map(|i| render_todos(&i)),
        "Read" => ReadInput::deserialize(input).ok().map(|i| render_read(&i, input, ctx)),
        "Glob" | "Grep" => {
            SearchInput::deserialize(input).ok().map(|i| render_search(&i, input, ctx))
        }
        _ => None,
    }
    .unwrap_or_else(|| render_generic_input(input, ctx));

    let mut out = Markup::raw(format!(
        r#"<div class="tool-use" id="{}" data-tool-id="{}"><div class="tool-header"><span class="tool-icon">⚙</span> <span class="tool-name">{}</span></div>"#,
        escape_html(anchor),
        escape_html(id),
        escape_html(name),
    ));
    out.push(&body);
    out.push_raw("</div>");
    out
}

fn file_path_line(path: &str, icon: &str, ctx: &RenderContext<'_>) -> Markup {
    let short = shorten_path(path, ctx.working_dir);
    Markup::raw(format!(
        r#"<div class="file-path" title="{}">{icon} {}</div>"#,
        escape_html(path),
        escape_html(&short)
    ))
}

fn render_write(input: &WriteInput, ctx: &RenderContext<'_>) -> Markup {
    let mut out = Markup::raw(r#"<div class="file-tool write-tool">"#);
    out.push(&file_path_line(&input.file_path, "📝", ctx));
    out.push(&truncated_pre(&input.content, ctx.truncation, "file-content"));
    out.push_raw("</div>");
    out
}

fn edit_sections(old: &str, new: &str, replace_all: bool, ctx: &RenderContext<'_>) -> Markup {
    let mut out = Markup::default();
    if replace_all {
        out.push_raw(r#"<div class="edit-replace-all">replace all</div>"#);
    }
    out.push_raw(r#"<div class="edit-section edit-old"><span class="edit-label">−</span>"#);
    out.push(&truncated_pre(old, ctx.truncation, "edit-content"));
    out.push_raw(r#"</div><div class="edit-section edit-new"><span class="edit-label">+</span>"#);
    out.push(&truncated_pre(new, ctx.truncation, "edit-content"));
    out.push_raw("</div>");
    out
}

fn render_edit(input: &EditInput, ctx: &RenderContext<'_>) -> Markup {
    let mut out = Markup::raw(r#"<div class="file-tool edit-tool">"#);
    out.push(&file_path_line(&input.file_path, "✏️", ctx));
    out.push(&edit_sections(
        &input.old_string,
        &input.new_string,
        input.replace_all.unwrap_or(false),
        ctx,
    ));
    out.push_raw("</div>");
    out
}

fn render_multi_edit(input: &MultiEditInput, ctx: &RenderContext<'_>) -> Markup {
    let mut out = Markup::raw(r#"<div class="file-tool edit-tool multi-edit">"#);
    out.push(&file_path_line(&input.file_path, "✏️", ctx));
    for (i, edit) in input.edits.iter().enumerate() {
        out.push_raw(&format!(
            r#"<div class="edit-step"><div class="edit-step-number">#{}</div>"#,
            i + 1
        ));
        out.push(&edit_sections(
            &edit.old_string,
            &edit.new_string,
            edit.replace_all.unwrap_or(false),
            ctx,
        ));
        out.push_raw("</div>");
    }
    out.push_raw("</div>");
    out
}

fn render_bash(input: &BashInput, ctx: &RenderContext<'_>) -> Markup {
    let mut out = Markup::raw(r#"<div class="bash-tool">"#);
    if let Some(description) = input.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push_raw(r#"<div class="tool-description">"#);
        out.push(&Markup::escape(description));
        out.push_raw("</div>");
    }
    let command = truncate(&input.command, ctx.truncation);
    out.push_raw(r#"<pre class="bash-command"><span class="prompt">$</span> "#);
    out.push(&Markup::escape(&command.text));
    if command.was_truncated() {
        out.push_raw(r#"<span class="truncated"> …</span>"#);
    }
    out.push_raw("</pre></div>");
    out
}

fn render_todos(input: &TodoWriteInput) -> Markup {
    let mut out = Markup::raw(r#"<ul class="todo-list">"#);
    for todo in &input.todos {
        let (status, icon) = match todo.status.as_str() {
            "completed" => ("completed", "✓"),
            "in_progress" => ("in-progress", "◐"),
            _ => ("pending", "○"),
        };
        let label = match (status, todo.active_form.as_deref()) {
            ("in-progress", Some(active)) if !active.is_empty() => active,
            _ => todo.content.as_str(),
        };
        out.push_raw(&format!(
            r#"<li class="todo-item todo-{status}"><span class="todo-icon">{icon}</span> <span class="todo-content">{}</span></li>"#,
            escape_html(label)
        ));
    }
    out.push_raw("</ul>");
    out
}

fn input_details(input: &Value) -> Markup {
    let mut out = Markup::raw(r#"<details class="tool-input"><summary>input</summary>"#);
    out.push(&render_json(input));
    out.push_raw("</details>");
    out
}

fn render_read(input: &ReadInput, raw: &Value, ctx: &RenderContext<'_>) -> Markup {
    let mut out = Markup::raw(r#"<div class="tool-summary">"#);
    out.push(&file_path_line(&input.file_path, "📄", ctx));
    match (input.offset, input.limit) {
        (Some(offset), Some(limit)) => {
            out.push_raw(&format!(
                r#"<span class="line-range">lines {}–{}</span>"#,
                offset,
                offset.saturating_add(limit)
            ));
        }
        (Some(offset), None) => {
            out.push_raw(&format!(r#"<span class="line-range">from line {offset}</span>"#));
        }
        (None, Some(limit)) => {
            out.push_raw(&format!(r#"<span class="line-range">first {limit} lines</span>"#));
        }
        (None, None) => {}
    }
    out.push_raw("</div>");
    out.push(&input_details(raw));
    out
}

fn render_search(input: &SearchInput, raw: &Value, ctx: &RenderContext<'_>) -> Markup {
    let mut out = Markup::raw(r#"<div class="tool-summary"><code class="search-pattern">"#);
    out.push(&Markup::escape(&input.pattern));
    out.push_raw("</code>");
    if let Some(path) = input.path.as_deref() {
        out.push_raw(r#" <span class="search-path">in "#);
        out.push(&Markup::escape(&shorten_path(path, ctx.working_dir)));
        out.push_raw("</span>");
    }
    if let Some(glob) = input.glob.as_deref() {
        out.push_raw(r#" <span class="search-glob">"#);
        out.push(&Markup::escape(glob));
        out.push_raw("</span>");
    }
    out.push_raw("</div>");
    out.push(&input_details(raw));
    out
}

fn render_generic_input(input: &Value, ctx: &RenderContext<'_>) -> Markup {
    if input.as_object().is_some_and(|o| o.is_empty()) || input.is_null() {
        return Markup::default();
    }
    let pretty = serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string());
    truncated_pre(&pretty, ctx.truncation, "tool-input json")
}
