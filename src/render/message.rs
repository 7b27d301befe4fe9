use chrono::{DateTime, SecondsFormat, Utc};

use crate::grouper::{PromptClass, classify_record};
use crate::models::{Conversation, LogLine, Role};
use crate::paginate::{conversation_anchor, message_anchor};
use crate::render::blocks::{BlockSite, render_content_block};
use crate::render::context::RenderContext;
use crate::render::markup::{Markup, escape_html};

/// `<time>` element for a timestamp.
pub fn render_timestamp(timestamp: &DateTime<Utc>) -> Markup {
    Markup::raw(format!(
        r#"<time datetime="{}">{}</time>"#,
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ))
}

fn message_style(line: &LogLine) -> (&'static str, &'static str) {
    match classify_record(line) {
        PromptClass::ToolResponse => ("user tool-reply", "Tool reply"),
        PromptClass::Meta => ("user meta", "Notice"),
        PromptClass::Prompt | PromptClass::Empty => ("user", "User"),
        PromptClass::NotUser => match line.role {
            Role::Assistant => ("assistant", "Assistant"),
            Role::System => ("system", "System"),
            Role::Tool => ("tool", "Tool"),
            Role::User => ("user", "User"),
            Role::Unknown => ("other", "Record"),
        },
    }
}

/// Render one log line as an `<article>` with id `msg-CCCC-MMM`.
pub fn render_message(
    line: &LogLine,
    conversation: usize,
    message: usize,
    ctx: &RenderContext<'_>,
) -> Markup {
    let anchor = message_anchor(conversation, message);
    let (class, label) = message_style(line);
    let sidechain = if line.is_sidechain { " sidechain" } else { "" };

    let mut out = Markup::raw(format!(
        r#"<article class="message {class}{sidechain}" id="{anchor}"><header class="message-header"><span class="role-label">{label}</span>"#
    ));
    if let Some(model) = line.model.as_deref() {
        out.push_raw(r#"<span class="model">"#);
        out.push(&Markup::escape(model));
        out.push_raw("</span>");
    }
    out.push_raw(&format!(r##"<a class="anchor-link" href="#{anchor}">"##));
    match &line.timestamp {
        Some(timestamp) => out.push(&render_timestamp(timestamp)),
        None => out.push_raw("#"),
    }
    out.push_raw(r#"</a></header><div class="message-content">"#);

    for (block, content) in line.content.iter().enumerate() {
        let site = BlockSite { conversation, message, block, role: line.role };
        out.push(&render_content_block(content, site, ctx));
    }

    out.push_raw("</div></article>");
    out
}

/// Render a conversation as a `<section>` with id `conv-CCCC`.
///
/// The first message of a continuation is collapsed, since it is a generated summary.
pub fn render_conversation(conversation: &Conversation, ctx: &RenderContext<'_>) -> Markup {
    let anchor = conversation_anchor(conversation.index);
    let class =
        if conversation.is_continuation { "conversation continued" } else { "conversation" };
    let mut out =
        Markup::raw(format!(r#"<section class="{class}" id="{}">"#, escape_html(&anchor)));

    for (m, line) in conversation.lines.iter().enumerate() {
        let html = render_message(line, conversation.index, m, ctx);
        if m == 0 && conversation.is_continuation {
            out.push_raw(
                r#"<details class="continuation"><summary>Session continuation summary</summary>"#,
            );
            out.push(&html);
            out.push_raw("</details>");
        } else {
            out.push(&html);
        }
    }

    out.push_raw("</section>");
    out
}
