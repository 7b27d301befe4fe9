//! Content Block Renderer.
//!
//! Pure functions from the content model to [`Markup`]. This module is the only place where
//! session text is escaped; templates in [`crate::output`] only ever splice finished markup.
//!
//! - [`render_content_block`] - One block (text, thinking, tool call, tool result, image, code)
//! - [`render_message`] / [`render_conversation`] - Articles and sections with positional ids
//! - [`render_markdown`] - Markdown with raw HTML escaped

pub mod blocks;
pub mod context;
pub mod markdown;
pub mod markup;
pub mod message;
pub mod tools;
pub mod truncate;

pub use blocks::{BlockSite, render_commit_card, render_content_block};
pub use context::RenderContext;
pub use markdown::{render_markdown, render_user_text};
pub use markup::{Markup, escape_html};
pub use message::{render_conversation, render_message, render_timestamp};
pub use truncate::{Truncated, truncate};
