//! Data model for session transcripts.
//!
//! - [`LogLine`] - One parsed record of a session file
//! - [`ContentBlock`] - A typed unit of message content, with an `Unknown` fallback
//! - [`Conversation`] - A prompt plus everything produced in response
//! - [`Page`] - The conversations assigned to one output document
//! - [`ConversationStats`] / [`SessionStats`] - Derived figures for display
//! - [`ProjectInfo`] / [`SessionInfo`] - Session files found on disk
//!
//! All values are built once per conversion run and discarded after output is written.

pub mod content;
pub mod conversation;
pub mod log_line;
pub mod project;
pub mod stats;

pub use content::{ContentBlock, ToolResultContent};
pub use conversation::{Conversation, Page, PageLinks, page_file_name};
pub use log_line::{LogLine, RecordKind, Role};
pub use project::{ProjectInfo, SessionInfo};
pub use stats::{Commit, ConversationStats, SessionStats};
