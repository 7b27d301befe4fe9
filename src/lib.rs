//! Claude Code Transcripts - Turn Claude Code session logs into static HTML
//!
//! This library reads the JSON / JSONL session files Claude Code writes under
//! `~/.claude/projects/` and produces a self-contained, paginated HTML rendition. It supports:
//!
//! - Tolerant parsing of session files, skipping malformed records with warnings
//! - Grouping records into conversations, one per genuine user prompt
//! - Pagination by conversation count and estimated page size, with stable anchors
//! - Rendering markdown, tool calls, tool results, images and commit links with escaping
//! - Batch conversion of a whole projects directory into a browsable archive
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use claude_code_transcripts::{TranscriptConfig, generate_html};
//!
//! let report = generate_html(
//!     Path::new("session.jsonl"),
//!     Path::new("transcript"),
//!     &TranscriptConfig::default(),
//! )?;
//! println!("Wrote {} pages", report.pages);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod grouper;
pub mod models;
pub mod output;
pub mod paginate;
pub mod parsers;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::{PageBudget, TranscriptConfig, TruncationPolicy};
pub use discovery::{find_all_sessions, find_local_sessions};
pub use error::{GenerateError, OutputError, ParseError};
pub use generator::{BatchReport, GenerationReport, build_site, generate_batch_html, generate_html};
pub use grouper::group_conversations;
pub use paginate::paginate;
pub use parsers::parse_session_file;
