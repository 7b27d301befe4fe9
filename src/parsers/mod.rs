//! Session file parsing (JSON documents and JSONL)
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Individual record failures**: Malformed lines or array elements are logged with
//!   `tracing::warn!`, skipped, and returned as [`ParseWarning`]s. A truncated final line left
//!   by an interrupted write never fails the file.
//!
//! - **Bookkeeping records**: Entries without a message (`summary`, `file-history-snapshot`,
//!   `progress`) are skipped silently and only counted.
//!
//! - **Fatal failure**: The file cannot be read, is larger than the size limit, or yields zero
//!   usable records. These return a [`ParseError`](crate::error::ParseError) naming the file.
//!
//! Unknown record fields are ignored and unknown content blocks are preserved as
//! [`ContentBlock::Unknown`](crate::models::ContentBlock::Unknown), so newer log shapes still
//! convert.

pub mod deserializers;
pub mod records;
pub mod session;

pub use session::{
    ParseWarning, ParsedSession, SessionFormat, parse_session_file, parse_session_str,
};
