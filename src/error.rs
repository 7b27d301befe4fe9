//! Typed errors for the conversion pipeline.
//!
//! Library entry points return these so callers can tell a bad input file apart from a
//! failed write. The CLI wraps them in `anyhow` with extra context.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a session file into log lines.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read session file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("session file too large: {} ({size} bytes, max {max} bytes)", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    /// Nothing usable could be extracted from the file.
    #[error("no valid records in {} ({skipped} malformed records skipped)", path.display())]
    NoRecords { path: PathBuf, skipped: usize },
}

/// Failure while writing generated documents.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Any failure of a single-session conversion.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
