use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// A session file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub path: PathBuf,
    pub summary: String,
    pub modified: Option<DateTime<Utc>>,
    pub size_bytes: u64,
}

impl SessionInfo {
    /// File stem, used as the session's output directory name.
    pub fn name(&self) -> String {
        self.path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
    }
}

/// A project directory and the sessions recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Human-readable name derived from the folder name.
    pub name: String,
    /// Encoded folder name under the projects directory.
    pub folder_name: String,
    pub project_dir: PathBuf,
    /// Newest first.
    pub sessions: Vec<SessionInfo>,
}

impl ProjectInfo {
    pub fn most_recent(&self) -> Option<DateTime<Utc>> {
        self.sessions.iter().filter_map(|s| s.modified).max()
    }
}
