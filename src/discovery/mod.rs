//! Finding session files under a projects directory.
//!
//! The projects directory is always passed in explicitly; nothing here consults the
//! environment. Unreadable entries and symlinks are logged and skipped (graceful
//! degradation), only an unreadable projects directory is an error.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::grouper::{PromptClass, classify_record};
use crate::models::{ProjectInfo, SessionInfo};
use crate::parsers::parse_session_str;
use crate::utils::{strip_ansi_codes, validate_file_size};

/// Maximum number of projects to process (resource exhaustion guard)
const MAX_PROJECTS: usize = 1000;

/// Maximum number of session files per project (resource exhaustion guard)
const MAX_SESSIONS_PER_PROJECT: usize = 10_000;

/// Summary length used for listings.
pub const SUMMARY_MAX_LEN: usize = 100;

const NO_SUMMARY: &str = "(no summary)";

fn is_session_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jsonl")
}

fn is_agent_file(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name.to_string_lossy().starts_with("agent-"))
}

fn session_info(path: &Path, size_bytes: u64, modified: Option<DateTime<Utc>>) -> SessionInfo {
    SessionInfo {
        path: path.to_path_buf(),
        summary: get_session_summary(path, SUMMARY_MAX_LEN),
        modified,
        size_bytes,
    }
}

fn modified_time(metadata: &fs::Metadata) -> Option<DateTime<Utc>> {
    metadata.modified().ok().map(DateTime::<Utc>::from)
}

/// The `limit` most recently modified sessions anywhere under `projects_dir`.
///
/// Sub-agent (`agent-*`) and empty files are skipped. Returns an empty list when the
/// directory does not exist.
pub fn find_local_sessions(projects_dir: &Path, limit: usize) -> Vec<SessionInfo> {
    if !projects_dir.exists() {
        return Vec::new();
    }

    let mut found: Vec<(PathBuf, u64, Option<DateTime<Utc>>)> = WalkDir::new(projects_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_session_file(entry.path()) && !is_agent_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            if metadata.len() == 0 {
                return None;
            }
            Some((entry.into_path(), metadata.len(), modified_time(&metadata)))
        })
        .collect();

    // Newest first, path as a tiebreaker for a stable order
    found.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    found.truncate(limit);

    found.into_iter().map(|(path, size, modified)| session_info(&path, size, modified)).collect()
}

/// Every project under `projects_dir` with its sessions.
///
/// Sessions are newest first; projects are ordered by their newest session. Projects without
/// sessions are omitted.
///
/// # Errors
///
/// Returns an error if:
/// - The projects directory exists but cannot be read
/// - More than [`MAX_PROJECTS`] (1000) projects are found
pub fn find_all_sessions(projects_dir: &Path, include_agents: bool) -> Result<Vec<ProjectInfo>> {
    if !projects_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(projects_dir)
        .with_context(|| format!("Failed to read projects directory: {}", projects_dir.display()))?;

    let mut projects = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        // Symlinked project directories are not followed
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            warn!(path = %path.display(), "Skipping project directory (symlink not allowed)");
            continue;
        }
        if !file_type.is_dir() {
            continue;
        }

        if projects.len() >= MAX_PROJECTS {
            bail!(
                "Resource limit exceeded: Found more than {} projects in {}",
                MAX_PROJECTS,
                projects_dir.display()
            );
        }

        let folder_name = entry.file_name().to_string_lossy().to_string();
        let sessions = match project_sessions(&path, include_agents) {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read project directory");
                continue;
            }
        };
        if sessions.is_empty() {
            continue;
        }

        projects.push(ProjectInfo {
            name: project_display_name(&folder_name),
            folder_name,
            project_dir: path,
            sessions,
        });
    }

    projects.sort_by(|a, b| {
        b.most_recent().cmp(&a.most_recent()).then_with(|| a.folder_name.cmp(&b.folder_name))
    });
    debug!(projects = projects.len(), "Discovered projects");
    Ok(projects)
}

fn project_sessions(project_dir: &Path, include_agents: bool) -> Result<Vec<SessionInfo>> {
    let mut sessions = Vec::new();

    for entry in fs::read_dir(project_dir)? {
        let entry = entry?;
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() || !is_session_file(&path) {
            continue;
        }
        if !include_agents && is_agent_file(&path) {
            continue;
        }
        if sessions.len() >= MAX_SESSIONS_PER_PROJECT {
            bail!(
                "Resource limit exceeded: Project {} has more than {} sessions",
                project_dir.display(),
                MAX_SESSIONS_PER_PROJECT
            );
        }

        let metadata = entry.metadata()?;
        if metadata.len() == 0 {
            continue;
        }
        sessions.push(session_info(&path, metadata.len(), modified_time(&metadata)));
    }

    sessions.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
    Ok(sessions)
}

/// One-line description of a session for listings.
///
/// Uses the first `summary` record, otherwise the first genuine user prompt. Truncated to
/// `max_len` characters with `...`; `(no summary)` when nothing usable is found.
pub fn get_session_summary(path: &Path, max_len: usize) -> String {
    read_summary(path)
        .map(|summary| summarize(&summary, max_len))
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| NO_SUMMARY.to_string())
}

fn read_summary(path: &Path) -> Option<String> {
    let mut file = File::open(path).ok()?;
    validate_file_size(&file, path).ok()?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).ok()?;
    let content = String::from_utf8_lossy(&bytes);

    let summary_record = content.lines().find_map(|line| {
        let value: Value = serde_json::from_str(line).ok()?;
        if value.get("type").and_then(Value::as_str) != Some("summary") {
            return None;
        }
        value.get("summary").and_then(Value::as_str).map(str::to_string)
    });
    if summary_record.is_some() {
        return summary_record;
    }

    let session = parse_session_str(&content, path).ok()?;
    session
        .lines
        .iter()
        .find(|line| classify_record(line) == PromptClass::Prompt)
        .and_then(|line| line.text())
}

fn summarize(text: &str, max_len: usize) -> String {
    let single_line = strip_ansi_codes(text).split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_len {
        return single_line;
    }
    let keep = max_len.saturating_sub(3);
    let mut truncated: String = single_line.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// Readable project name from an encoded folder name.
///
/// `-home-user-projects-project-a` becomes `project-a`: the home prefix and the user name are
/// dropped, as are common container directories.
pub fn project_display_name(folder_name: &str) -> String {
    const PREFIXES: [&str; 3] = ["-mnt-c-Users-", "-home-", "-Users-"];
    const SKIP_DIRS: [&str; 7] = ["projects", "code", "repos", "src", "dev", "work", "documents"];

    let Some(rest) = PREFIXES.iter().find_map(|prefix| folder_name.strip_prefix(prefix)) else {
        return folder_name.trim_start_matches('-').to_string();
    };

    // Drop the user name
    let mut parts: Vec<&str> = rest.split('-').skip(1).collect();
    while let Some(first) = parts.first() {
        if first.is_empty() || SKIP_DIRS.contains(&first.to_lowercase().as_str()) {
            parts.remove(0);
        } else {
            break;
        }
    }

    if parts.is_empty() { rest.to_string() } else { parts.join("-") }
}
