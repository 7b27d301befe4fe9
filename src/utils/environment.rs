use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Get the directory holding per-project session logs (~/.claude/projects)
///
/// Resolved once by the CLI and passed explicitly to discovery.
pub fn default_projects_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine the home directory")?;
    Ok(projects_dir_under(&home))
}

fn projects_dir_under(home: &Path) -> PathBuf {
    home.join(".claude").join("projects")
}
