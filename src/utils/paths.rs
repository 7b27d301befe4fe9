use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::path::{Component, Path};

use crate::error::ParseError;

// Maximum size of a session file: 256MB
const MAX_FILE_SIZE_BYTES: u64 = 256 * 1024 * 1024;

/// Validates that a file's size is within acceptable limits (256MB)
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and the read that follows.
pub fn validate_file_size(file: &File, path: &Path) -> Result<(), ParseError> {
    let metadata =
        file.metadata().map_err(|source| ParseError::Io { path: path.to_path_buf(), source })?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        return Err(ParseError::TooLarge {
            path: path.to_path_buf(),
            size: file_size,
            max: MAX_FILE_SIZE_BYTES,
        });
    }

    Ok(())
}

/// Shortens `path` for display relative to `working_dir`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use claude_code_transcripts::utils::shorten_path;
///
/// let cwd = Path::new("/home/alice/project");
/// assert_eq!(shorten_path("/home/alice/project/src/main.rs", Some(cwd)), "src/main.rs");
/// assert_eq!(shorten_path("/etc/hosts", Some(cwd)), "/etc/hosts");
/// ```
pub fn shorten_path(path: &str, working_dir: Option<&Path>) -> String {
    let Some(base) = working_dir else {
        return path.to_string();
    };

    match Path::new(path).strip_prefix(base) {
        Ok(rest) if rest.as_os_str().is_empty() => ".".to_string(),
        Ok(rest) => rest.to_string_lossy().to_string(),
        Err(_) => path.to_string(),
    }
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use claude_code_transcripts::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Documents");
/// // Returns "~/Documents" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    // Avoid double allocation when converting Cow to String
    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

/// Turns an arbitrary name into a single safe directory component.
///
/// Separators and `..` are replaced so generated output can never escape its parent.
pub fn safe_dir_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();

    let is_single_normal = {
        let mut components = Path::new(&cleaned).components();
        matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
    };

    if cleaned.trim().is_empty() || !is_single_normal {
        format!("_{}", cleaned.replace('.', "_"))
    } else {
        cleaned
    }
}
