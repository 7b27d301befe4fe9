use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::OutputError;
use crate::models::SessionStats;
use crate::output::assets::assets;

/// One generated file, path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub contents: String,
}

/// Everything produced for one session, held in memory until written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Site {
    /// Pages in order, then the index.
    pub documents: Vec<Document>,
    pub stats: SessionStats,
    pub conversations: usize,
    pub github_repo: Option<String>,
}

impl Site {
    pub fn push(&mut self, path: impl Into<PathBuf>, contents: String) {
        self.documents.push(Document { path: path.into(), contents });
    }

    pub fn document(&self, path: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.path == Path::new(path))
    }

    /// Write every document plus the static assets into `dir`, creating it if needed.
    ///
    /// Returns the paths written, documents first.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, OutputError> {
        create_dir(dir)?;

        let mut written = Vec::with_capacity(self.documents.len() + 2);
        for doc in &self.documents {
            let path = dir.join(&doc.path);
            write_file(&path, doc.contents.as_bytes())?;
            debug!(path = %path.display(), bytes = doc.contents.len(), "Wrote document");
            written.push(path);
        }

        written.extend(write_assets(dir)?);
        Ok(written)
    }
}

pub(crate) fn create_dir(dir: &Path) -> Result<(), OutputError> {
    fs::create_dir_all(dir)
        .map_err(|source| OutputError::CreateDir { path: dir.to_path_buf(), source })
}

pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    fs::write(path, contents)
        .map_err(|source| OutputError::Write { path: path.to_path_buf(), source })
}

/// Write `styles.css` and `script.js` into `dir`.
pub fn write_assets(dir: &Path) -> Result<Vec<PathBuf>, OutputError> {
    assets()
        .into_iter()
        .map(|(name, contents)| {
            let path = dir.join(name);
            write_file(&path, contents.as_bytes()).map(|()| path)
        })
        .collect()
}
