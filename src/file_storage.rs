//! File sink
//!
//! Persists harvest aggregates as whole UTF-8 files under one root
//! directory. Construction ensures the directory exists; writes replace the
//! whole file so re-running a harvest with identical upstream data yields
//! byte-identical output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// Characters that corrupt paths when a make name is used as a directory
const FORBIDDEN: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make a name safe to use as a single path component.
///
/// Path separators, shell-hostile punctuation and control characters become
/// underscores; trailing dots and spaces are trimmed; an empty result maps
/// to a single underscore. The raw name is preserved in the JSON payload,
/// only the directory name is rewritten.
pub fn sanitize_component(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let sanitized = sanitized.trim_end_matches(['.', ' ']);
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized.to_string()
    }
}

/// Whole-file storage rooted at one directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `root`, creating the directory if absent.
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .context(format!("Failed to create directory: {:?}", root))?;
        Ok(Self { root })
    }

    fn file_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.file_path(filename).exists()
    }

    /// Write `content` as a whole UTF-8 file, replacing any previous one.
    pub async fn write_text(&self, filename: &str, content: &str) -> Result<()> {
        let path = self.file_path(filename);
        tokio::fs::write(&path, content)
            .await
            .context(format!("Failed to write file: {:?}", path))?;
        debug!("Wrote {} bytes to {:?}", content.len(), path);
        Ok(())
    }

    /// Read a whole UTF-8 file, `None` if it does not exist.
    pub async fn read_text(&self, filename: &str) -> Result<Option<String>> {
        let path = self.file_path(filename);
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path)
            .await
            .context(format!("Failed to read file: {:?}", path))?;
        Ok(Some(content))
    }
}
