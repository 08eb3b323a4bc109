//! Handler file output.
//!
//! Writes are skipped when the file on disk already holds the same content,
//! so an unchanged definition file does not touch the handler file's mtime.

use crate::error::{CliResult, WriteError};
use std::path::{Path, PathBuf};

/// Result of a write operation.
#[derive(Debug, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written { path: PathBuf, bytes: usize },
    /// File already had this content.
    Unchanged { path: PathBuf },
    /// Dry run, nothing was written.
    DryRun { path: PathBuf, content: String },
}

/// File writer with dry-run support.
#[derive(Debug, Clone, Copy)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `content` to `path`, creating parent directories.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                path: path.to_path_buf(),
                content: content.to_string(),
            });
        }

        if let Ok(existing) = std::fs::read_to_string(path) {
            if existing == content {
                tracing::debug!(path = %path.display(), "output unchanged");
                return Ok(WriteResult::Unchanged {
                    path: path.to_path_buf(),
                });
            }
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. }
            | WriteResult::Unchanged { path }
            | WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Whether the file on disk now holds the generated content.
    pub fn is_current(&self) -> bool {
        !matches!(self, WriteResult::DryRun { .. })
    }
}
