use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::matching::engine::Reconciliation;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a run's chapters and logs go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub output_dir: PathBuf,
    pub merge_log: PathBuf,
    pub rename_log: PathBuf,
    pub error_log: PathBuf,
}

/// What the writer put on disk
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub chapters_written: usize,

    /// Set only when the run had issues
    pub error_log: Option<PathBuf>,
}

/// Writes canonical chapters and logs for one reconciliation
pub struct OutputWriter {
    paths: OutputPaths,
}

impl OutputWriter {
    #[must_use]
    pub fn new(paths: OutputPaths) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// Write every chapter, then the logs.
    ///
    /// Existing files in the output directory are left alone unless a chapter
    /// of the same name replaces them. Chapter files are written one by one, so
    /// an interrupted run can leave some of them behind; logs are replaced
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns `WriteError` on the first file that cannot be created or written.
    pub fn write(&self, result: &Reconciliation<'_>) -> Result<WriteSummary, WriteError> {
        let dir = &self.paths.output_dir;
        std::fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        for chapter in &result.chapters {
            let path = dir.join(&chapter.filename);
            std::fs::write(&path, &chapter.content)
                .map_err(|source| WriteError::Write { path, source })?;
        }
        debug!("Wrote {} chapters to {}", result.chapters.len(), dir.display());

        let merge_json = to_json(&result.merge_events, &self.paths.merge_log)?;
        write_atomic(&self.paths.merge_log, &merge_json)?;

        let rename_json = to_json(&result.renames, &self.paths.rename_log)?;
        write_atomic(&self.paths.rename_log, &rename_json)?;

        let error_log = if result.issues.is_empty() {
            remove_stale(&self.paths.error_log)?;
            None
        } else {
            write_atomic(&self.paths.error_log, &result.error_log_text())?;
            Some(self.paths.error_log.clone())
        };

        info!(
            "Wrote {} chapters, {} merge events, {} renames, {} issues",
            result.chapters.len(),
            result.merge_events.len(),
            result.renames.len(),
            result.issues.len()
        );

        Ok(WriteSummary {
            chapters_written: result.chapters.len(),
            error_log,
        })
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, path: &Path) -> Result<String, WriteError> {
    serde_json::to_string_pretty(value).map_err(|source| WriteError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}

/// Write to a temp file beside `path`, then rename it into place
fn write_atomic(path: &Path, contents: &str) -> Result<(), WriteError> {
    let write_err = |source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// An error log left by an earlier run would misreport this one
fn remove_stale(path: &Path) -> Result<(), WriteError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(WriteError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}
