use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::chapter::ChapterCandidate;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Missing input directory: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to list {}: {source}", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Candidates from both extractors, each in filename order
#[derive(Debug, Clone)]
pub struct ChapterSources {
    pub epub: Vec<ChapterCandidate>,
    pub txt: Vec<ChapterCandidate>,
}

/// Load both chapter directories.
///
/// Both directories are checked before either is read, so a missing directory
/// fails the run without touching anything.
///
/// # Errors
///
/// Returns `SourceError::MissingDirectory` if either path is not a directory,
/// or `SourceError::List`/`SourceError::Read` on I/O failure.
pub fn load_sources(epub_dir: &Path, txt_dir: &Path) -> Result<ChapterSources, SourceError> {
    ensure_directory(epub_dir)?;
    ensure_directory(txt_dir)?;

    Ok(ChapterSources {
        epub: load_directory(epub_dir)?,
        txt: load_directory(txt_dir)?,
    })
}

/// # Errors
///
/// Returns `SourceError::MissingDirectory` if `path` is not an existing directory.
pub fn ensure_directory(path: &Path) -> Result<(), SourceError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(SourceError::MissingDirectory(path.to_path_buf()))
    }
}

/// Read every regular file in `dir` as a chapter candidate, sorted by filename.
///
/// Subdirectories are ignored. Files must be UTF-8.
///
/// # Errors
///
/// Returns `SourceError::MissingDirectory` if `dir` does not exist, or
/// `SourceError::List`/`SourceError::Read` if listing or reading fails.
pub fn load_directory(dir: &Path) -> Result<Vec<ChapterCandidate>, SourceError> {
    ensure_directory(dir)?;

    let list_err = |source| SourceError::List {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push((name, path));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut candidates = Vec::with_capacity(files.len());
    for (name, path) in files {
        let body = std::fs::read_to_string(&path).map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })?;
        candidates.push(ChapterCandidate::new(path.display().to_string(), name, body));
    }

    debug!("Loaded {} candidates from {}", candidates.len(), dir.display());
    Ok(candidates)
}
