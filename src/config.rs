//! Run settings, optionally loaded from a TOML file.
//!
//! ```toml
//! epub_dir = "chapters_txt(epub)"
//! txt_dir = "chapters_txt(txt)"
//! output_dir = "chapters_txt"
//! merge_log = "merge_log.json"
//! rename_log = "rename_log.json"
//! error_log = "rename_errors.log"
//! merge_threshold = 1.0
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::matching::engine::{ReconcileConfig, DEFAULT_MERGE_THRESHOLD};
use crate::output::writer::OutputPaths;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("merge_threshold must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileSettings {
    /// Chapters split from the EPUB
    pub epub_dir: PathBuf,
    /// Chapters split from the plain-text book
    pub txt_dir: PathBuf,
    pub output_dir: PathBuf,
    pub merge_log: PathBuf,
    pub rename_log: PathBuf,
    pub error_log: PathBuf,
    pub merge_threshold: f64,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            epub_dir: PathBuf::from("chapters_txt(epub)"),
            txt_dir: PathBuf::from("chapters_txt(txt)"),
            output_dir: PathBuf::from("chapters_txt"),
            merge_log: PathBuf::from("merge_log.json"),
            rename_log: PathBuf::from("rename_log.json"),
            error_log: PathBuf::from("rename_errors.log"),
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
        }
    }
}

impl ReconcileSettings {
    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, is not valid TOML for
    /// these settings, or has an out-of-range threshold.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed input or unknown keys, and
    /// `ConfigError::InvalidThreshold` if `merge_threshold` is out of range.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` unless the threshold is a finite
    /// value in `[0.0, 1.0]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.merge_threshold.is_finite() && (0.0..=1.0).contains(&self.merge_threshold) {
            Ok(())
        } else {
            Err(ConfigError::InvalidThreshold(self.merge_threshold))
        }
    }

    #[must_use]
    pub fn engine_config(&self) -> ReconcileConfig {
        ReconcileConfig {
            merge_threshold: self.merge_threshold,
        }
    }

    #[must_use]
    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            output_dir: self.output_dir.clone(),
            merge_log: self.merge_log.clone(),
            rename_log: self.rename_log.clone(),
            error_log: self.error_log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = ReconcileSettings::from_toml("").unwrap();
        assert_eq!(settings, ReconcileSettings::default());
        assert_eq!(settings.epub_dir, PathBuf::from("chapters_txt(epub)"));
        assert!((settings.merge_threshold - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_toml() {
        let settings = ReconcileSettings::from_toml(
            r#"
output_dir = "out"
merge_threshold = 0.85
"#,
        )
        .unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.txt_dir, PathBuf::from("chapters_txt(txt)"));
        assert!((settings.engine_config().merge_threshold - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ReconcileSettings::from_toml("epub_folder = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = ReconcileSettings::from_toml("merge_threshold = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(_)));
        assert!(ReconcileSettings::from_toml("merge_threshold = -0.1").is_err());
        assert!(ReconcileSettings::from_toml("merge_threshold = nan").is_err());
    }

    #[test]
    fn test_output_paths() {
        let paths = ReconcileSettings::default().output_paths();
        assert_eq!(paths.output_dir, PathBuf::from("chapters_txt"));
        assert_eq!(paths.error_log, PathBuf::from("rename_errors.log"));
    }
}
