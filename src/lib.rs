//! # chapter-reconciler
//!
//! A library for reconciling two independently split copies of a book into one
//! ordered set of chapter files.
//!
//! Audiobook and text pipelines often end up with two chapter splits of the
//! same book: one extracted from an EPUB, one cut from a plain-text edition.
//! They disagree on file names, segmentation and header formatting.
//!
//! `chapter-reconciler` lines them up by normalized chapter header, assigns
//! every TXT chapter a canonical `chapter_NNNN.txt` slot in order, and logs
//! every merge, rename and error so the result can be audited.
//!
//! ## Features
//!
//! - **Header normalization**: case and punctuation never block a match
//! - **Sequence-alignment scoring**: longest-matching-blocks similarity ratio
//! - **Deterministic decisions**: the same inputs always give the same output
//! - **Audit logs**: merge events, renames and errors as separate files
//!
//! ## Example
//!
//! ```rust,no_run
//! use chapter_reconciler::{OutputWriter, ReconcileSettings, ReconciliationEngine};
//! use chapter_reconciler::parsing::source::load_sources;
//!
//! let settings = ReconcileSettings::default();
//! let sources = load_sources(&settings.epub_dir, &settings.txt_dir).unwrap();
//!
//! let engine = ReconciliationEngine::with_config(settings.engine_config());
//! let result = engine.reconcile(&sources.epub, &sources.txt);
//!
//! OutputWriter::new(settings.output_paths()).write(&result).unwrap();
//! for issue in &result.issues {
//!     println!("{issue}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Chapter candidates, canonical chapters and header helpers
//! - [`matching`]: Header index, similarity scoring and the reconciliation engine
//! - [`parsing`]: Loading chapter directories
//! - [`output`]: Writing chapters and logs
//! - [`config`]: TOML run settings
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod matching;
pub mod output;
pub mod parsing;

// Re-export commonly used types for convenience
pub use crate::config::ReconcileSettings;
pub use crate::core::chapter::{CanonicalChapter, ChapterCandidate};
pub use crate::core::types::*;
pub use crate::matching::engine::{MatchDecision, Reconciliation, ReconciliationEngine};
pub use crate::output::writer::OutputWriter;
