//! Loading chapter candidates from the extractor output directories.
//!
//! Each directory holds one UTF-8 text file per chapter, as written by the
//! EPUB and TXT splitters. Files are read in filename order; that order is the
//! order the engine assigns chapter indices in.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chapter_reconciler::parsing::source::load_sources;
//! use std::path::Path;
//!
//! let sources = load_sources(Path::new("chapters_txt(epub)"), Path::new("chapters_txt(txt)")).unwrap();
//! println!("{} EPUB / {} TXT chapters", sources.epub.len(), sources.txt.len());
//! ```

pub mod source;
