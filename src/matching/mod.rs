//! Chapter matching engine and header scoring.
//!
//! - [`ReconciliationEngine`](engine::ReconciliationEngine): classifies TXT chapters against EPUB chapters
//! - [`HeaderIndex`](index::HeaderIndex): normalized EPUB header -> candidate
//! - [`SequenceMatcher`](scoring::SequenceMatcher): longest-matching-blocks similarity ratio
//!
//! ## Matching Algorithm
//!
//! 1. **Index build**: every EPUB chapter is keyed by its normalized header.
//!    Empty keys are reported; a repeated key keeps the later chapter.
//! 2. **Classification**: TXT chapters are visited in order. Each one with a
//!    usable header takes the next chapter index and becomes one of
//!    - `Unmatched`: key not indexed, TXT body copied as-is
//!    - `Merged`: key indexed and score above the merge threshold
//!    - `Mismatched`: key indexed, score at or below the threshold; the index
//!      is used up and no chapter file is produced for it
//!
//! ## Example
//!
//! ```rust
//! use chapter_reconciler::core::chapter::ChapterCandidate;
//! use chapter_reconciler::matching::engine::ReconciliationEngine;
//!
//! let epub = vec![ChapterCandidate::new("epub/1.txt", "1.txt", "Chapter 1\nIt began.")];
//! let txt = vec![ChapterCandidate::new("txt/a.txt", "a.txt", "Appendix\nNotes.")];
//!
//! let result = ReconciliationEngine::new().reconcile(&epub, &txt);
//! assert_eq!(result.chapters[0].filename, "chapter_0001.txt");
//! assert_eq!(result.renames["a.txt"], "chapter_0001.txt");
//! ```

pub mod engine;
pub mod index;
pub mod scoring;
