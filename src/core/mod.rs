//! Core data types for chapter reconciliation.
//!
//! - [`ChapterCandidate`](chapter::ChapterCandidate): a chapter file handed over by an extractor
//! - [`CanonicalChapter`](chapter::CanonicalChapter): a chapter with its final index and filename
//! - [`extract_header`](header::extract_header) / [`normalize_header`](header::normalize_header):
//!   header helpers shared by the index and the scorer
//! - [`SourceKind`](types::SourceKind), [`DecisionKind`](types::DecisionKind): classification types
//!
//! ## Header Normalization
//!
//! Headers from the two extractors rarely agree on punctuation or spacing:
//!
//! | Raw header             | Normalized      |
//! |------------------------|-----------------|
//! | `Chapter 1: Intro`     | `chapter1intro` |
//! | `CHAPTER 1 - INTRO`    | `chapter1intro` |
//! | `Chapter One`          | `chapterone`    |
//!
//! Only ASCII letters and digits survive normalization.

pub mod chapter;
pub mod header;
pub mod types;
