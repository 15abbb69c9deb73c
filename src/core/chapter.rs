use serde::{Deserialize, Serialize};

use crate::core::header::{extract_header, normalize_header};

/// Build the canonical output filename for a chapter index.
///
/// # Examples
///
/// ```
/// use chapter_reconciler::core::chapter::canonical_filename;
///
/// assert_eq!(canonical_filename(7), "chapter_0007.txt");
/// assert_eq!(canonical_filename(12345), "chapter_12345.txt");
/// ```
#[must_use]
pub fn canonical_filename(index: u32) -> String {
    format!("chapter_{index:04}.txt")
}

/// A chapter file produced by one of the upstream extractors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCandidate {
    /// Opaque identifier of the source, usually the file path
    pub source_id: String,

    /// Bare filename, used in the rename log and in issue messages
    pub file_name: String,

    /// First non-empty line of the text, trimmed
    pub header: String,

    /// Full text of the file, untouched
    pub body: String,
}

impl ChapterCandidate {
    /// Build a candidate from raw text, extracting its header
    pub fn new(
        source_id: impl Into<String>,
        file_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let body = body.into();
        let header = extract_header(&body).to_string();
        Self {
            source_id: source_id.into(),
            file_name: file_name.into(),
            header,
            body,
        }
    }

    #[must_use]
    pub fn normalized_header(&self) -> String {
        normalize_header(&self.header)
    }
}

/// A chapter assigned its final position in the output corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalChapter {
    /// 1-based position
    pub index: u32,

    /// `chapter_{index:04}.txt`
    pub filename: String,

    /// Exact bytes to write
    pub content: String,
}

impl CanonicalChapter {
    #[must_use]
    pub fn new(index: u32, content: String) -> Self {
        Self {
            index,
            filename: canonical_filename(index),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_extracts_header() {
        let c = ChapterCandidate::new("in/ch1.txt", "ch1.txt", "\n  Chapter 1  \nText\n");
        assert_eq!(c.header, "Chapter 1");
        assert_eq!(c.normalized_header(), "chapter1");
        assert_eq!(c.body, "\n  Chapter 1  \nText\n");
    }

    #[test]
    fn test_canonical_chapter_filename() {
        let chapter = CanonicalChapter::new(42, "x".to_string());
        assert_eq!(chapter.filename, "chapter_0042.txt");
        assert_eq!(canonical_filename(1), "chapter_0001.txt");
    }
}
