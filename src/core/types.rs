use serde::{Deserialize, Serialize};

/// Which extractor produced a chapter candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Chapters split out of an EPUB container
    Epub,
    /// Chapters split out of a plain-text book
    Txt,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Epub => write!(f, "EPUB"),
            Self::Txt => write!(f, "TXT"),
        }
    }
}

/// Outcome class of a single TXT candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// EPUB and TXT bodies were concatenated into one chapter
    Merged,
    /// Header found in the EPUB index but scored at or below the threshold
    Mismatched,
    /// Header absent from the EPUB index; TXT body copied as-is
    Unmatched,
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged => write!(f, "merged"),
            Self::Mismatched => write!(f, "mismatched"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}
