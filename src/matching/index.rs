use std::collections::HashMap;

use tracing::debug;

use crate::core::chapter::ChapterCandidate;

/// Lookup from normalized header to the EPUB candidate carrying it.
///
/// Each key holds exactly one candidate. Inserting a key that is already
/// present replaces the stored candidate, so when several EPUB chapters share a
/// normalized header the one inserted last is the one TXT chapters are matched
/// against.
#[derive(Debug, Default)]
pub struct HeaderIndex<'a> {
    by_header: HashMap<String, &'a ChapterCandidate>,
}

impl<'a> HeaderIndex<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `candidate` under `normalized`, returning the candidate it replaced
    pub fn insert(
        &mut self,
        normalized: String,
        candidate: &'a ChapterCandidate,
    ) -> Option<&'a ChapterCandidate> {
        let replaced = self.by_header.insert(normalized, candidate);
        if let Some(previous) = replaced {
            debug!(
                "EPUB header of {} replaces {} in the index",
                candidate.file_name, previous.file_name
            );
        }
        replaced
    }

    #[must_use]
    pub fn get(&self, normalized: &str) -> Option<&'a ChapterCandidate> {
        self.by_header.get(normalized).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_header.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_header.is_empty()
    }
}
