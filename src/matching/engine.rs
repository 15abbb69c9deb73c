use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::chapter::{canonical_filename, CanonicalChapter, ChapterCandidate};
use crate::core::types::{DecisionKind, SourceKind};
use crate::matching::index::HeaderIndex;
use crate::matching::scoring::header_similarity;

/// Default merge threshold. A pair merges only when its score is strictly
/// greater, and scores never exceed 1.0, so by default nothing merges.
pub const DEFAULT_MERGE_THRESHOLD: f64 = 1.0;

/// Configuration for the reconciliation engine
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// A matched pair merges when `score > merge_threshold`
    pub merge_threshold: f64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
        }
    }
}

/// How one TXT candidate was resolved
#[derive(Debug, Clone, PartialEq)]
pub enum MatchDecision<'a> {
    /// Both bodies concatenated into `chapter_{index}`
    Merged {
        score: f64,
        epub: &'a ChapterCandidate,
        txt: &'a ChapterCandidate,
        index: u32,
    },

    /// Header found in the EPUB index but the score did not clear the
    /// threshold. `index` is consumed and no file is written for it.
    Mismatched {
        score: f64,
        txt: &'a ChapterCandidate,
        index: u32,
    },

    /// Header not in the EPUB index; TXT body copied to `chapter_{index}`
    Unmatched { txt: &'a ChapterCandidate, index: u32 },
}

impl<'a> MatchDecision<'a> {
    #[must_use]
    pub fn kind(&self) -> DecisionKind {
        match self {
            Self::Merged { .. } => DecisionKind::Merged,
            Self::Mismatched { .. } => DecisionKind::Mismatched,
            Self::Unmatched { .. } => DecisionKind::Unmatched,
        }
    }

    /// Chapter index assigned to this decision
    #[must_use]
    pub fn index(&self) -> u32 {
        match self {
            Self::Merged { index, .. }
            | Self::Mismatched { index, .. }
            | Self::Unmatched { index, .. } => *index,
        }
    }

    #[must_use]
    pub fn txt(&self) -> &'a ChapterCandidate {
        match self {
            Self::Merged { txt, .. } | Self::Mismatched { txt, .. } | Self::Unmatched { txt, .. } => {
                *txt
            }
        }
    }
}

/// One entry of the merge log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeEvent {
    pub chapter: u32,
    pub epub_file: String,
    pub txt_file: String,
    pub score: f64,
    pub output: String,
}

/// A non-fatal problem with a single candidate
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileIssue {
    /// The candidate's header normalizes to nothing; it was excluded
    EmptyHeader { side: SourceKind, file_name: String },

    /// A TXT header was indexed but scored at or below the merge threshold
    HeaderMismatch { file_name: String, score: f64 },
}

impl std::fmt::Display for ReconcileIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHeader { side, file_name } => {
                write!(f, "Empty or invalid header in {side} file: {file_name}")
            }
            Self::HeaderMismatch { file_name, score } => {
                write!(f, "Header mismatch: {file_name} vs EPUB ({:.1}%)", score * 100.0)
            }
        }
    }
}

/// Everything one reconciliation run decided, ready to be written out
#[derive(Debug, Clone, Default)]
pub struct Reconciliation<'a> {
    /// One decision per TXT candidate with a usable header, in TXT order
    pub decisions: Vec<MatchDecision<'a>>,

    /// Chapters to write, in index order
    pub chapters: Vec<CanonicalChapter>,

    pub merge_events: Vec<MergeEvent>,

    /// Original TXT filename -> canonical filename, for unmatched copies
    pub renames: BTreeMap<String, String>,

    pub issues: Vec<ReconcileIssue>,
}

impl<'a> Reconciliation<'a> {
    /// Number of decisions of the given kind
    #[must_use]
    pub fn count(&self, kind: DecisionKind) -> usize {
        self.decisions.iter().filter(|d| d.kind() == kind).count()
    }

    /// Number of candidates excluded for an empty header
    #[must_use]
    pub fn empty_header_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, ReconcileIssue::EmptyHeader { .. }))
            .count()
    }

    /// Error log contents: one issue per line, no trailing newline
    #[must_use]
    pub fn error_log_text(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Record a decision along with the chapter and log entries it produces
    fn apply(&mut self, decision: MatchDecision<'a>) {
        match &decision {
            MatchDecision::Merged {
                score,
                epub,
                txt,
                index,
            } => {
                let content = format!("{}\n\n{}\n", epub.body.trim_end(), txt.body.trim_end());
                let chapter = CanonicalChapter::new(*index, content);
                self.merge_events.push(MergeEvent {
                    chapter: *index,
                    epub_file: epub.source_id.clone(),
                    txt_file: txt.source_id.clone(),
                    score: *score,
                    output: chapter.filename.clone(),
                });
                self.chapters.push(chapter);
            }
            MatchDecision::Mismatched { score, txt, .. } => {
                self.issues.push(ReconcileIssue::HeaderMismatch {
                    file_name: txt.file_name.clone(),
                    score: *score,
                });
            }
            MatchDecision::Unmatched { txt, index } => {
                let chapter = CanonicalChapter::new(*index, txt.body.clone());
                self.renames
                    .insert(txt.file_name.clone(), chapter.filename.clone());
                self.chapters.push(chapter);
            }
        }
        self.decisions.push(decision);
    }
}

/// Fold state: the next chapter index plus everything decided so far
struct FoldState<'a> {
    next_index: u32,
    result: Reconciliation<'a>,
}

/// Matches TXT chapters against EPUB chapters by normalized header
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    config: ReconcileConfig,
}

impl ReconciliationEngine {
    /// Create an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ReconcileConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Index EPUB candidates by normalized header.
    ///
    /// Candidates with an empty normalized header are reported in `issues` and
    /// left out. Later candidates replace earlier ones with the same key.
    pub fn build_index<'a>(
        &self,
        epub: &'a [ChapterCandidate],
        issues: &mut Vec<ReconcileIssue>,
    ) -> HeaderIndex<'a> {
        let mut index = HeaderIndex::new();
        for candidate in epub {
            let normalized = candidate.normalized_header();
            if normalized.is_empty() {
                issues.push(ReconcileIssue::EmptyHeader {
                    side: SourceKind::Epub,
                    file_name: candidate.file_name.clone(),
                });
                continue;
            }
            index.insert(normalized, candidate);
        }
        index
    }

    /// Classify one TXT candidate whose normalized header is `normalized`
    pub fn classify<'a>(
        &self,
        index: &HeaderIndex<'a>,
        txt: &'a ChapterCandidate,
        normalized: &str,
        chapter_index: u32,
    ) -> MatchDecision<'a> {
        let Some(epub) = index.get(normalized) else {
            return MatchDecision::Unmatched {
                txt,
                index: chapter_index,
            };
        };

        let score = header_similarity(&txt.header, &epub.header);
        if score > self.config.merge_threshold {
            MatchDecision::Merged {
                score,
                epub,
                txt,
                index: chapter_index,
            }
        } else {
            MatchDecision::Mismatched {
                score,
                txt,
                index: chapter_index,
            }
        }
    }

    /// Reconcile both candidate lists. Order of each list is significant.
    ///
    /// Chapter indices start at 1 and advance by one for every TXT candidate
    /// with a usable header, whatever its outcome.
    pub fn reconcile<'a>(
        &self,
        epub: &'a [ChapterCandidate],
        txt: &'a [ChapterCandidate],
    ) -> Reconciliation<'a> {
        info!("Scanning {} EPUB headers", epub.len());
        let mut result = Reconciliation::default();
        let index = self.build_index(epub, &mut result.issues);
        debug!("EPUB header index holds {} keys", index.len());

        info!("Matching {} TXT headers", txt.len());
        let state = FoldState {
            next_index: 1,
            result,
        };
        let state = txt.iter().fold(state, |mut state, candidate| {
            let normalized = candidate.normalized_header();
            if normalized.is_empty() {
                state.result.issues.push(ReconcileIssue::EmptyHeader {
                    side: SourceKind::Txt,
                    file_name: candidate.file_name.clone(),
                });
                return state;
            }

            let decision = self.classify(&index, candidate, &normalized, state.next_index);
            debug!(
                "{} -> {} ({})",
                candidate.file_name,
                canonical_filename(decision.index()),
                decision.kind()
            );
            state.result.apply(decision);
            state.next_index += 1;
            state
        });

        state.result
    }
}
