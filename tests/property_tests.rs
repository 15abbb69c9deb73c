// Property-based tests for header normalization and scoring.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use chapter_reconciler::core::chapter::ChapterCandidate;
use chapter_reconciler::core::header::normalize_header;
use chapter_reconciler::matching::engine::{MatchDecision, ReconciliationEngine};
use chapter_reconciler::matching::scoring::{header_similarity, SequenceMatcher};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// Header-like text: mostly chapter titles, sometimes noise or blanks
fn arb_header() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"(Chapter|CHAPTER|Ch\.) [0-9]{1,3}[:\- ]{0,3}[A-Za-z ]{0,20}",
        1 => r"\PC{0,30}",
        1 => r"[ \t*#\-]{0,5}",
    ]
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn normalize_is_idempotent(h in arb_header()) {
        let once = normalize_header(&h);
        prop_assert_eq!(normalize_header(&once), once.clone());
        prop_assert!(once.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn score_is_bounded(a in arb_header(), b in arb_header()) {
        let score = header_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn score_of_self_is_one(h in arb_header()) {
        prop_assume!(!normalize_header(&h).is_empty());
        prop_assert!((header_similarity(&h, &h) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn matching_blocks_are_common_and_ordered(a in "[a-d]{0,40}", b in "[a-d]{0,40}") {
        let matcher = SequenceMatcher::new(a.as_bytes(), b.as_bytes());
        let blocks = matcher.matching_blocks();
        for m in &blocks {
            prop_assert_eq!(&a.as_bytes()[m.a..m.a + m.size], &b.as_bytes()[m.b..m.b + m.size]);
        }
        for w in blocks.windows(2) {
            prop_assert!(w[0].a + w[0].size <= w[1].a);
            prop_assert!(w[0].b + w[0].size <= w[1].b);
        }
    }

    #[test]
    fn indices_step_by_one_in_txt_order(
        epub_headers in prop::collection::vec(arb_header(), 0..8),
        txt_headers in prop::collection::vec(arb_header(), 0..12),
    ) {
        let epub: Vec<ChapterCandidate> = epub_headers
            .iter()
            .enumerate()
            .map(|(i, h)| ChapterCandidate::new(format!("e/{i:03}"), format!("{i:03}"), format!("{h}\nbody")))
            .collect();
        let txt: Vec<ChapterCandidate> = txt_headers
            .iter()
            .enumerate()
            .map(|(i, h)| ChapterCandidate::new(format!("t/{i:03}"), format!("{i:03}"), format!("{h}\nbody")))
            .collect();

        let result = ReconciliationEngine::new().reconcile(&epub, &txt);

        let usable = txt.iter().filter(|c| !c.normalized_header().is_empty()).count();
        let indices: Vec<u32> = result.decisions.iter().map(MatchDecision::index).collect();
        let expected: Vec<u32> = (1..).take(usable).collect();
        prop_assert_eq!(indices, expected);

        // Default threshold never merges
        prop_assert!(result.merge_events.is_empty());
        prop_assert_eq!(result.chapters.len(), result.renames.len());
    }
}
