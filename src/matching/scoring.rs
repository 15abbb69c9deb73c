use std::collections::HashMap;

use serde::Serialize;

use crate::core::header::normalize_header;

/// Sequences at least this long get the popular-element heuristic
const POPULAR_MIN_LEN: usize = 200;

/// Safely convert usize to f64 for ratio calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// A common block: `a[a..a + size] == b[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Longest-matching-blocks sequence matcher over two byte strings.
///
/// Finds the longest contiguous common block, then recurses into the regions to
/// its left and right. Ties go to the block that starts earliest in `a`, then
/// earliest in `b`.
///
/// When `b` has at least 200 elements, any element appearing in more than
/// `len(b) / 100 + 1` positions is "popular": it never seeds a match, but a
/// match found elsewhere may still be extended across it. This keeps the
/// matcher fast on long, repetitive input and is part of the score definition.
pub struct SequenceMatcher<'a> {
    a: &'a [u8],
    b: &'a [u8],
    /// element -> ascending positions in `b`, popular elements removed
    b2j: HashMap<u8, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    #[must_use]
    pub fn new(a: &'a [u8], b: &'a [u8]) -> Self {
        let mut b2j: HashMap<u8, Vec<usize>> = HashMap::new();
        for (j, &elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        if b.len() >= POPULAR_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Longest common block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a zero-size match at `(alo, blo)` when nothing is shared.
    #[must_use]
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);

        // j2len[j] = length of the common block ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = j
                        .checked_sub(1)
                        .and_then(|p| j2len.get(&p))
                        .copied()
                        .unwrap_or(0);
                    let k = prev + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Grow across popular elements that could not seed the match
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }

    /// All matching blocks, ordered by position, without a zero-size sentinel
    #[must_use]
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut stack = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = stack.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                stack.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                stack.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }

        blocks.sort_by_key(|m| (m.a, m.b));
        blocks
    }

    /// Similarity ratio `2 * M / T` in `[0.0, 1.0]`.
    ///
    /// `M` is the total size of the matching blocks and `T` the combined length.
    /// Two empty sequences are considered identical.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * count_to_f64(matches) / count_to_f64(total)
    }
}

/// Similarity of two raw headers, each normalized before comparison
///
/// # Examples
///
/// ```
/// use chapter_reconciler::matching::scoring::header_similarity;
///
/// assert_eq!(header_similarity("Chapter 1: Intro", "CHAPTER 1 - INTRO"), 1.0);
/// assert!(header_similarity("Chapter 1", "Appendix") < 0.5);
/// ```
#[must_use]
pub fn header_similarity(a: &str, b: &str) -> f64 {
    let a = normalize_header(a);
    let b = normalize_header(b);
    SequenceMatcher::new(a.as_bytes(), b.as_bytes()).ratio()
}

/// Side-by-side view of two headers and how they score
#[derive(Debug, Clone, Serialize)]
pub struct HeaderComparison {
    pub header_a: String,
    pub header_b: String,
    pub normalized_a: String,
    pub normalized_b: String,

    /// Ratio of the normalized forms
    pub score: f64,

    /// Whether both headers land on the same index key
    pub same_key: bool,
}

impl HeaderComparison {
    #[must_use]
    pub fn calculate(header_a: &str, header_b: &str) -> Self {
        let normalized_a = normalize_header(header_a);
        let normalized_b = normalize_header(header_b);
        let score = SequenceMatcher::new(normalized_a.as_bytes(), normalized_b.as_bytes()).ratio();
        let same_key = !normalized_a.is_empty() && normalized_a == normalized_b;

        Self {
            header_a: header_a.to_string(),
            header_b: header_b.to_string(),
            normalized_a,
            normalized_b,
            score,
            same_key,
        }
    }
}
