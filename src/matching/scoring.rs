use std::collections::HashSet;

use crate::matching::normalize::is_stop_word;
use crate::utils::validation::count_to_f64;

/// A normalized label together with the features the built-in metrics use.
///
/// Clustering scores every pair of labels, so the characters, word set and
/// trigram set are computed once per label rather than once per pair.
#[derive(Debug, Clone)]
pub struct PreparedLabel {
    text: String,
    chars: Vec<char>,
    words: HashSet<String>,
    trigrams: HashSet<[char; 3]>,
}

impl PreparedLabel {
    /// Prepare text that has already been normalized
    #[must_use]
    pub fn new(normalized: impl Into<String>) -> Self {
        let text = normalized.into();
        let chars: Vec<char> = text.chars().collect();
        let words = text
            .split_whitespace()
            .filter(|w| !is_stop_word(w))
            .map(str::to_string)
            .collect();
        let trigrams = chars.windows(3).map(|w| [w[0], w[1], w[2]]).collect();
        Self {
            text,
            chars,
            words,
            trigrams,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A similarity score between two normalized labels.
///
/// Implementations receive text that has already been through
/// [`normalize`](crate::matching::normalize::normalize) and must return a
/// value in `[0, 1]` that does not depend on argument order.
pub trait SimilarityMetric: Send + Sync {
    /// Short identifier used in score breakdowns
    fn name(&self) -> &'static str;

    fn score(&self, a: &str, b: &str) -> f64;

    /// Score two prepared labels; the default scores their text.
    fn score_prepared(&self, a: &PreparedLabel, b: &PreparedLabel) -> f64 {
        self.score(a.text(), b.text())
    }
}

/// The four metrics combined by default
#[must_use]
pub fn default_metrics() -> Vec<Box<dyn SimilarityMetric>> {
    vec![
        Box::new(SequenceRatio),
        Box::new(WordJaccard),
        Box::new(LongestCommonSubstring),
        Box::new(NgramJaccard::trigram()),
    ]
}

/// Ratcliff/Obershelp ratio: `2 * matched / total` where `matched` is the sum
/// of the matching blocks found by recursively taking the longest common
/// substring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

impl SimilarityMetric for SequenceRatio {
    fn name(&self) -> &'static str {
        "sequence_ratio"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        self.score_prepared(&PreparedLabel::new(a), &PreparedLabel::new(b))
    }

    fn score_prepared(&self, a: &PreparedLabel, b: &PreparedLabel) -> f64 {
        // Block selection breaks ties by position, so fix the argument order
        let (a, b) = if a.text <= b.text { (a, b) } else { (b, a) };

        let total = a.chars.len() + b.chars.len();
        if total == 0 {
            return 0.0;
        }

        let matched = matching_characters(&a.chars, &b.chars);
        2.0 * count_to_f64(matched) / count_to_f64(total)
    }
}

/// Jaccard index of the word sets, ignoring stop words
#[derive(Debug, Clone, Copy, Default)]
pub struct WordJaccard;

impl SimilarityMetric for WordJaccard {
    fn name(&self) -> &'static str {
        "word_jaccard"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        self.score_prepared(&PreparedLabel::new(a), &PreparedLabel::new(b))
    }

    fn score_prepared(&self, a: &PreparedLabel, b: &PreparedLabel) -> f64 {
        jaccard_similarity(&a.words, &b.words)
    }
}

/// Longest common substring length over the mean label length
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestCommonSubstring;

impl SimilarityMetric for LongestCommonSubstring {
    fn name(&self) -> &'static str {
        "longest_common_substring"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        self.score_prepared(&PreparedLabel::new(a), &PreparedLabel::new(b))
    }

    fn score_prepared(&self, a: &PreparedLabel, b: &PreparedLabel) -> f64 {
        if a.chars.is_empty() || b.chars.is_empty() {
            return 0.0;
        }

        let (_, _, longest) = longest_common_block(&a.chars, &b.chars);
        let mean_length = count_to_f64(a.chars.len() + b.chars.len()) / 2.0;
        count_to_f64(longest) / mean_length
    }
}

/// Jaccard index of 3-character shingles
#[derive(Debug, Clone, Copy, Default)]
pub struct NgramJaccard;

impl NgramJaccard {
    #[must_use]
    pub fn trigram() -> Self {
        Self
    }
}

impl SimilarityMetric for NgramJaccard {
    fn name(&self) -> &'static str {
        "trigram_jaccard"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        self.score_prepared(&PreparedLabel::new(a), &PreparedLabel::new(b))
    }

    fn score_prepared(&self, a: &PreparedLabel, b: &PreparedLabel) -> f64 {
        jaccard_similarity(&a.trigrams, &b.trigrams)
    }
}

/// Jaccard similarity: |A ∩ B| / |A ∪ B|
///
/// Returns 0.0 when either set is empty.
fn jaccard_similarity<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    count_to_f64(intersection) / count_to_f64(union)
}

/// Longest common substring of `a` and `b`.
///
/// Returns `(start_in_a, start_in_b, length)`. Among equally long blocks the
/// one starting earliest in `a` wins, then the one starting earliest in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // prev[j + 1] = length of the common suffix of a[..i] and b[..=j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };

            let length = curr[j + 1];
            if length > 0 {
                let start_a = i + 1 - length;
                let start_b = j + 1 - length;
                let better = length > best.2
                    || (length == best.2 && (start_a, start_b) < (best.0, best.1));
                if better {
                    best = (start_a, start_b, length);
                }
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Total size of the Ratcliff/Obershelp matching blocks
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        if a_lo >= a_hi || b_lo >= b_hi {
            continue;
        }

        let (i, j, length) = longest_common_block(&a[a_lo..a_hi], &b[b_lo..b_hi]);
        if length == 0 {
            continue;
        }

        matched += length;
        let (i, j) = (a_lo + i, b_lo + j);
        pending.push((a_lo, i, b_lo, j));
        pending.push((i + length, a_hi, j + length, b_hi));
    }

    matched
}
