use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::matching::normalize::{clean, is_abbreviation, normalize};
use crate::matching::scoring::{default_metrics, PreparedLabel, SimilarityMetric};

/// Default similarity threshold for two labels to count as the same item
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// How labels are grouped into clusters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStrategy {
    /// Single pass; every label is compared only against the seed of the
    /// cluster being built. Not transitive and sensitive to input order.
    #[default]
    Greedy,
    /// Connected components of the match relation
    Transitive,
}

/// A candidate label scored against a target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub label: String,
    pub score: f64,
}

/// Score of one metric for a pair of labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricScore {
    pub metric: &'static str,
    pub score: f64,
}

/// Fuzzy matcher for free-text project/area labels.
///
/// Similarity is the maximum over a set of [`SimilarityMetric`]s applied to
/// the normalized labels.
pub struct NameMatcher {
    threshold: f64,
    metrics: Vec<Box<dyn SimilarityMetric>>,
}

impl std::fmt::Debug for NameMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameMatcher")
            .field("threshold", &self.threshold)
            .field(
                "metrics",
                &self.metrics.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl NameMatcher {
    /// Create a matcher with the default metrics
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            metrics: default_metrics(),
        }
    }

    /// Create a matcher with a custom metric set
    #[must_use]
    pub fn with_metrics(threshold: f64, metrics: Vec<Box<dyn SimilarityMetric>>) -> Self {
        Self { threshold, metrics }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Similarity between two labels in `[0, 1]`.
    ///
    /// Identical labels after normalization score 1.0; a label that
    /// normalizes to nothing scores 0.0 against everything.
    #[must_use]
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        self.similarity_prepared(&prepare(a), &prepare(b))
    }

    fn similarity_prepared(&self, a: &PreparedLabel, b: &PreparedLabel) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a.text() == b.text() {
            return 1.0;
        }

        self.metrics
            .iter()
            .map(|metric| metric.score_prepared(a, b))
            .fold(0.0, f64::max)
    }

    /// Individual metric scores for a pair of labels
    #[must_use]
    pub fn similarity_breakdown(&self, a: &str, b: &str) -> Vec<MetricScore> {
        let (a, b) = (prepare(a), prepare(b));
        self.metrics
            .iter()
            .map(|metric| MetricScore {
                metric: metric.name(),
                score: if a.is_empty() || b.is_empty() {
                    0.0
                } else {
                    metric.score_prepared(&a, &b)
                },
            })
            .collect()
    }

    /// Do the labels match at the given threshold?
    #[must_use]
    pub fn is_match(&self, a: &str, b: &str, threshold: f64) -> bool {
        self.similarity(a, b) >= threshold
    }

    /// Do the labels match at this matcher's threshold?
    #[must_use]
    pub fn matches(&self, a: &str, b: &str) -> bool {
        self.is_match(a, b, self.threshold)
    }

    /// Candidates scoring at or above the threshold, best first
    #[must_use]
    pub fn find_best_matches<S: AsRef<str>>(
        &self,
        target: &str,
        candidates: &[S],
        limit: usize,
    ) -> Vec<MatchCandidate> {
        let target = prepare(target);
        if target.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<MatchCandidate> = candidates
            .iter()
            .filter_map(|candidate| {
                let candidate = candidate.as_ref();
                let score = self.similarity_prepared(&target, &prepare(candidate));
                (score >= self.threshold).then(|| MatchCandidate {
                    label: candidate.to_string(),
                    score,
                })
            })
            .collect();

        // Stable sort keeps input order for equal scores
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(limit);
        matches
    }

    /// Group labels that refer to the same item using the greedy strategy.
    ///
    /// Duplicate labels collapse into a single entry.
    #[must_use]
    pub fn cluster<S: AsRef<str>>(&self, labels: &[S]) -> Vec<Vec<String>> {
        self.cluster_with(labels, ClusterStrategy::Greedy)
    }

    /// Group labels using an explicit clustering strategy
    #[must_use]
    pub fn cluster_with<S: AsRef<str>>(
        &self,
        labels: &[S],
        strategy: ClusterStrategy,
    ) -> Vec<Vec<String>> {
        let distinct = distinct_labels(labels);
        self.cluster_indices(&distinct, strategy)
            .into_iter()
            .map(|group| group.into_iter().map(|i| distinct[i].to_string()).collect())
            .collect()
    }

    /// Cluster distinct labels, returning groups of indices into `labels`.
    ///
    /// Groups are ordered by their first member; members keep input order.
    /// Every label is normalized and prepared once up front.
    pub(crate) fn cluster_indices(
        &self,
        labels: &[&str],
        strategy: ClusterStrategy,
    ) -> Vec<Vec<usize>> {
        let prepared: Vec<PreparedLabel> = labels.iter().map(|l| prepare(l)).collect();
        let is_match = |i: usize, j: usize| {
            self.similarity_prepared(&prepared[i], &prepared[j]) >= self.threshold
        };

        match strategy {
            ClusterStrategy::Greedy => greedy_clusters(labels.len(), is_match),
            ClusterStrategy::Transitive => transitive_clusters(labels.len(), is_match),
        }
    }

    /// Pick the preferred spelling among a group of labels.
    ///
    /// The longest label without an abbreviation wins; if every label uses an
    /// abbreviation, the longest overall. Ties go to the label seen first.
    #[must_use]
    pub fn suggest_canonical_name<S: AsRef<str>>(&self, labels: &[S]) -> String {
        let distinct = distinct_labels(labels);
        let unabbreviated: Vec<&str> = distinct
            .iter()
            .copied()
            .filter(|label| !clean(label).split(' ').any(is_abbreviation))
            .collect();

        let pool = if unabbreviated.is_empty() {
            &distinct
        } else {
            &unabbreviated
        };

        longest_first(pool).unwrap_or_default().to_string()
    }

    /// Count normalized words (longer than two characters) and word bigrams.
    ///
    /// Sorted by descending count, then alphabetically.
    #[must_use]
    pub fn extract_common_patterns<S: AsRef<str>>(&self, labels: &[S]) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for label in labels {
            let normalized = normalize(label.as_ref());
            let words: Vec<&str> = normalized.split_whitespace().collect();

            for word in &words {
                if word.chars().count() > 2 {
                    *counts.entry((*word).to_string()).or_default() += 1;
                }
            }
            for pair in words.windows(2) {
                *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
            }
        }

        let mut patterns: Vec<(String, usize)> = counts.into_iter().collect();
        patterns.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        patterns
    }
}

fn prepare(label: &str) -> PreparedLabel {
    PreparedLabel::new(normalize(label))
}

/// Distinct labels in first-seen order
fn distinct_labels<S: AsRef<str>>(labels: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    labels
        .iter()
        .map(AsRef::as_ref)
        .filter(|label| seen.insert(*label))
        .collect()
}

/// First label with the most characters
fn longest_first<'a>(labels: &[&'a str]) -> Option<&'a str> {
    labels.iter().copied().fold(None, |best, label| match best {
        Some(current) if current.chars().count() >= label.chars().count() => Some(current),
        _ => Some(label),
    })
}

/// Seed-anchored single pass: each unclustered label opens a cluster and
/// absorbs every later unclustered label that matches the seed.
fn greedy_clusters(count: usize, is_match: impl Fn(usize, usize) -> bool) -> Vec<Vec<usize>> {
    let mut assigned = vec![false; count];
    let mut clusters = Vec::new();

    for seed in 0..count {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut cluster = vec![seed];

        for other in (seed + 1)..count {
            if !assigned[other] && is_match(seed, other) {
                assigned[other] = true;
                cluster.push(other);
            }
        }
        clusters.push(cluster);
    }

    clusters
}

/// Union-find over all matching pairs
fn transitive_clusters(count: usize, is_match: impl Fn(usize, usize) -> bool) -> Vec<Vec<usize>> {
    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    let mut parent: Vec<usize> = (0..count).collect();
    for i in 0..count {
        for j in (i + 1)..count {
            if is_match(i, j) {
                let (root_i, root_j) = (find(&mut parent, i), find(&mut parent, j));
                if root_i != root_j {
                    // Lower index stays the root so groups order by first member
                    parent[root_i.max(root_j)] = root_i.min(root_j);
                }
            }
        }
    }

    let mut group_of_root: HashMap<usize, usize> = HashMap::new();
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for i in 0..count {
        let root = find(&mut parent, i);
        let group = *group_of_root.entry(root).or_insert_with(|| {
            clusters.push(Vec::new());
            clusters.len() - 1
        });
        clusters[group].push(i);
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> NameMatcher {
        NameMatcher::default()
    }

    #[test]
    fn test_similarity_exact_after_normalization() {
        let m = matcher();
        assert!((m.similarity("🌐 Website Redesign", "website redesign") - 1.0).abs() < 1e-9);
        assert!((m.similarity("Team Mgmt", "Team Management") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_empty_input() {
        let m = matcher();
        assert!(m.similarity("", "Website").abs() < 1e-9);
        assert!(m.similarity("Website", "").abs() < 1e-9);
        assert!(m.similarity("🌐", "🌐").abs() < 1e-9);
    }

    #[test]
    fn test_similarity_takes_maximum_metric() {
        let m = matcher();
        // Word order change: word Jaccard is 1.0 even though the sequence differs
        let score = m.similarity("Website Redesign", "Redesign Website");
        assert!((score - 1.0).abs() < 1e-9);

        let breakdown = m.similarity_breakdown("Website Redesign", "Redesign Website");
        let best = breakdown.iter().map(|s| s.score).fold(0.0, f64::max);
        assert!((best - score).abs() < 1e-9);
    }

    #[test]
    fn test_is_match_threshold() {
        let m = matcher();
        assert!(m.is_match("Garden", "Garden", 1.0));
        assert!(m.matches("Home Renovation", "Home Renovations"));
        assert!(!m.matches("Home Renovation", "Tax Return"));
        assert!(m.is_match("Home Renovation", "Tax Return", 0.0));
    }

    #[test]
    fn test_cluster_groups_matches_and_collapses_duplicates() {
        let m = matcher();
        let clusters = m.cluster(&[
            "Website Redesign",
            "Tax Return 2024",
            "🌐 Website Redesign",
            "Website Redesign",
            "tax return 2024",
        ]);
        assert_eq!(
            clusters,
            vec![
                vec!["Website Redesign".to_string(), "🌐 Website Redesign".to_string()],
                vec!["Tax Return 2024".to_string(), "tax return 2024".to_string()],
            ]
        );
    }

    #[test]
    fn test_greedy_is_seed_anchored() {
        // 0~1 and 1~2 match, 0~2 do not
        let relation = |i: usize, j: usize| matches!((i, j), (0, 1) | (1, 2) | (1, 0) | (2, 1));
        assert_eq!(greedy_clusters(3, relation), vec![vec![0, 1], vec![2]]);
        assert_eq!(transitive_clusters(3, relation), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_greedy_absorbs_all_matches_of_seed() {
        // 1 and 2 never match each other but both match the seed
        let relation = |i: usize, j: usize| matches!((i.min(j), i.max(j)), (0, 1) | (0, 2));
        assert_eq!(greedy_clusters(3, relation), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_transitive_clusters_order_by_first_member() {
        let relation = |i: usize, j: usize| matches!((i.min(j), i.max(j)), (1, 3) | (2, 3));
        assert_eq!(
            transitive_clusters(4, relation),
            vec![vec![0], vec![1, 2, 3]]
        );
    }

    #[test]
    fn test_suggest_canonical_name_prefers_unabbreviated() {
        let m = matcher();
        assert_eq!(
            m.suggest_canonical_name(&["Team Mgmt", "Team Management", "team management"]),
            "Team Management"
        );
    }

    #[test]
    fn test_suggest_canonical_name_falls_back_to_longest() {
        let m = matcher();
        assert_eq!(
            m.suggest_canonical_name(&["Dev Ops", "Dev Operations"]),
            "Dev Operations"
        );
        assert_eq!(m.suggest_canonical_name(&["Solo"]), "Solo");
        assert_eq!(m.suggest_canonical_name::<&str>(&[]), "");
    }

    #[test]
    fn test_find_best_matches() {
        let m = matcher();
        let candidates = [
            "Tax Return",
            "Website Redesign",
            "🌐 Website Redesign",
            "Website Redesigns",
        ];
        let found = m.find_best_matches("website redesign", &candidates, 2);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].label, "Website Redesign");
        assert_eq!(found[1].label, "🌐 Website Redesign");
        assert!(found.iter().all(|c| c.score >= m.threshold()));
    }

    #[test]
    fn test_extract_common_patterns() {
        let m = matcher();
        let patterns = m.extract_common_patterns(&["Website Redesign", "Website Launch", "QA"]);
        assert_eq!(patterns[0], ("website".to_string(), 2));
        assert!(patterns.contains(&("website redesign".to_string(), 1)));
        assert!(patterns.contains(&("quality assurance".to_string(), 1)));
        // Two-letter words are not counted alone
        assert!(!patterns.iter().any(|(p, _)| p == "qa"));
    }
}
