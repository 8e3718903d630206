//! Fuzzy name matching for project and area labels.
//!
//! - [`normalize`](normalize::normalize): canonical lower-case form of a label
//! - [`SimilarityMetric`]: pluggable pairwise score on normalized labels
//! - [`NameMatcher`]: similarity, thresholded matching, clustering and
//!   canonical-name selection
//!
//! ## Similarity
//!
//! Labels are compared after normalization with four metrics, and the
//! maximum wins:
//!
//! 1. **Sequence ratio**: Ratcliff/Obershelp matching-blocks ratio
//! 2. **Word Jaccard**: word sets without stop words
//! 3. **Longest common substring**: over the mean label length
//! 4. **Trigram Jaccard**: character shingles of length 3
//!
//! No single metric copes with short labels, abbreviation drift and word
//! reordering at once; the maximum favors recall.
//!
//! ## Example
//!
//! ```rust
//! use para_audit::matching::NameMatcher;
//!
//! let matcher = NameMatcher::default();
//! assert!(matcher.matches("🌐 Website Redesign", "website redesign"));
//!
//! let clusters = matcher.cluster(&["Team Mgmt", "Tax Return", "Team Management"]);
//! assert_eq!(clusters.len(), 2);
//! ```

pub mod name_matcher;
pub mod normalize;
pub mod scoring;

pub use name_matcher::{ClusterStrategy, NameMatcher, DEFAULT_SIMILARITY_THRESHOLD};
pub use scoring::{PreparedLabel, SimilarityMetric};
