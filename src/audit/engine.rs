use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audit::result::ComparisonResult;
use crate::audit::rules::{evaluate_cluster, missing_record};
use crate::core::record::Record;
use crate::core::types::Source;
use crate::matching::{ClusterStrategy, NameMatcher, DEFAULT_SIMILARITY_THRESHOLD};
use crate::utils::validation::{validate_threshold, ValidationError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidThreshold(#[from] ValidationError),
}

/// Configuration for the reconciliation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Minimum label similarity for two records to describe the same item
    pub similarity_threshold: f64,
    /// How matching labels are grouped
    pub cluster_strategy: ClusterStrategy,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            cluster_strategy: ClusterStrategy::Greedy,
        }
    }
}

impl AuditConfig {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed or fails
    /// validation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string; missing fields take defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` if the threshold is outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold(self.similarity_threshold)?;
        Ok(())
    }
}

/// Clusters records reported by different tools and flags disagreements.
///
/// The engine is a pure function of its input: records are read, never
/// modified, and every adjusted value lives in the returned result.
#[derive(Debug)]
pub struct ReconciliationEngine {
    matcher: NameMatcher,
    config: AuditConfig,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self {
            matcher: NameMatcher::new(DEFAULT_SIMILARITY_THRESHOLD),
            config: AuditConfig::default(),
        }
    }
}

impl ReconciliationEngine {
    /// Create an engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` if the configuration fails validation.
    pub fn with_config(config: AuditConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            matcher: NameMatcher::new(config.similarity_threshold),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    #[must_use]
    pub fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }

    /// Audit a record set.
    ///
    /// 1. cluster records by display name
    /// 2. copy the task manager category onto the other records of its cluster
    /// 3. report single-record clusters as orphans
    /// 4. run the consistency rules on every larger cluster
    #[must_use]
    pub fn compare(&self, records: &[Record]) -> ComparisonResult {
        info!("Comparing {} records across tools", records.len());
        if records.is_empty() {
            return ComparisonResult::empty();
        }
        warn_on_duplicates(records);

        let clusters: Vec<Vec<Record>> = self
            .cluster_records(records)
            .into_iter()
            .map(|cluster| propagate_category(&cluster))
            .collect();

        let orphans: Vec<Record> = clusters
            .iter()
            .filter(|c| c.len() == 1)
            .map(|c| c[0].clone())
            .collect();

        let mut inconsistencies = Vec::new();
        let mut consistent_items = 0;
        for cluster in clusters.iter().filter(|c| c.len() > 1) {
            let found = evaluate_cluster(cluster, &self.matcher);
            if found.is_empty() {
                consistent_items += cluster.len();
            }
            inconsistencies.extend(found);
        }
        inconsistencies.extend(orphans.iter().map(missing_record));

        info!(
            "Formed {} clusters ({} orphans), found {} inconsistencies",
            clusters.len(),
            orphans.len(),
            inconsistencies.len()
        );

        ComparisonResult {
            total_items: records.len(),
            consistent_items,
            inconsistencies,
            clusters,
            orphans,
        }
    }

    /// Group records by matching display names.
    ///
    /// Identical display names always land together; within a cluster,
    /// records keep their input order.
    fn cluster_records<'a>(&self, records: &'a [Record]) -> Vec<Vec<&'a Record>> {
        let mut labels: Vec<&str> = Vec::new();
        let mut label_index: HashMap<&str, usize> = HashMap::new();
        for record in records {
            label_index.entry(record.display_name()).or_insert_with(|| {
                labels.push(record.display_name());
                labels.len() - 1
            });
        }

        let label_groups = self
            .matcher
            .cluster_indices(&labels, self.config.cluster_strategy);

        let mut cluster_of_label = vec![0; labels.len()];
        for (cluster, group) in label_groups.iter().enumerate() {
            for &label in group {
                cluster_of_label[label] = cluster;
            }
        }

        let mut clusters: Vec<Vec<&Record>> = vec![Vec::new(); label_groups.len()];
        for record in records {
            let label = label_index[record.display_name()];
            clusters[cluster_of_label[label]].push(record);
        }

        debug!(
            "Clustered {} distinct labels into {} groups",
            labels.len(),
            clusters.len()
        );
        clusters
    }
}

/// Copy the first task manager record's category onto every record of the
/// cluster that does not come from the task manager.
fn propagate_category(cluster: &[&Record]) -> Vec<Record> {
    let authority = cluster
        .iter()
        .find(|r| r.source() == Source::TaskManager)
        .map(|r| r.category());

    cluster
        .iter()
        .map(|record| match authority {
            Some(category)
                if record.source() != Source::TaskManager && record.category() != category =>
            {
                debug!(
                    "Category of '{}' in {} set to {category} from task manager",
                    record.display_name(),
                    record.source()
                );
                record.with_category(category)
            }
            _ => (*record).clone(),
        })
        .collect()
}

fn warn_on_duplicates(records: &[Record]) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record) {
            warn!(
                "Duplicate record '{}' from {} ({})",
                record.display_name(),
                record.source(),
                record.category()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Category, InconsistencyKind, ItemKind};

    fn record(name: &str, active: bool, category: Category, source: Source) -> Record {
        Record::new(name, ItemKind::Project, active, category, source).unwrap()
    }

    #[test]
    fn test_compare_empty() {
        let result = ReconciliationEngine::new().compare(&[]);
        assert_eq!(result.total_items, 0);
        assert!(result.clusters.is_empty());
        assert!((result.consistency_score() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_propagation_does_not_touch_input() {
        let records = vec![
            record("Budget", true, Category::Work, Source::TaskManager),
            record("Budget", true, Category::Personal, Source::Notes),
        ];
        let result = ReconciliationEngine::new().compare(&records);

        assert_eq!(records[1].category(), Category::Personal);
        assert_eq!(result.clusters.len(), 1);
        assert!(result.clusters[0]
            .iter()
            .all(|r| r.category() == Category::Work));
        assert_eq!(result.inconsistencies_of(InconsistencyKind::CategoryMismatch).count(), 0);
        assert_eq!(result.consistent_items, 2);
    }

    #[test]
    fn test_category_mismatch_without_task_manager() {
        let records = vec![
            record("Budget", true, Category::Work, Source::CloudStorageWork),
            record("Budget", true, Category::Personal, Source::Notes),
        ];
        let result = ReconciliationEngine::new().compare(&records);
        assert_eq!(result.inconsistencies_of(InconsistencyKind::CategoryMismatch).count(), 1);
        assert_eq!(result.consistent_items, 0);
    }

    #[test]
    fn test_identical_labels_cluster_together() {
        let records = vec![
            record("Garden", true, Category::Personal, Source::Notes),
            record("Taxes", true, Category::Personal, Source::Notes),
            record("Garden", true, Category::Personal, Source::CloudStoragePersonal),
        ];
        let result = ReconciliationEngine::new().compare(&records);
        assert_eq!(result.clusters.len(), 2);
        assert_eq!(result.clusters[0].len(), 2);
        assert_eq!(result.clusters[0][1].source(), Source::CloudStoragePersonal);
        assert_eq!(result.orphans.len(), 1);
        assert_eq!(result.orphans[0].display_name(), "Taxes");
    }

    #[test]
    fn test_missing_records_follow_cluster_findings() {
        let records = vec![
            record("Lonely", true, Category::Work, Source::Notes),
            record("Budget", true, Category::Work, Source::TaskManager),
            record("Budget", false, Category::Work, Source::Notes),
        ];
        let result = ReconciliationEngine::new().compare(&records);
        let kinds: Vec<InconsistencyKind> = result.inconsistencies.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![InconsistencyKind::StatusMismatch, InconsistencyKind::MissingRecord]
        );
    }

    #[test]
    fn test_with_config_rejects_bad_threshold() {
        let config = AuditConfig {
            similarity_threshold: 1.5,
            ..AuditConfig::default()
        };
        assert!(matches!(
            ReconciliationEngine::with_config(config),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config = AuditConfig::from_json(r#"{"cluster_strategy": "transitive"}"#).unwrap();
        assert_eq!(config.cluster_strategy, ClusterStrategy::Transitive);
        assert!((config.similarity_threshold - DEFAULT_SIMILARITY_THRESHOLD).abs() < f64::EPSILON);

        assert!(matches!(
            AuditConfig::from_json(r#"{"threshold": 0.5}"#),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            AuditConfig::from_json(r#"{"similarity_threshold": -1}"#),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }
}
