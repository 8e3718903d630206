use std::collections::BTreeMap;

use serde::Serialize;

use crate::audit::inconsistency::Inconsistency;
use crate::core::record::Record;
use crate::core::types::{Category, InconsistencyKind, ItemKind, Severity, Source};
use crate::utils::validation::count_to_f64;

/// Outcome of auditing a record set
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub total_items: usize,

    /// Records in clusters of two or more that triggered no rule
    pub consistent_items: usize,

    pub inconsistencies: Vec<Inconsistency>,

    /// Every cluster formed, singletons included, with propagated categories
    pub clusters: Vec<Vec<Record>>,

    /// Records found in only one source
    pub orphans: Vec<Record>,
}

impl ComparisonResult {
    /// Result for an empty record set
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_items: 0,
            consistent_items: 0,
            inconsistencies: Vec::new(),
            clusters: Vec::new(),
            orphans: Vec::new(),
        }
    }

    /// Fraction of records in rule-clean clusters; 1.0 for an empty audit
    #[must_use]
    pub fn consistency_score(&self) -> f64 {
        if self.total_items == 0 {
            return 1.0;
        }
        count_to_f64(self.consistent_items) / count_to_f64(self.total_items)
    }

    #[must_use]
    pub fn severity_count(&self, severity: Severity) -> usize {
        self.inconsistencies
            .iter()
            .filter(|i| i.severity == severity)
            .count()
    }

    #[must_use]
    pub fn high_severity_count(&self) -> usize {
        self.severity_count(Severity::High)
    }

    #[must_use]
    pub fn medium_severity_count(&self) -> usize {
        self.severity_count(Severity::Medium)
    }

    #[must_use]
    pub fn low_severity_count(&self) -> usize {
        self.severity_count(Severity::Low)
    }

    /// Inconsistencies of one kind, in report order
    pub fn inconsistencies_of(
        &self,
        kind: InconsistencyKind,
    ) -> impl Iterator<Item = &Inconsistency> + '_ {
        self.inconsistencies.iter().filter(move |i| i.kind == kind)
    }

    /// Highest severity present, if any inconsistency was found
    #[must_use]
    pub fn worst_severity(&self) -> Option<Severity> {
        self.inconsistencies.iter().map(|i| i.severity).max()
    }

    /// Aggregate counts for reporting
    #[must_use]
    pub fn summary(&self) -> SummaryStatistics {
        let mut inconsistency_types: BTreeMap<InconsistencyKind, usize> =
            InconsistencyKind::ALL.iter().map(|k| (*k, 0)).collect();
        for inconsistency in &self.inconsistencies {
            *inconsistency_types.entry(inconsistency.kind).or_default() += 1;
        }

        let mut items_per_source: BTreeMap<Source, usize> =
            Source::ALL.iter().map(|s| (*s, 0)).collect();
        let mut items_per_kind: BTreeMap<ItemKind, usize> =
            ItemKind::ALL.iter().map(|k| (*k, 0)).collect();
        let mut items_per_category: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|c| (*c, 0)).collect();

        for record in self.clusters.iter().flatten() {
            *items_per_source.entry(record.source()).or_default() += 1;
            *items_per_kind.entry(record.kind()).or_default() += 1;
            *items_per_category.entry(record.category()).or_default() += 1;
        }

        SummaryStatistics {
            total_items: self.total_items,
            consistent_items: self.consistent_items,
            consistency_score: self.consistency_score(),
            total_inconsistencies: self.inconsistencies.len(),
            high_severity_count: self.high_severity_count(),
            medium_severity_count: self.medium_severity_count(),
            low_severity_count: self.low_severity_count(),
            inconsistency_types,
            items_per_source,
            items_per_kind,
            items_per_category,
            orphaned_items_count: self.orphans.len(),
            cluster_count: self.clusters.len(),
        }
    }
}

/// Counts derived from a [`ComparisonResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_items: usize,
    pub consistent_items: usize,
    pub consistency_score: f64,
    pub total_inconsistencies: usize,
    pub high_severity_count: usize,
    pub medium_severity_count: usize,
    pub low_severity_count: usize,
    pub inconsistency_types: BTreeMap<InconsistencyKind, usize>,
    pub items_per_source: BTreeMap<Source, usize>,
    pub items_per_kind: BTreeMap<ItemKind, usize>,
    pub items_per_category: BTreeMap<Category, usize>,
    pub orphaned_items_count: usize,
    pub cluster_count: usize,
}
