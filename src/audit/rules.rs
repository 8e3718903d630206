//! Per-cluster consistency rules.
//!
//! Every rule looks at one cluster of records that were judged to describe
//! the same item (after category propagation) and reports at most one
//! inconsistency, except [`wrong_account`] which reports one per task
//! manager record that points at the wrong cloud storage account.

use tracing::debug;

use crate::audit::inconsistency::{
    format_sources, group_sources, Inconsistency, InconsistencyDetail, NameVariant, SourceGroup,
};
use crate::core::record::Record;
use crate::core::types::{Category, Source};
use crate::matching::NameMatcher;

/// Run every rule against a cluster of two or more records.
///
/// Singletons are handled by [`missing_record`] instead and yield nothing here.
#[must_use]
pub fn evaluate_cluster(cluster: &[Record], matcher: &NameMatcher) -> Vec<Inconsistency> {
    if cluster.len() < 2 {
        return Vec::new();
    }

    let mut found = Vec::new();
    found.extend(status_mismatch(cluster));
    found.extend(kind_mismatch(cluster));
    found.extend(category_mismatch(cluster));
    found.extend(wrong_account(cluster));
    found.extend(name_variation(cluster, matcher));
    found.extend(missing_marker(cluster));

    for inconsistency in &found {
        debug!(
            "{} in cluster '{}': {}",
            inconsistency.kind,
            cluster[0].display_name(),
            inconsistency.description
        );
    }
    found
}

/// A record that no other tool reports
#[must_use]
pub fn missing_record(record: &Record) -> Inconsistency {
    let name = record.display_name();
    Inconsistency::new(
        format!("'{name}' exists only in {}", record.source()),
        vec![record.clone()],
        format!("Add '{name}' to the other tools or verify it should exist"),
        InconsistencyDetail::MissingRecord {
            source: record.source(),
        },
    )
}

/// Some records are active and others are not
#[must_use]
pub fn status_mismatch(cluster: &[Record]) -> Option<Inconsistency> {
    let (active, inactive): (Vec<&Record>, Vec<&Record>) =
        cluster.iter().partition(|r| r.is_active());
    if active.is_empty() || inactive.is_empty() {
        return None;
    }

    let active_sources: Vec<Source> = active.iter().map(|r| r.source()).collect();
    let inactive_sources: Vec<Source> = inactive.iter().map(|r| r.source()).collect();

    Some(Inconsistency::new(
        format!(
            "'{}' is active in {} but inactive in {}",
            cluster[0].display_name(),
            format_sources(&active_sources),
            format_sources(&inactive_sources)
        ),
        cluster.to_vec(),
        "Decide whether this should be active or inactive and update all tools",
        InconsistencyDetail::StatusMismatch {
            active_sources,
            inactive_sources,
        },
    ))
}

/// Records disagree on project vs area
#[must_use]
pub fn kind_mismatch(cluster: &[Record]) -> Option<Inconsistency> {
    let kind_sources = group_sources(cluster, Record::kind);
    if kind_sources.len() < 2 {
        return None;
    }

    Some(Inconsistency::new(
        format!(
            "'{}' has different kinds: {}",
            cluster[0].display_name(),
            describe_groups(&kind_sources)
        ),
        cluster.to_vec(),
        "Standardize whether this should be a Project or an Area across all tools",
        InconsistencyDetail::KindMismatch { kind_sources },
    ))
}

/// Records disagree on work vs personal
#[must_use]
pub fn category_mismatch(cluster: &[Record]) -> Option<Inconsistency> {
    let category_sources = group_sources(cluster, Record::category);
    if category_sources.len() < 2 {
        return None;
    }

    Some(Inconsistency::new(
        format!(
            "'{}' has different categories: {}",
            cluster[0].display_name(),
            describe_groups(&category_sources)
        ),
        cluster.to_vec(),
        "Verify and standardize whether this is work or personal",
        InconsistencyDetail::CategoryMismatch { category_sources },
    ))
}

/// Task manager category points at one cloud storage account but the folder
/// lives in the other.
///
/// Clusters without a task manager record are never flagged, even when the
/// two cloud storage accounts both hold the item.
#[must_use]
pub fn wrong_account(cluster: &[Record]) -> Vec<Inconsistency> {
    cluster
        .iter()
        .filter(|r| r.source() == Source::TaskManager)
        .filter_map(|task| {
            let expected = task.category();
            let actual = opposite(expected);
            let misplaced: Vec<&Record> = cluster
                .iter()
                .filter(|r| r.source() == Source::cloud_storage_for(actual))
                .collect();
            if misplaced.is_empty() {
                return None;
            }

            let mut items = vec![task.clone()];
            items.extend(misplaced.into_iter().cloned());

            Some(Inconsistency::new(
                format!(
                    "'{}' is marked as {expected} but found in {}",
                    task.display_name(),
                    Source::cloud_storage_for(actual)
                ),
                items,
                format!("Move to the {expected} cloud storage account or update the category"),
                InconsistencyDetail::WrongAccount {
                    expected_account: expected,
                    actual_account: actual,
                },
            ))
        })
        .collect()
}

/// Raw display names are not all identical
#[must_use]
pub fn name_variation(cluster: &[Record], matcher: &NameMatcher) -> Option<Inconsistency> {
    let names: Vec<&str> = cluster.iter().map(Record::display_name).collect();
    let first = names.first()?;
    if names.iter().all(|n| n == first) {
        return None;
    }

    let canonical_name = matcher.suggest_canonical_name(&names);

    let mut variations: Vec<NameVariant> = Vec::new();
    for record in cluster.iter().filter(|r| r.display_name() != canonical_name) {
        match variations
            .iter_mut()
            .find(|v| v.name == record.display_name())
        {
            Some(variant) => variant.sources.push(record.source()),
            None => variations.push(NameVariant {
                name: record.display_name().to_string(),
                sources: vec![record.source()],
            }),
        }
    }
    if variations.is_empty() {
        return None;
    }

    let description = variations
        .iter()
        .map(|v| format!("'{}' in {}", v.name, format_sources(&v.sources)))
        .collect::<Vec<_>>()
        .join(", ");

    Some(Inconsistency::new(
        format!("Name variations found: {description}"),
        cluster.to_vec(),
        format!("Standardize the name to '{canonical_name}' across all tools"),
        InconsistencyDetail::NameVariation {
            canonical_name,
            variations,
        },
    ))
}

/// Some records carry the leading marker and others do not
#[must_use]
pub fn missing_marker(cluster: &[Record]) -> Option<Inconsistency> {
    let (marked, plain): (Vec<&Record>, Vec<&Record>) =
        cluster.iter().partition(|r| r.has_marker());
    if marked.is_empty() || plain.is_empty() {
        return None;
    }

    let marker_sources: Vec<Source> = marked.iter().map(|r| r.source()).collect();
    let plain_sources: Vec<Source> = plain.iter().map(|r| r.source()).collect();

    Some(Inconsistency::new(
        format!(
            "'{}' has a marker in {} but not in {}",
            cluster[0].display_name(),
            format_sources(&marker_sources),
            format_sources(&plain_sources)
        ),
        cluster.to_vec(),
        "Add the marker prefix to the items missing it",
        InconsistencyDetail::MissingMarker {
            marker_sources,
            plain_sources,
        },
    ))
}

fn opposite(category: Category) -> Category {
    match category {
        Category::Work => Category::Personal,
        Category::Personal => Category::Work,
    }
}

fn describe_groups<T: std::fmt::Display>(groups: &[SourceGroup<T>]) -> String {
    groups
        .iter()
        .map(|g| format!("{} in {}", g.value, format_sources(&g.sources)))
        .collect::<Vec<_>>()
        .join(", ")
}
