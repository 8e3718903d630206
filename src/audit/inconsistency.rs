use serde::Serialize;

use crate::core::record::Record;
use crate::core::types::{Category, InconsistencyKind, ItemKind, Severity, Source};

/// Sources that reported the same value for a disputed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceGroup<T> {
    pub value: T,
    pub sources: Vec<Source>,
}

/// A spelling that differs from the canonical name, and where it is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameVariant {
    pub name: String,
    pub sources: Vec<Source>,
}

/// Structured facts behind an inconsistency, one variant per kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InconsistencyDetail {
    MissingRecord {
        source: Source,
    },
    StatusMismatch {
        active_sources: Vec<Source>,
        inactive_sources: Vec<Source>,
    },
    KindMismatch {
        kind_sources: Vec<SourceGroup<ItemKind>>,
    },
    CategoryMismatch {
        category_sources: Vec<SourceGroup<Category>>,
    },
    WrongAccount {
        expected_account: Category,
        actual_account: Category,
    },
    NameVariation {
        canonical_name: String,
        variations: Vec<NameVariant>,
    },
    MissingMarker {
        marker_sources: Vec<Source>,
        plain_sources: Vec<Source>,
    },
}

impl InconsistencyDetail {
    #[must_use]
    pub fn kind(&self) -> InconsistencyKind {
        match self {
            Self::MissingRecord { .. } => InconsistencyKind::MissingRecord,
            Self::StatusMismatch { .. } => InconsistencyKind::StatusMismatch,
            Self::KindMismatch { .. } => InconsistencyKind::KindMismatch,
            Self::CategoryMismatch { .. } => InconsistencyKind::CategoryMismatch,
            Self::WrongAccount { .. } => InconsistencyKind::WrongAccount,
            Self::NameVariation { .. } => InconsistencyKind::NameVariation,
            Self::MissingMarker { .. } => InconsistencyKind::MissingMarker,
        }
    }
}

/// A disagreement between records judged to describe the same item
#[derive(Debug, Clone, Serialize)]
pub struct Inconsistency {
    pub kind: InconsistencyKind,
    pub description: String,
    pub severity: Severity,
    /// Records implicated, in cluster order
    pub items: Vec<Record>,
    pub suggested_action: String,
    pub detail: InconsistencyDetail,
}

impl Inconsistency {
    /// Build an inconsistency; kind and severity follow from the detail.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        items: Vec<Record>,
        suggested_action: impl Into<String>,
        detail: InconsistencyDetail,
    ) -> Self {
        let kind = detail.kind();
        Self {
            kind,
            description: description.into(),
            severity: kind.severity(),
            items,
            suggested_action: suggested_action.into(),
            detail,
        }
    }
}

/// Comma-separated human-readable source names
pub(crate) fn format_sources(sources: &[Source]) -> String {
    sources
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Group records' sources by a field value, keeping first-seen value order
pub(crate) fn group_sources<T: PartialEq + Copy>(
    records: &[Record],
    value_of: impl Fn(&Record) -> T,
) -> Vec<SourceGroup<T>> {
    let mut groups: Vec<SourceGroup<T>> = Vec::new();
    for record in records {
        let value = value_of(record);
        match groups.iter_mut().find(|g| g.value == value) {
            Some(group) => group.sources.push(record.source()),
            None => groups.push(SourceGroup {
                value,
                sources: vec![record.source()],
            }),
        }
    }
    groups
}
