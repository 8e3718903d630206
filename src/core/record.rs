use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Category, ItemKind, Source};
use crate::matching::normalize::{starts_with_marker, strip_marker};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record name cannot be empty")]
    EmptyName,

    #[error("Record name '{0}' has no comparable characters")]
    NoComparableText(String),

    #[error("{provenance} provenance cannot describe a record from {tool}")]
    ProvenanceMismatch {
        provenance: &'static str,
        tool: Source,
    },
}

/// Source-specific identifiers carried along with a record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Provenance {
    /// A task manager project
    TaskManager {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        project_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<i64>,
    },
    /// A folder in either cloud storage account
    CloudStorage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        folder_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        web_view_link: Option<String>,
    },
    /// A folder in the notes app
    Notes {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_folder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        folder_type: Option<String>,
    },
    #[default]
    Unspecified,
}

impl Provenance {
    fn label(&self) -> &'static str {
        match self {
            Self::TaskManager { .. } => "Task manager",
            Self::CloudStorage { .. } => "Cloud storage",
            Self::Notes { .. } => "Notes",
            Self::Unspecified => "Unspecified",
        }
    }

    /// Can a record from `source` carry this provenance?
    #[must_use]
    pub fn fits(&self, source: Source) -> bool {
        match self {
            Self::TaskManager { .. } => source == Source::TaskManager,
            Self::CloudStorage { .. } => source.is_cloud_storage(),
            Self::Notes { .. } => source == Source::Notes,
            Self::Unspecified => true,
        }
    }
}

/// One tool's report of a single project or area.
///
/// Records are validated on construction and immutable afterwards; the
/// audit derives adjusted copies instead of editing them. Two records are
/// equal when their normalized name, source and category agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RecordData")]
pub struct Record {
    display_name: String,
    normalized_name: String,
    kind: ItemKind,
    is_active: bool,
    category: Category,
    source: Source,
    #[serde(skip_serializing_if = "is_unspecified")]
    provenance: Provenance,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, serde_json::Value>,
}

fn is_unspecified(provenance: &Provenance) -> bool {
    matches!(provenance, Provenance::Unspecified)
}

/// Wire form of a [`Record`]; converted through [`Record::new`] so loaded
/// records are validated like constructed ones. Unknown fields are rejected;
/// the serialized `normalized_name` is accepted and recomputed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordData {
    display_name: String,
    kind: ItemKind,
    #[serde(default)]
    is_active: bool,
    category: Category,
    source: Source,
    #[serde(default)]
    provenance: Provenance,
    #[serde(default)]
    attributes: BTreeMap<String, serde_json::Value>,
    #[serde(default, rename = "normalized_name")]
    _normalized_name: Option<serde::de::IgnoredAny>,
}

impl TryFrom<RecordData> for Record {
    type Error = RecordError;

    fn try_from(data: RecordData) -> Result<Self, Self::Error> {
        let mut record = Self::new(
            data.display_name,
            data.kind,
            data.is_active,
            data.category,
            data.source,
        )?
        .with_provenance(data.provenance)?;
        record.attributes = data.attributes;
        Ok(record)
    }
}

impl Record {
    /// Create a validated record.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::EmptyName` if the name is blank, or
    /// `RecordError::NoComparableText` if nothing is left after normalization.
    pub fn new(
        display_name: impl Into<String>,
        kind: ItemKind,
        is_active: bool,
        category: Category,
        source: Source,
    ) -> Result<Self, RecordError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }

        let normalized_name = normalize_record_name(&display_name);
        if normalized_name.is_empty() {
            return Err(RecordError::NoComparableText(display_name));
        }

        Ok(Self {
            display_name,
            normalized_name,
            kind,
            is_active,
            category,
            source,
            provenance: Provenance::Unspecified,
            attributes: BTreeMap::new(),
        })
    }

    /// Attach source-specific identifiers.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::ProvenanceMismatch` if the provenance belongs to a
    /// different kind of tool than the record's source.
    pub fn with_provenance(mut self, provenance: Provenance) -> Result<Self, RecordError> {
        if !provenance.fits(self.source) {
            return Err(RecordError::ProvenanceMismatch {
                provenance: provenance.label(),
                tool: self.source,
            });
        }
        self.provenance = provenance;
        Ok(self)
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Copy of this record with a different category
    #[must_use]
    pub fn with_category(&self, category: Category) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }

    /// Label exactly as the source tool reports it
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Lower-cased, punctuation-free form used for equality and hashing
    #[must_use]
    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }

    #[must_use]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    /// Does the display name start with a pictographic marker?
    #[must_use]
    pub fn has_marker(&self) -> bool {
        starts_with_marker(&self.display_name)
    }

    /// Display name without its leading marker
    #[must_use]
    pub fn name_without_marker(&self) -> &str {
        strip_marker(&self.display_name)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_name == other.normalized_name
            && self.source == other.source
            && self.category == other.category
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_name.hash(state);
        self.source.hash(state);
        self.category.hash(state);
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {}, {}, {})",
            self.display_name,
            self.kind,
            if self.is_active { "active" } else { "inactive" },
            self.category,
            self.source
        )
    }
}

/// Trim, lower-case, drop punctuation (markers and other astral-plane symbols
/// are kept) and collapse whitespace.
fn normalize_record_name(name: &str) -> String {
    let kept: String = name
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || u32::from(*c) >= 0x10000)
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
