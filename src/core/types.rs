use serde::{Deserialize, Serialize};

/// PARA classification of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Project,
    Area,
}

impl ItemKind {
    pub const ALL: [Self; 2] = [Self::Project, Self::Area];
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => write!(f, "Project"),
            Self::Area => write!(f, "Area"),
        }
    }
}

/// Work/personal split of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    Personal,
}

impl Category {
    pub const ALL: [Self; 2] = [Self::Work, Self::Personal];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Personal => write!(f, "personal"),
        }
    }
}

/// Tool a record was reported by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The task manager; authoritative for work/personal category
    TaskManager,
    /// Cloud storage account used for work
    CloudStorageWork,
    /// Cloud storage account used for personal files
    CloudStoragePersonal,
    /// The notes app
    Notes,
}

impl Source {
    pub const ALL: [Self; 4] = [
        Self::TaskManager,
        Self::CloudStorageWork,
        Self::CloudStoragePersonal,
        Self::Notes,
    ];

    /// Stable snake_case identifier, matching the serialized form
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskManager => "task_manager",
            Self::CloudStorageWork => "cloud_storage_work",
            Self::CloudStoragePersonal => "cloud_storage_personal",
            Self::Notes => "notes",
        }
    }

    #[must_use]
    pub fn is_cloud_storage(self) -> bool {
        matches!(self, Self::CloudStorageWork | Self::CloudStoragePersonal)
    }

    /// The cloud storage account that holds items of the given category
    #[must_use]
    pub fn cloud_storage_for(category: Category) -> Self {
        match category {
            Category::Work => Self::CloudStorageWork,
            Category::Personal => Self::CloudStoragePersonal,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskManager => write!(f, "task manager"),
            Self::CloudStorageWork => write!(f, "cloud storage (work)"),
            Self::CloudStoragePersonal => write!(f, "cloud storage (personal)"),
            Self::Notes => write!(f, "notes"),
        }
    }
}

/// How urgently an inconsistency should be fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Type of disagreement found between records of one cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InconsistencyKind {
    MissingRecord,
    StatusMismatch,
    KindMismatch,
    CategoryMismatch,
    WrongAccount,
    NameVariation,
    MissingMarker,
}

impl InconsistencyKind {
    pub const ALL: [Self; 7] = [
        Self::MissingRecord,
        Self::StatusMismatch,
        Self::KindMismatch,
        Self::CategoryMismatch,
        Self::WrongAccount,
        Self::NameVariation,
        Self::MissingMarker,
    ];

    /// Severity is fixed per kind
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::StatusMismatch | Self::KindMismatch | Self::WrongAccount => Severity::High,
            Self::MissingRecord | Self::CategoryMismatch => Severity::Medium,
            Self::NameVariation | Self::MissingMarker => Severity::Low,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingRecord => "missing_record",
            Self::StatusMismatch => "status_mismatch",
            Self::KindMismatch => "kind_mismatch",
            Self::CategoryMismatch => "category_mismatch",
            Self::WrongAccount => "wrong_account",
            Self::NameVariation => "name_variation",
            Self::MissingMarker => "missing_marker",
        }
    }
}

impl std::fmt::Display for InconsistencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
