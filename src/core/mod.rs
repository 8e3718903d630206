//! Core data types for cross-tool auditing.
//!
//! - [`Record`]: one tool's report of a project or area, validated on construction
//! - [`Provenance`]: typed source-specific identifiers carried by a record
//! - [`ItemKind`], [`Category`], [`Source`]: record classification
//! - [`Severity`], [`InconsistencyKind`]: audit result classification
//!
//! ## Sources
//!
//! | Source | Role |
//! |--------|------|
//! | `task_manager` | authoritative for work/personal category |
//! | `cloud_storage_work` | work account folders |
//! | `cloud_storage_personal` | personal account folders |
//! | `notes` | notes app folders |

pub mod record;
pub mod types;

pub use record::{Provenance, Record, RecordError};
pub use types::{Category, InconsistencyKind, ItemKind, Severity, Source};
