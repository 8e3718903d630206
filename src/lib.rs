//! # para-audit
//!
//! A library for reconciling projects and areas that are tracked in several
//! personal-organization tools at once.
//!
//! The same project usually lives in a task manager, as a folder in one of
//! two cloud storage accounts, and as a folder in a notes app. Over time the
//! copies drift: one is archived while another stays active, a project is
//! promoted to an area in one place only, a folder ends up in the wrong
//! account, or the name is abbreviated differently in each tool.
//!
//! `para-audit` clusters records that name the same item and reports every
//! disagreement it finds.
//!
//! ## Features
//!
//! - **Fuzzy name matching**: Accent, case, marker and abbreviation insensitive
//! - **Category propagation**: The task manager decides work vs personal
//! - **Seven consistency rules**: Each with a severity and a suggested fix
//! - **Summary statistics**: Counts per source, kind, category and rule
//!
//! ## Example
//!
//! ```rust
//! use para_audit::{Category, ItemKind, ReconciliationEngine, Record, Source};
//!
//! let records = vec![
//!     Record::new("Team Mgmt", ItemKind::Project, true, Category::Work, Source::TaskManager)?,
//!     Record::new("Team Management", ItemKind::Project, false, Category::Work, Source::Notes)?,
//! ];
//!
//! let result = ReconciliationEngine::new().compare(&records);
//! for inconsistency in &result.inconsistencies {
//!     println!("[{}] {}", inconsistency.severity, inconsistency.description);
//! }
//! # Ok::<(), para_audit::RecordError>(())
//! ```
//!
//! ## Modules
//!
//! - [`audit`]: Reconciliation engine, rules and results
//! - [`core`]: Records and classification types
//! - [`matching`]: Label normalization and similarity scoring
//! - [`parsing`]: Loading record exports from JSON
//! - [`cli`]: Command-line interface implementation

pub mod audit;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use audit::{AuditConfig, ComparisonResult, Inconsistency, ReconciliationEngine};
pub use core::record::{Provenance, Record, RecordError};
pub use core::types::*;
pub use matching::NameMatcher;
