//! Loaders for record exports.
//!
//! Two layouts are accepted:
//!
//! ```json
//! [ { "display_name": "Budget", "kind": "project", "is_active": true,
//!     "category": "work", "source": "task_manager" } ]
//! ```
//!
//! or an envelope carrying export metadata:
//!
//! ```json
//! { "version": "1", "exported_at": "2024-03-01T12:00:00Z", "records": [ ... ] }
//! ```
//!
//! ## Record fields
//!
//! | Field | Values | Required |
//! |-------|--------|----------|
//! | `display_name` | any non-blank text | Yes |
//! | `kind` | `project`, `area` | Yes |
//! | `is_active` | bool, default `false` | No |
//! | `category` | `work`, `personal` | Yes |
//! | `source` | `task_manager`, `cloud_storage_work`, `cloud_storage_personal`, `notes` | Yes |
//! | `provenance` | object tagged by `type` | No |
//! | `attributes` | free-form object | No |

pub mod records;

pub use records::{load_records_file, parse_records_json, LoadError, RecordSet};
