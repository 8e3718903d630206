//! Cross-tool reconciliation.
//!
//! [`ReconciliationEngine::compare`] clusters records by name, copies the
//! task manager's category across each cluster, and runs the consistency
//! rules in [`rules`]. Findings are reported as [`Inconsistency`] values in a
//! [`ComparisonResult`].
//!
//! ## Rules
//!
//! | Kind | Severity | Fires when |
//! |------|----------|------------|
//! | `missing_record` | medium | a record has no match in any other source |
//! | `status_mismatch` | high | sources disagree on active/inactive |
//! | `kind_mismatch` | high | sources disagree on project/area |
//! | `category_mismatch` | medium | categories still differ after propagation |
//! | `wrong_account` | high | a cloud storage record sits in the other account |
//! | `name_variation` | low | display names differ |
//! | `missing_marker` | low | some names carry a leading marker, some do not |

pub mod engine;
pub mod inconsistency;
pub mod result;
pub mod rules;

pub use engine::{AuditConfig, ConfigError, ReconciliationEngine};
pub use inconsistency::{Inconsistency, InconsistencyDetail, NameVariant, SourceGroup};
pub use result::{ComparisonResult, SummaryStatistics};
