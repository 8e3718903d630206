use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::core::record::Record;
use crate::utils::validation::{check_record_limit, MAX_RECORDS};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record file must be a JSON array or an object with a 'records' array")]
    UnexpectedShape,

    #[error("Too many records: {count} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords { count: usize },
}

/// Records loaded from an export, with envelope metadata when present
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub version: Option<String>,
    pub exported_at: Option<DateTime<Utc>>,
    pub records: Vec<Record>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    exported_at: Option<DateTime<Utc>>,
    records: Vec<serde_json::Value>,
}

/// Load records from a JSON file
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or any error from
/// [`parse_records_json`].
pub fn load_records_file(path: &Path) -> Result<RecordSet, LoadError> {
    let content = std::fs::read_to_string(path)?;
    parse_records_json(&content)
}

/// Parse records from JSON text.
///
/// Accepts a bare array of records or an envelope
/// `{"version": ..., "exported_at": ..., "records": [...]}`. The record count
/// is checked before any record is validated.
///
/// # Errors
///
/// Returns `LoadError::Json` for malformed JSON or invalid records,
/// `LoadError::UnexpectedShape` for other top-level values, or
/// `LoadError::TooManyRecords` if the limit is exceeded.
pub fn parse_records_json(text: &str) -> Result<RecordSet, LoadError> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    let (version, exported_at, raw) = match value {
        serde_json::Value::Array(items) => (None, None, items),
        object @ serde_json::Value::Object(_) => {
            let envelope: Envelope = serde_json::from_value(object)?;
            (envelope.version, envelope.exported_at, envelope.records)
        }
        _ => return Err(LoadError::UnexpectedShape),
    };

    let count = raw.len();
    check_record_limit(count).map_err(|_| LoadError::TooManyRecords { count })?;

    let records = raw
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Record>, _>>()?;

    debug!("Loaded {} records", records.len());
    Ok(RecordSet {
        version,
        exported_at,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Category, Source};
    use std::io::Write;

    const RECORD: &str = r#"{
        "display_name": "Website Redesign",
        "kind": "project",
        "is_active": true,
        "category": "work",
        "source": "task_manager",
        "provenance": {"type": "task_manager", "project_id": "123"}
    }"#;

    #[test]
    fn test_parse_bare_array() {
        let set = parse_records_json(&format!("[{RECORD}]")).unwrap();
        assert_eq!(set.records.len(), 1);
        assert!(set.version.is_none());
        assert_eq!(set.records[0].source(), Source::TaskManager);
        assert_eq!(set.records[0].category(), Category::Work);
    }

    #[test]
    fn test_parse_envelope() {
        let text = format!(
            r#"{{"version": "1", "exported_at": "2024-03-01T12:00:00Z", "records": [{RECORD}]}}"#
        );
        let set = parse_records_json(&text).unwrap();
        assert_eq!(set.version.as_deref(), Some("1"));
        assert_eq!(
            set.exported_at.map(|t| t.to_rfc3339()).as_deref(),
            Some("2024-03-01T12:00:00+00:00")
        );
        assert_eq!(set.records.len(), 1);
    }

    #[test]
    fn test_is_active_defaults_to_false() {
        let text = r#"[{"display_name": "X", "kind": "area", "category": "personal", "source": "notes"}]"#;
        let set = parse_records_json(text).unwrap();
        assert!(!set.records[0].is_active());
    }

    #[test]
    fn test_rejects_invalid_records() {
        let empty_name = r#"[{"display_name": "  ", "kind": "area", "category": "work", "source": "notes"}]"#;
        assert!(matches!(parse_records_json(empty_name), Err(LoadError::Json(_))));

        let wrong_provenance = r#"[{"display_name": "X", "kind": "area", "category": "work",
            "source": "notes", "provenance": {"type": "task_manager"}}]"#;
        assert!(matches!(
            parse_records_json(wrong_provenance),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_unexpected_shape() {
        assert!(matches!(
            parse_records_json("42"),
            Err(LoadError::UnexpectedShape)
        ));
        assert!(matches!(parse_records_json("{}"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_too_many_records() {
        assert_eq!(MAX_RECORDS, 5_000);

        let items = vec!["0"; 5_001].join(",");
        let result = parse_records_json(&format!("[{items}]"));
        assert!(matches!(
            result,
            Err(LoadError::TooManyRecords { count: 5_001 })
        ));

        // At the limit the count passes and each record is validated
        let items = vec!["0"; MAX_RECORDS].join(",");
        assert!(matches!(
            parse_records_json(&format!("[{items}]")),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_record_fields() {
        let text = r#"[{"display_name": "Budget", "kind": "project", "is_actve": true,
            "category": "work", "source": "notes"}]"#;
        let err = parse_records_json(text).unwrap_err();
        assert!(err.to_string().contains("is_actve"), "{err}");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{RECORD}]").unwrap();
        let set = load_records_file(file.path()).unwrap();
        assert_eq!(set.records[0].display_name(), "Website Redesign");

        assert!(matches!(
            load_records_file(Path::new("/nonexistent/records.json")),
            Err(LoadError::Io(_))
        ));
    }
}
