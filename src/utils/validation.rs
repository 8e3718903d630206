//! Centralized validation and helper functions.

/// Maximum number of records accepted in a single audit.
///
/// Clustering scores every pair of distinct labels, so run time grows with
/// the square of this value.
pub const MAX_RECORDS: usize = 5_000;

/// Safely convert usize to f64 for ratio calculations
///
/// Counts here are record and character counts, far below the f64 mantissa
/// limit.
#[inline]
#[must_use]
pub fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Input validation error types
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Similarity threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error("Too many records: {count} exceeds maximum of {MAX_RECORDS}")]
    TooManyRecords { count: usize },
}

/// Check that a similarity threshold is a finite value in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use para_audit::utils::validation::validate_threshold;
///
/// assert!(validate_threshold(0.8).is_ok());
/// assert!(validate_threshold(1.5).is_err());
/// assert!(validate_threshold(f64::NAN).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::ThresholdOutOfRange` for values outside the range
/// or NaN.
pub fn validate_threshold(threshold: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ValidationError::ThresholdOutOfRange(threshold))
    }
}

/// Check a record count against [`MAX_RECORDS`].
///
/// # Errors
///
/// Returns `ValidationError::TooManyRecords` when the limit is exceeded.
pub fn check_record_limit(count: usize) -> Result<(), ValidationError> {
    if count > MAX_RECORDS {
        Err(ValidationError::TooManyRecords { count })
    } else {
        Ok(())
    }
}
