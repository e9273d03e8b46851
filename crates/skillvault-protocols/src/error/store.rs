//! Skill store errors.

use thiserror::Error;

/// Failure kinds of the skill store and its accessor.
///
/// Read operations report a miss as `Ok(None)` or an empty list; only the
/// write path raises [`StoreError::NotFound`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Short machine-readable kind, used in import reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not_found",
            StoreError::Validation(_) => "validation",
            StoreError::Conflict(_) => "conflict",
            StoreError::Unavailable(_) => "unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = StoreError::NotFound("persona 'ghost'".to_string());
        let display = err.to_string();
        assert!(display.contains("Not found"));
        assert!(display.contains("ghost"));
    }

    #[test]
    fn test_validation_error() {
        let err = StoreError::Validation("missing skill id".to_string());
        assert!(err.to_string().contains("Validation failed"));
        assert!(err.to_string().contains("missing skill id"));
    }

    #[test]
    fn test_conflict_error() {
        let err = StoreError::Conflict("skill 'code_review' already exists".to_string());
        assert!(err.to_string().contains("Conflict"));
        assert!(err.to_string().contains("code_review"));
    }

    #[test]
    fn test_unavailable_error() {
        let err = StoreError::Unavailable("database is locked".to_string());
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(StoreError::NotFound(String::new()).kind(), "not_found");
        assert_eq!(StoreError::Validation(String::new()).kind(), "validation");
        assert_eq!(StoreError::Conflict(String::new()).kind(), "conflict");
        assert_eq!(StoreError::Unavailable(String::new()).kind(), "unavailable");
    }
}
