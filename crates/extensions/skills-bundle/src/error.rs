//! Bundle reading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Missing bundle file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_display() {
        let err = BundleError::MissingFile(PathBuf::from("skills/code_review/skill.json"));
        assert!(err.to_string().contains("Missing"));
        assert!(err.to_string().contains("code_review/skill.json"));
    }

    #[test]
    fn test_json_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = BundleError::Json {
            path: PathBuf::from("skill.json"),
            source,
        };
        assert!(err.to_string().starts_with("Invalid JSON in skill.json"));
    }
}
