//! Tool execution result types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Metadata;

/// Result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Output content handed back to the model.
    pub content: String,

    /// Additional metadata about the execution.
    #[serde(default)]
    pub metadata: Metadata,
}

impl ToolResult {
    /// Create a successful result with text content.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let result = ToolResult::success("done");
        assert!(result.success);
        assert_eq!(result.content, "done");
        assert!(result.metadata.is_empty());
    }

    #[test]
    fn test_with_metadata() {
        let result = ToolResult::success("ok").with_metadata("hit", serde_json::json!(true));
        assert_eq!(result.metadata.get("hit"), Some(&serde_json::json!(true)));
    }
}
