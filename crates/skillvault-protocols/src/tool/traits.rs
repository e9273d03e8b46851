//! Tool trait definition.

use async_trait::async_trait;

use super::{ToolContext, ToolDefinition, ToolResult};
use crate::error::ToolError;

/// Core trait for tools.
///
/// A tool is invoked by the model with JSON arguments matching its
/// parameters schema and answers with text.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool definition.
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with the given parameters.
    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError>;

    /// Validate the parameters before execution.
    fn validate(&self, params: &serde_json::Value) -> Result<(), ToolError> {
        let definition = self.definition();
        if let Some(schema) = &definition.parameters_schema {
            if schema.get("type") == Some(&serde_json::json!("object")) && !params.is_object() {
                return Err(ToolError::InvalidParameters(
                    "Parameters must be an object".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool {
        definition: ToolDefinition,
    }

    impl EchoTool {
        fn new(schema: Option<serde_json::Value>) -> Self {
            let mut definition = ToolDefinition::new("echo", "Echo", "Echoes its input");
            if let Some(schema) = schema {
                definition = definition.with_parameters_schema(schema);
            }
            Self { definition }
        }
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(
            &self,
            params: serde_json::Value,
            _ctx: ToolContext,
        ) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::success(params.to_string()))
        }
    }

    #[test]
    fn test_validate_without_schema() {
        let tool = EchoTool::new(None);
        assert!(tool.validate(&serde_json::json!("anything")).is_ok());
    }

    #[test]
    fn test_validate_object_schema_rejects_scalars() {
        let tool = EchoTool::new(Some(serde_json::json!({"type": "object"})));
        assert!(tool.validate(&serde_json::json!({})).is_ok());
        assert!(tool.validate(&serde_json::json!("text")).is_err());
        assert!(tool.validate(&serde_json::json!([1, 2])).is_err());
        assert!(tool.validate(&serde_json::Value::Null).is_err());
    }

    #[tokio::test]
    async fn test_execute() {
        let tool = EchoTool::new(None);
        let result = tool
            .execute(serde_json::json!({"a": 1}), ToolContext::new("session-1"))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.content, r#"{"a":1}"#);
    }
}
