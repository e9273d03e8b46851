//! Completion request types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::tool::ToolDefinition;
use crate::types::{Message, Metadata};

/// Request for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model to use.
    pub model: String,

    /// Messages in the conversation.
    pub messages: Vec<Message>,

    /// System prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Tools the model may call.
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature for sampling (0.0 - 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Additional metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl CompletionRequest {
    /// Create a new completion request.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            system: None,
            tools: Vec::new(),
            max_tokens: None,
            temperature: None,
            metadata: HashMap::new(),
        }
    }

    /// Set the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the tools.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Set max tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Whether a tool with the given id is already offered.
    pub fn has_tool(&self, id: &str) -> bool {
        self.tools.iter().any(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_request_new() {
        let request = CompletionRequest::new("gpt-4o", vec![Message::user("Hello")]);
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 1);
        assert!(request.system.is_none());
        assert!(request.tools.is_empty());
    }

    #[test]
    fn test_builders() {
        let request = CompletionRequest::new("gpt-4o", vec![])
            .with_system("You are helpful")
            .with_max_tokens(512)
            .with_temperature(0.2)
            .with_tools(vec![ToolDefinition::new("load_skill", "Load Skill", "")]);
        assert_eq!(request.system.as_deref(), Some("You are helpful"));
        assert_eq!(request.max_tokens, Some(512));
        assert_eq!(request.temperature, Some(0.2));
        assert!(request.has_tool("load_skill"));
        assert!(!request.has_tool("other"));
    }

    #[test]
    fn test_serialization_skips_empty_options() {
        let request = CompletionRequest::new("gpt-4o", vec![]);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert!(json.get("max_tokens").is_none());
    }
}
