//! Tool execution context.

/// Context for tool execution.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Conversation thread the call belongs to.
    pub session_id: String,

    /// Correlation ID for tracing.
    pub correlation_id: String,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            correlation_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_context_new() {
        let ctx = ToolContext::new("thread-1");
        assert_eq!(ctx.session_id, "thread-1");
        assert!(!ctx.correlation_id.is_empty());
    }

    #[test]
    fn test_correlation_ids_unique() {
        let a = ToolContext::new("thread-1");
        let b = ToolContext::new("thread-1");
        assert_ne!(a.correlation_id, b.correlation_id);
    }
}
