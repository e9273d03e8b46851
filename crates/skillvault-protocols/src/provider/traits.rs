//! LLM provider trait definition.

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse};
use crate::error::ProviderError;

/// Core trait for chat model providers.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Run one model invocation.
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, ProviderError>;
}
