//! Provider decorator applying the skill middleware.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use skillvault_protocols::{CompletionRequest, CompletionResponse, LLMProvider, ProviderError};

use crate::middleware::SkillMiddleware;

/// Wraps a model provider so every completion carries the skill catalog.
///
/// Failures of the inner provider propagate unchanged; nothing is retried.
pub struct SkillAwareProvider {
    inner: Arc<dyn LLMProvider>,
    middleware: Arc<SkillMiddleware>,
}

impl SkillAwareProvider {
    pub fn new(inner: Arc<dyn LLMProvider>, middleware: Arc<SkillMiddleware>) -> Self {
        Self { inner, middleware }
    }
}

#[async_trait]
impl LLMProvider for SkillAwareProvider {
    fn id(&self) -> &str {
        self.inner.id()
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let request = self.middleware.transform(request);
        debug!(
            "Forwarding completion to '{}' with {} skills in catalog",
            self.inner.id(),
            self.middleware.catalog().len()
        );
        self.inner.complete(request).await
    }
}
