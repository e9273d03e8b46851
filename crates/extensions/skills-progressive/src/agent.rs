//! Persona agent assembly.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use skillvault_protocols::{
    CompletionRequest, LLMProvider, Message, Persona, SkillCatalog, StoreError, Tool,
};

use crate::middleware::SkillMiddleware;
use crate::provider::SkillAwareProvider;

/// System prompt for personas without a custom one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an intelligent assistant with a range of \
professional skills. Load the relevant skill according to the user's needs to provide expert \
help. When you recognise a task that needs specialised knowledge, first use the load_skill tool \
to load the matching skill, then complete the task following that skill's guidance.";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Persona '{0}' does not exist or is disabled; run `skillvault init` first")]
    PersonaNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Model parameters forwarded on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// A persona wired for progressive skill disclosure.
pub struct SkillAgent {
    persona: Persona,
    system_prompt: String,
    settings: ModelSettings,
    middleware: Arc<SkillMiddleware>,
}

impl SkillAgent {
    pub async fn build(
        catalog: Arc<dyn SkillCatalog>,
        persona_name: &str,
        settings: ModelSettings,
    ) -> Result<Self, AgentError> {
        let persona = catalog
            .get_persona(persona_name)
            .await?
            .ok_or_else(|| AgentError::PersonaNotFound(persona_name.to_string()))?;

        let system_prompt = persona
            .system_prompt
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let middleware = Arc::new(SkillMiddleware::new(catalog, persona_name).await?);
        info!(
            "Built agent for persona '{}' using model {}",
            persona.name, settings.model
        );

        Ok(Self {
            persona,
            system_prompt,
            settings,
            middleware,
        })
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// The persona's own system prompt, before the catalog is appended.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    pub fn middleware(&self) -> &Arc<SkillMiddleware> {
        &self.middleware
    }

    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        self.middleware.tools()
    }

    /// Request for one turn, before middleware transformation.
    pub fn request(&self, messages: Vec<Message>) -> CompletionRequest {
        let mut request = CompletionRequest::new(self.settings.model.clone(), messages)
            .with_system(self.system_prompt.clone())
            .with_temperature(self.settings.temperature);
        if let Some(max_tokens) = self.settings.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request
    }

    /// System prompt exactly as the model sees it on a turn.
    pub fn effective_system_prompt(&self) -> String {
        self.middleware.catalog().apply(&self.system_prompt)
    }

    pub fn provider(&self, inner: Arc<dyn LLMProvider>) -> SkillAwareProvider {
        SkillAwareProvider::new(inner, self.middleware.clone())
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
