//! Per-turn skill catalog injection.

use std::sync::Arc;

use tracing::info;

use skillvault_protocols::{CompletionRequest, SkillCatalog, StoreError, Tool};

use crate::catalog::CatalogBlock;
use crate::load_skill::LoadSkillTool;

/// Skill middleware for one persona.
///
/// The catalog is captured once at construction. Skills added to the store
/// afterwards stay invisible until the middleware is rebuilt.
pub struct SkillMiddleware {
    persona_name: String,
    block: CatalogBlock,
    load_skill: Arc<LoadSkillTool>,
}

impl SkillMiddleware {
    /// Snapshot the persona's catalog and prepare the `load_skill` tool.
    ///
    /// An unknown or disabled persona yields an empty catalog.
    pub async fn new(
        catalog: Arc<dyn SkillCatalog>,
        persona_name: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let persona_name = persona_name.into();
        let skills = catalog.list_skills(&persona_name).await?;
        let block = CatalogBlock::render(&skills);
        info!(
            "Skill catalog for persona '{}': {} skills",
            persona_name,
            block.len()
        );

        let load_skill = Arc::new(LoadSkillTool::new(
            catalog,
            persona_name.clone(),
            block.names().to_vec(),
        ));

        Ok(Self {
            persona_name,
            block,
            load_skill,
        })
    }

    pub fn persona_name(&self) -> &str {
        &self.persona_name
    }

    pub fn catalog(&self) -> &CatalogBlock {
        &self.block
    }

    /// The tools this middleware contributes: exactly `load_skill`.
    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        vec![self.load_skill.clone() as Arc<dyn Tool>]
    }

    pub fn load_skill(&self) -> &Arc<LoadSkillTool> {
        &self.load_skill
    }

    /// Append the catalog block to the request's system prompt and offer the
    /// `load_skill` tool. Everything else passes through unchanged.
    pub fn transform(&self, mut request: CompletionRequest) -> CompletionRequest {
        let base = request.system.take().unwrap_or_default();
        request.system = Some(self.block.apply(&base));

        let definition = self.load_skill.definition();
        if !request.has_tool(&definition.id) {
            request.tools.push(definition.clone());
        }
        request
    }
}

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;
