//! The `load_skill` tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use skillvault_protocols::{
    Skill, SkillCatalog, Tool, ToolContext, ToolDefinition, ToolError, ToolResult,
};

/// Tool ID exposed to the model.
pub const LOAD_SKILL_TOOL: &str = "load_skill";

#[derive(Debug, Deserialize)]
struct LoadSkillParams {
    /// Skill ID or display name.
    skill_name: String,
}

/// Loads a skill's full content into the conversation.
///
/// A miss is not an error: the model gets the catalog names back so it can
/// retry with a valid one. Each call performs a single store read.
pub struct LoadSkillTool {
    definition: ToolDefinition,
    catalog: Arc<dyn SkillCatalog>,
    persona_name: String,
    available: Vec<String>,
}

impl LoadSkillTool {
    /// Create the tool for a persona. `available` is the catalog listed in
    /// the miss message.
    pub fn new(
        catalog: Arc<dyn SkillCatalog>,
        persona_name: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "skill_name": {
                    "type": "string",
                    "description": "Name or ID of the skill to load, as listed under Available Skills"
                }
            },
            "required": ["skill_name"]
        });

        Self {
            definition: ToolDefinition::new(
                LOAD_SKILL_TOOL,
                "Load Skill",
                "Load the full content of a skill into your context. Use it when a request needs \
                 a skill's specialised guidance, workflows and best practices.",
            )
            .with_parameters_schema(schema),
            catalog,
            persona_name: persona_name.into(),
            available,
        }
    }

    pub fn persona_name(&self) -> &str {
        &self.persona_name
    }

    /// Run the lookup and render the text handed back to the model.
    pub async fn load(&self, skill_name: &str) -> Result<String, ToolError> {
        let skill = self.fetch(skill_name).await?;
        Ok(self.render(skill_name, skill.as_ref()))
    }

    async fn fetch(&self, skill_name: &str) -> Result<Option<Skill>, ToolError> {
        self.catalog
            .get_skill(&self.persona_name, skill_name)
            .await
            .map_err(|e| {
                warn!("load_skill '{}' failed: {}", skill_name, e);
                ToolError::ExecutionFailed(format!("Failed to load skill '{}': {}", skill_name, e))
            })
    }

    fn render(&self, skill_name: &str, skill: Option<&Skill>) -> String {
        match skill {
            Some(skill) => {
                debug!("Loaded skill '{}' for persona '{}'", skill.skill_id, self.persona_name);
                format!("Loaded skill: {}\n\n{}", skill_name, skill.content)
            }
            None => {
                debug!("Skill '{}' not found for persona '{}'", skill_name, self.persona_name);
                format!(
                    "Skill '{}' not found. Available skills: {}",
                    skill_name,
                    self.available.join(", ")
                )
            }
        }
    }
}

#[async_trait]
impl Tool for LoadSkillTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        self.validate(&params)?;
        let params: LoadSkillParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;
        debug!(
            session = %ctx.session_id,
            correlation = %ctx.correlation_id,
            "load_skill '{}'",
            params.skill_name
        );

        let skill = self.fetch(&params.skill_name).await?;
        let result = ToolResult::success(self.render(&params.skill_name, skill.as_ref()));
        Ok(match skill {
            Some(skill) => result
                .with_metadata("found", serde_json::json!(true))
                .with_metadata("skill_id", serde_json::json!(skill.skill_id)),
            None => result.with_metadata("found", serde_json::json!(false)),
        })
    }
}

#[cfg(test)]
#[path = "load_skill_tests.rs"]
mod tests;
