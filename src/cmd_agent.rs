//! Agent-facing commands: the prompt the model sees and the load_skill tool.

use skillvault_protocols::{Tool, ToolContext};
use skillvault_skills_progressive::SkillAgent;

use crate::context::AppContext;

/// Print the system prompt with the skill catalog appended.
pub(crate) async fn handle_prompt(
    ctx: &AppContext,
    persona: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent = SkillAgent::build(ctx.store.clone(), persona, ctx.model_settings()).await?;
    println!("{}", agent.effective_system_prompt());
    Ok(())
}

/// Invoke load_skill exactly as the model would.
pub(crate) async fn handle_load(
    ctx: &AppContext,
    persona: &str,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent = SkillAgent::build(ctx.store.clone(), persona, ctx.model_settings()).await?;
    let tool = agent.middleware().load_skill();

    let result = tool
        .execute(serde_json::json!({ "skill_name": name }), ToolContext::new("cli"))
        .await?;
    println!("{}", result.content);
    Ok(())
}
