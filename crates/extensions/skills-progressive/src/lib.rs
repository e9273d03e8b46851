//! Progressive skill disclosure for SkillVault.
//!
//! - The catalog block (name and one-line description per skill) is
//!   appended to the system prompt on every model call.
//! - Full skill content is fetched on demand through the `load_skill` tool.

mod agent;
mod catalog;
mod load_skill;
mod middleware;
mod provider;

pub use agent::{AgentError, DEFAULT_SYSTEM_PROMPT, ModelSettings, SkillAgent};
pub use catalog::{CatalogBlock, LOAD_SKILL_INSTRUCTION};
pub use load_skill::{LOAD_SKILL_TOOL, LoadSkillTool};
pub use middleware::SkillMiddleware;
pub use provider::SkillAwareProvider;

#[cfg(test)]
mod testing;
