//! Skill catalog protocol definitions.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::persona::Persona;
use crate::skill::{Skill, SkillSummary};

/// Read access to personas and their skills.
///
/// Misses are reported as `None` or an empty list, never as errors; an
/// `Err` always means the store itself could not answer.
#[async_trait]
pub trait SkillCatalog: Send + Sync {
    /// The enabled persona with this name.
    async fn get_persona(&self, name: &str) -> Result<Option<Persona>, StoreError>;

    /// Enabled skills of an enabled persona, by priority descending then name.
    async fn list_skills(&self, persona_name: &str) -> Result<Vec<SkillSummary>, StoreError>;

    /// Look a skill up by `skill_id`, falling back to its display name.
    async fn get_skill(
        &self,
        persona_name: &str,
        identifier: &str,
    ) -> Result<Option<Skill>, StoreError>;
}
