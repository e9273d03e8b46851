//! Catalog block rendering.

use skillvault_protocols::SkillSummary;

/// Instruction appended after the skill list.
pub const LOAD_SKILL_INSTRUCTION: &str = "When you need to handle a specific kind of request, \
use the load_skill tool to load the detailed skill information. It gives you comprehensive \
guidance, strategies and best practices for that skill's domain.";

const CATALOG_HEADER: &str = "## Available Skills";

/// Rendered summary of one persona's skills.
///
/// Built once from a `list_skills` result and reused for every model call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogBlock {
    names: Vec<String>,
    lines: Vec<String>,
}

impl CatalogBlock {
    pub fn render(skills: &[SkillSummary]) -> Self {
        let names = skills.iter().map(|s| s.name.clone()).collect();
        let lines = skills
            .iter()
            .map(|s| format!("- **{}**: {}", s.name, s.catalog_description()))
            .collect();
        Self { names, lines }
    }

    /// Display names in catalog order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The skill list, one line per skill.
    pub fn listing(&self) -> String {
        self.lines.join("\n")
    }

    /// Text appended to the system prompt: header, listing and instruction.
    ///
    /// A persona without skills still gets the header and instruction, with
    /// an empty listing between them.
    pub fn addendum(&self) -> String {
        format!(
            "\n\n{}\n\n{}\n\n{}",
            CATALOG_HEADER,
            self.listing(),
            LOAD_SKILL_INSTRUCTION
        )
    }

    /// Append the addendum after the given system prompt.
    pub fn apply(&self, system_prompt: &str) -> String {
        let mut prompt = String::with_capacity(system_prompt.len() + 256);
        prompt.push_str(system_prompt);
        prompt.push_str(&self.addendum());
        prompt
    }
}
