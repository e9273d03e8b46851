//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Database path that selects an in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub import: ImportConfig,
}

/// Skill store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_DB
    }

    /// Database file path with `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).as_ref())
    }
}

fn default_db_path() -> String {
    dirs::home_dir()
        .map(|home| home.join(".skillvault").join("skills.db"))
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| "skills.db".to_string())
}

/// Persona selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_persona")]
    pub persona: String,

    /// System prompt for the seeded default persona.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
            system_prompt: None,
        }
    }
}

fn default_persona() -> String {
    "default_agent".to_string()
}

/// Model settings passed through to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model")]
    pub name: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

/// Skill bundle import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_bundle_dir")]
    pub bundle_dir: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            bundle_dir: default_bundle_dir(),
        }
    }
}

impl ImportConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.bundle_dir).as_ref())
    }
}

fn default_bundle_dir() -> String {
    "skill-example".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.agent.persona, "default_agent");
        assert_eq!(config.model.name, "gpt-4o");
        assert!((config.model.temperature - 0.7).abs() < f32::EPSILON);
        assert!(config.model.max_tokens.is_none());
        assert_eq!(config.import.bundle_dir, "skill-example");
        assert!(config.database.path.ends_with("skills.db"));
        assert!(!config.database.is_in_memory());
    }

    #[test]
    fn test_in_memory_path() {
        let db = DatabaseConfig {
            path: IN_MEMORY_DB.to_string(),
        };
        assert!(db.is_in_memory());
    }

    #[test]
    fn test_resolved_path_expands_tilde() {
        let db = DatabaseConfig {
            path: "~/vault/skills.db".to_string(),
        };
        let resolved = db.resolved_path();
        assert!(!resolved.starts_with("~"));
        assert!(resolved.ends_with("vault/skills.db"));
    }
}
