//! Persona (agent configuration) definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named agent configuration that owns a set of skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Store-assigned row ID.
    pub id: i64,

    /// Unique, human-assigned name.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Custom system prompt; the built-in default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Disabled personas are invisible to every read path.
    pub enabled: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a persona.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPersona {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl NewPersona {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            system_prompt: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}
