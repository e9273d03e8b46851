//! Skill import definitions.
//!
//! A [`SkillManifest`] is the structured part of a skill bundle
//! (`skill.json`). Identity fields are optional at the serde level so a
//! bundle missing them still parses and is rejected by the store with a
//! validation error instead of a parse error.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::skill::{Provenance, RequirementType, SkillStatus};

const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];
const SHORT_DESCRIPTION_LIMIT: usize = 100;

/// Structured skill definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillManifest {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub short_description: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub priority: i32,

    /// Content file name inside the bundle directory.
    #[serde(default = "default_content_file")]
    pub content_file: String,

    /// Examples file name inside the bundle directory, if any.
    #[serde(default)]
    pub examples_file: Option<String>,

    #[serde(default)]
    pub api_calls: Vec<ApiCallManifest>,

    #[serde(default)]
    pub requirements: RequirementsManifest,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_content_file() -> String {
    "content.md".to_string()
}

impl SkillManifest {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            version: default_version(),
            content_file: default_content_file(),
            ..Self::default()
        }
    }

    /// Minimal manifest derived from a display name and description.
    ///
    /// The ID is the lowercased name with spaces replaced by underscores and
    /// the short description is the first 100 characters of the description.
    pub fn quick(name: &str, description: &str) -> Self {
        let id = name.to_lowercase().replace(' ', "_");
        let short: String = description.chars().take(SHORT_DESCRIPTION_LIMIT).collect();
        Self::new(id, name)
            .with_description(description)
            .with_short_description(short)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_short_description(mut self, short: impl Into<String>) -> Self {
        self.short_description = Some(short.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Non-empty skill ID, or a validation error.
    pub fn skill_id(&self) -> Result<&str, StoreError> {
        non_empty(self.id.as_deref())
            .ok_or_else(|| StoreError::Validation("skill definition has no id".to_string()))
    }

    /// Non-empty display name, or a validation error.
    pub fn display_name(&self) -> Result<&str, StoreError> {
        non_empty(self.name.as_deref()).ok_or_else(|| {
            StoreError::Validation(format!(
                "skill '{}' has no name",
                self.id.as_deref().unwrap_or("?")
            ))
        })
    }

    pub fn skill_status(&self) -> Result<SkillStatus, StoreError> {
        match self.status.as_deref() {
            None => Ok(SkillStatus::Active),
            Some(s) => s.parse(),
        }
    }
}

/// Declared external HTTP operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiCallManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "empty_list")]
    pub required_params: serde_json::Value,

    #[serde(default = "empty_list")]
    pub optional_params: serde_json::Value,

    #[serde(default)]
    pub auth_type: Option<String>,

    #[serde(default)]
    pub auth_config: Option<serde_json::Value>,

    #[serde(default)]
    pub request_headers: Option<serde_json::Value>,

    #[serde(default)]
    pub request_body_template: Option<String>,

    #[serde(default)]
    pub response_format: Option<serde_json::Value>,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,

    #[serde(default)]
    pub retry_count: u32,
}

fn default_method() -> String {
    "GET".to_string()
}

fn empty_list() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

fn default_timeout() -> u32 {
    30
}

impl ApiCallManifest {
    pub fn new(name: impl Into<String>, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            method: method.into(),
            url: Some(url.into()),
            required_params: empty_list(),
            optional_params: empty_list(),
            timeout_seconds: default_timeout(),
            ..Self::default()
        }
    }

    /// Check the fields the store requires and return the normalized
    /// (name, upper-case method, url).
    pub fn validate(&self) -> Result<(&str, String, &str), StoreError> {
        let name = non_empty(self.name.as_deref())
            .ok_or_else(|| StoreError::Validation("api call has no name".to_string()))?;
        let url = non_empty(self.url.as_deref()).ok_or_else(|| {
            StoreError::Validation(format!("api call '{}' has no url", name))
        })?;
        let method = self.method.to_uppercase();
        if !HTTP_METHODS.contains(&method.as_str()) {
            return Err(StoreError::Validation(format!(
                "api call '{}' has unsupported method '{}'",
                name, self.method
            )));
        }
        Ok((name, method, url))
    }
}

/// Declared dependencies of a skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementsManifest {
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub api_keys: Vec<String>,

    #[serde(default)]
    pub min_agent_version: Option<String>,
}

/// One requirement row to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequirement {
    pub requirement_type: RequirementType,
    pub name: String,
    pub value: Option<String>,
}

impl NewRequirement {
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation(format!(
                "{} requirement has an empty name",
                self.requirement_type.as_str()
            )));
        }
        Ok(())
    }
}

impl RequirementsManifest {
    /// Expand into rows: one per dependency, one per API key, and one
    /// `min_version` row named `agent_version` when a minimum is set.
    pub fn rows(&self) -> Vec<NewRequirement> {
        let dependencies = self.dependencies.iter().map(|dep| NewRequirement {
            requirement_type: RequirementType::Dependency,
            name: dep.clone(),
            value: None,
        });
        let api_keys = self.api_keys.iter().map(|key| NewRequirement {
            requirement_type: RequirementType::ApiKey,
            name: key.clone(),
            value: None,
        });
        let min_version = self
            .min_agent_version
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| NewRequirement {
                requirement_type: RequirementType::MinVersion,
                name: "agent_version".to_string(),
                value: Some(v.clone()),
            });

        dependencies.chain(api_keys).chain(min_version).collect()
    }
}

/// Everything needed to write one skill.
#[derive(Debug, Clone)]
pub struct SkillImport {
    pub manifest: SkillManifest,
    pub content: String,
    pub examples: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
    pub provenance: Provenance,
}

impl SkillImport {
    pub fn new(manifest: SkillManifest, content: impl Into<String>) -> Self {
        Self {
            manifest,
            content: content.into(),
            examples: None,
            metadata: None,
            provenance: Provenance::default(),
        }
    }

    pub fn with_examples(mut self, examples: serde_json::Value) -> Self {
        self.examples = Some(examples);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Top-level checks that need no store access.
    pub fn validate(&self) -> Result<(), StoreError> {
        let id = self.manifest.skill_id()?;
        self.manifest.display_name()?;
        self.manifest.skill_status()?;
        if self.content.trim().is_empty() {
            return Err(StoreError::Validation(format!(
                "skill '{}' has no content",
                id
            )));
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
