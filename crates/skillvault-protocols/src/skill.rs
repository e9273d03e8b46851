//! Skill entity definitions.
//!
//! Skills are flat records; related API-call descriptors and requirements
//! are fetched with explicit accessor calls, never loaded implicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Advisory lifecycle status of a skill. Not enforced by retrieval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStatus {
    #[default]
    Active,
    Deprecated,
    Archived,
}

impl SkillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillStatus::Active => "active",
            SkillStatus::Deprecated => "deprecated",
            SkillStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for SkillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SkillStatus::Active),
            "deprecated" => Ok(SkillStatus::Deprecated),
            "archived" => Ok(SkillStatus::Archived),
            other => Err(StoreError::Validation(format!(
                "unknown skill status '{}'",
                other
            ))),
        }
    }
}

/// Where a skill's content came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Path of the content file inside the source tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_file_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
}

impl Provenance {
    pub fn from_file(path: impl Into<String>) -> Self {
        Self {
            content_file_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Whether the skill was synced from a remote repository.
    pub fn is_remote(&self) -> bool {
        self.repo_url.is_some() || self.commit_hash.is_some()
    }
}

/// Catalog view of a skill: what the model sees before loading it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub skill_id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    pub description: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub priority: i32,
}

impl SkillSummary {
    /// One-line description for the catalog: the short description when it
    /// has text, the full description otherwise.
    pub fn catalog_description(&self) -> &str {
        match self.short_description.as_deref() {
            Some(short) if !short.trim().is_empty() => short,
            _ => &self.description,
        }
    }
}

/// A stored skill with its full content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Store-assigned row ID.
    pub id: i64,

    /// Row ID of the owning persona.
    pub persona_id: i64,

    /// Stable external identifier, unique store-wide.
    pub skill_id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    pub description: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Text injected into the conversation on load.
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,

    pub status: SkillStatus,
    pub priority: i32,
    pub enabled: bool,

    #[serde(default)]
    pub provenance: Provenance,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Descriptor of an external HTTP operation a skill may reference.
///
/// Purely descriptive; nothing in SkillVault executes these calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillApiCall {
    pub id: i64,
    pub api_name: String,
    pub method: String,
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required_params: serde_json::Value,

    #[serde(default)]
    pub optional_params: serde_json::Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_config: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<serde_json::Value>,

    pub timeout_seconds: u32,
    pub retry_count: u32,
    pub enabled: bool,
}

/// Kind of dependency a skill declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    /// Another skill, by skill ID.
    Dependency,
    /// An external API key, by name.
    ApiKey,
    /// Minimum agent version.
    MinVersion,
}

impl RequirementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementType::Dependency => "dependency",
            RequirementType::ApiKey => "api_key",
            RequirementType::MinVersion => "min_version",
        }
    }
}

impl FromStr for RequirementType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dependency" => Ok(RequirementType::Dependency),
            "api_key" => Ok(RequirementType::ApiKey),
            "min_version" => Ok(RequirementType::MinVersion),
            other => Err(StoreError::Validation(format!(
                "unknown requirement type '{}'",
                other
            ))),
        }
    }
}

/// A declared dependency. Descriptive only; never validated at retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub id: i64,
    pub requirement_type: RequirementType,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    pub is_required: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "skill_tests.rs"]
mod tests;
