//! # SkillVault Protocols
//!
//! Entity and trait definitions shared by the SkillVault crates.
//! Contains only interface definitions and plain data types - the store,
//! middleware and importer live in their own crates.
//!
//! ## Core Traits
//!
//! - [`SkillCatalog`] - Read access to personas and their skills
//! - [`Tool`] - Trait for capabilities surfaced to the model
//! - [`LLMProvider`] - Trait for the underlying chat model

pub mod catalog;
pub mod error;
pub mod manifest;
pub mod persona;
pub mod provider;
pub mod skill;
pub mod sync;
pub mod tool;
pub mod types;

pub use catalog::SkillCatalog;
pub use error::{ProviderError, StoreError, ToolError};
pub use manifest::{ApiCallManifest, RequirementsManifest, SkillImport, SkillManifest};
pub use persona::{NewPersona, Persona};
pub use provider::{CompletionRequest, CompletionResponse, LLMProvider};
pub use skill::{
    Provenance, RequirementType, Skill, SkillApiCall, SkillRequirement, SkillStatus, SkillSummary,
};
pub use sync::{SyncLogEntry, SyncOutcome, SyncStatus, SyncType};
pub use tool::{Tool, ToolContext, ToolDefinition, ToolResult};
pub use types::*;
