//! SQLite skill store for SkillVault.
//!
//! Persists personas, skills, API-call descriptors, requirements and the
//! sync log, and implements the catalog accessor on top of them.

mod rows;
mod schema;
mod store;

pub use schema::SCHEMA_VERSION;
pub use store::SqliteSkillStore;
