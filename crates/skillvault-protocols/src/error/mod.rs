//! Error types for the SkillVault protocol layer.

mod provider;
mod store;
mod tool;

pub use provider::*;
pub use store::*;
pub use tool::*;
