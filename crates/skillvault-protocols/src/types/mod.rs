//! Common types used across SkillVault.

mod common;
mod message;

pub use common::*;
pub use message::*;
