//! Skill bundles for SkillVault.
//!
//! A bundle is a directory holding `skill.json`, a content file and
//! optionally an examples file and `metadata.json`. This crate reads
//! bundles from disk and imports them into the skill store.

mod bundle;
mod error;
mod importer;

pub use bundle::{METADATA_FILE, SKILL_FILE, SkillBundle, load_all, load_bundle};
pub use error::BundleError;
pub use importer::{BundleImporter, ImportItem, ImportOutcome, ImportReport};
