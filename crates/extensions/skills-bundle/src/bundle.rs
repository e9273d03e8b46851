//! Bundle reader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use walkdir::WalkDir;

use skillvault_protocols::{Provenance, SkillImport, SkillManifest};

use crate::error::BundleError;

/// Structured definition file, required in every bundle.
pub const SKILL_FILE: &str = "skill.json";

/// Free-form metadata file, optional.
pub const METADATA_FILE: &str = "metadata.json";

/// A skill bundle read from disk.
#[derive(Debug, Clone)]
pub struct SkillBundle {
    /// Name of the bundle directory.
    pub dir_name: String,
    pub path: PathBuf,
    pub manifest: SkillManifest,
    pub content: String,
    pub examples: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
    /// Files that were read, relative to the bundle directory.
    pub files: Vec<String>,
}

impl SkillBundle {
    /// Convert into a store import. `root_label` is the bundle root as it
    /// should appear in the recorded content path.
    pub fn into_import(self, root_label: &str) -> SkillImport {
        let content_path = format!(
            "{}/{}/{}",
            root_label.trim_end_matches('/'),
            self.dir_name,
            self.manifest.content_file
        );
        let mut import = SkillImport::new(self.manifest, self.content)
            .with_provenance(Provenance::from_file(content_path));
        import.examples = self.examples;
        import.metadata = self.metadata;
        import
    }
}

/// Read one bundle directory.
pub fn load_bundle(dir: &Path) -> Result<SkillBundle, BundleError> {
    let manifest_path = dir.join(SKILL_FILE);
    let manifest: SkillManifest = read_json(&manifest_path)?;
    let mut files = vec![SKILL_FILE.to_string()];

    let content_path = dir.join(&manifest.content_file);
    let content = read_text(&content_path)?;
    files.push(manifest.content_file.clone());

    let examples = match &manifest.examples_file {
        Some(name) if dir.join(name).is_file() => {
            files.push(name.clone());
            Some(read_json(&dir.join(name))?)
        }
        Some(name) => {
            debug!("Examples file {} not present in {}", name, dir.display());
            None
        }
        None => None,
    };

    let metadata_path = dir.join(METADATA_FILE);
    let metadata = if metadata_path.is_file() {
        files.push(METADATA_FILE.to_string());
        Some(read_json(&metadata_path)?)
    } else {
        None
    };

    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SkillBundle {
        dir_name,
        path: dir.to_path_buf(),
        manifest,
        content,
        examples,
        metadata,
        files,
    })
}

/// Read every bundle directly under `root`, sorted by directory name.
///
/// Directories without `skill.json` are ignored, unreadable bundles are
/// skipped with a warning, and a missing root yields nothing.
pub fn load_all(root: &Path) -> Vec<SkillBundle> {
    let mut bundles = Vec::new();

    if !root.is_dir() {
        debug!("Bundle directory does not exist: {}", root.display());
        return bundles;
    }

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_dir() || !path.join(SKILL_FILE).is_file() {
            continue;
        }

        match load_bundle(path) {
            Ok(bundle) => bundles.push(bundle),
            Err(e) => warn!("Skipping bundle {}: {}", path.display(), e),
        }
    }

    debug!("Read {} bundles from {}", bundles.len(), root.display());
    bundles
}

fn read_text(path: &Path) -> Result<String, BundleError> {
    if !path.is_file() {
        return Err(BundleError::MissingFile(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| BundleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, BundleError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| BundleError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
