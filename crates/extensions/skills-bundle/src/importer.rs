//! Bulk import driver.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use skillvault_protocols::{SkillCatalog, StoreError, SyncOutcome, SyncStatus, SyncType};
use skillvault_store_sqlite::SqliteSkillStore;

use crate::bundle::{SkillBundle, load_all, load_bundle};

/// Result of importing one bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImportOutcome {
    Imported,
    /// A skill with the same ID is already visible to the persona.
    Skipped,
    Failed { kind: String, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportItem {
    pub dir_name: String,
    pub skill_id: Option<String>,
    #[serde(flatten)]
    pub outcome: ImportOutcome,
}

/// Per-batch summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub items: Vec<ImportItem>,
}

impl ImportReport {
    fn record(&mut self, item: ImportItem) {
        match item.outcome {
            ImportOutcome::Imported => self.imported += 1,
            ImportOutcome::Skipped => self.skipped += 1,
            ImportOutcome::Failed { .. } => self.failed += 1,
        }
        self.items.push(item);
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// Imports bundles into the store under one persona.
///
/// Failures are reported per bundle and never abort the batch.
pub struct BundleImporter {
    store: Arc<SqliteSkillStore>,
}

impl BundleImporter {
    pub fn new(store: Arc<SqliteSkillStore>) -> Self {
        Self { store }
    }

    /// Import every bundle under `root`.
    pub async fn import_all(&self, persona_name: &str, root: &Path) -> ImportReport {
        let root_label = root.to_string_lossy();
        let mut report = ImportReport::default();

        for bundle in load_all(root) {
            let item = self.import_bundle(persona_name, bundle, &root_label).await;
            report.record(item);
        }

        info!(
            "Import into '{}' finished: {} imported, {} skipped, {} failed",
            persona_name, report.imported, report.skipped, report.failed
        );
        report
    }

    /// Read and import a single bundle directory.
    pub async fn import_dir(&self, persona_name: &str, dir: &Path) -> ImportItem {
        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match load_bundle(dir) {
            Ok(bundle) => {
                let root_label = dir
                    .parent()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.import_bundle(persona_name, bundle, &root_label).await
            }
            Err(e) => ImportItem {
                dir_name,
                skill_id: None,
                outcome: ImportOutcome::Failed {
                    kind: "bundle".to_string(),
                    message: e.to_string(),
                },
            },
        }
    }

    async fn import_bundle(
        &self,
        persona_name: &str,
        bundle: SkillBundle,
        root_label: &str,
    ) -> ImportItem {
        let dir_name = bundle.dir_name.clone();
        let skill_id = bundle.manifest.id.clone();
        let outcome = match self.import_one(persona_name, bundle, root_label).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Failed to import bundle '{}': {}", dir_name, e);
                ImportOutcome::Failed {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                }
            }
        };

        ImportItem {
            dir_name,
            skill_id,
            outcome,
        }
    }

    async fn import_one(
        &self,
        persona_name: &str,
        bundle: SkillBundle,
        root_label: &str,
    ) -> Result<ImportOutcome, StoreError> {
        let started = Instant::now();

        if let Some(id) = bundle.manifest.id.as_deref() {
            if self.store.get_skill(persona_name, id).await?.is_some() {
                info!("Skill '{}' already exists, skipping", id);
                return Ok(ImportOutcome::Skipped);
            }
        }

        let files = bundle.files.clone();
        let skill = self
            .store
            .import_skill(persona_name, bundle.into_import(root_label))
            .await?;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let outcome = SyncOutcome::new(SyncType::Full, SyncStatus::Success)
            .with_message(format!("Imported from {}", root_label))
            .with_files(files)
            .with_duration_ms(elapsed_ms);
        if let Err(e) = self.store.record_sync(&skill.skill_id, outcome).await {
            warn!("Failed to record sync for '{}': {}", skill.skill_id, e);
        }

        Ok(ImportOutcome::Imported)
    }
}

#[cfg(test)]
#[path = "importer_tests.rs"]
mod tests;
