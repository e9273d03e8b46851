//! Shared command context: configuration and the opened store.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use skillvault_config::{Config, ConfigLoader, ConfigValidator, DatabaseConfig};
use skillvault_protocols::StoreError;
use skillvault_skills_progressive::ModelSettings;
use skillvault_store_sqlite::SqliteSkillStore;

pub(crate) struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteSkillStore>,
}

impl AppContext {
    /// Load and validate the config, then open the store it points at.
    pub async fn load(
        config_path: &Path,
        db_override: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = ConfigLoader::load_or_default(config_path)?;
        if let Some(db) = db_override {
            config.database.path = db;
        }

        let validation = ConfigValidator::validate(&config)?;
        for warning in &validation.warnings {
            warn!("{}: {}", warning.path, warning.message);
        }
        if let Some(err) = validation.into_error() {
            return Err(err.into());
        }

        let store = open_store(&config.database).await?;
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    /// The persona named on the command line, or the configured one.
    pub fn persona<'a>(&'a self, flag: &'a Option<String>) -> &'a str {
        flag.as_deref().unwrap_or(&self.config.agent.persona)
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            model: self.config.model.name.clone(),
            temperature: self.config.model.temperature,
            max_tokens: self.config.model.max_tokens,
        }
    }
}

async fn open_store(db: &DatabaseConfig) -> Result<SqliteSkillStore, StoreError> {
    if db.is_in_memory() {
        debug!("Using in-memory skill store");
        return SqliteSkillStore::in_memory().await;
    }

    let path = db.resolved_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoreError::Unavailable(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    SqliteSkillStore::open(&path).await
}
