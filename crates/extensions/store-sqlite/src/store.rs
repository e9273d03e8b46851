//! SQLite skill store implementation.

use async_trait::async_trait;
use rusqlite::{Connection as SqlConnection, OptionalExtension, params};
use std::path::Path;
use tokio_rusqlite::Connection;
use tracing::debug;

use skillvault_protocols::{NewPersona, Persona, Skill, SkillCatalog, SkillSummary, StoreError};

use crate::rows::{self, PERSONA_COLUMNS, SKILL_COLUMNS, SUMMARY_COLUMNS};
use crate::schema::init_schema;

#[path = "store_write.rs"]
mod store_write;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// SQLite-backed skill store.
///
/// Every method runs as one unit of work on the store's connection thread;
/// writes that touch several tables do so inside a single transaction.
pub struct SqliteSkillStore {
    conn: Connection,
}

impl SqliteSkillStore {
    /// Create a new in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().await.map_err(store_error)?;
        Self::init(conn).await
    }

    /// Open (or create) a file-backed database.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        debug!("Opening skill store at {}", path.display());
        let conn = Connection::open(path).await.map_err(store_error)?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.call(|conn| init_schema(conn)).await.map_err(store_error)?;
        Ok(Self { conn })
    }

    /// Create a persona. Names are unique across enabled and disabled personas.
    pub async fn add_persona(&self, persona: NewPersona) -> Result<Persona, StoreError> {
        if persona.name.trim().is_empty() {
            return Err(StoreError::Validation("persona name is empty".to_string()));
        }

        self.conn
            .call(move |conn| {
                let exists: bool = conn
                    .prepare("SELECT 1 FROM agents WHERE name = ?1")?
                    .exists([&persona.name])?;
                if exists {
                    return Err(reject(StoreError::Conflict(format!(
                        "persona '{}' already exists",
                        persona.name
                    ))));
                }

                conn.execute(
                    "INSERT INTO agents (name, description, system_prompt) VALUES (?1, ?2, ?3)",
                    params![persona.name, persona.description, persona.system_prompt],
                )?;
                let id = conn.last_insert_rowid();

                let created = conn.query_row(
                    &format!("SELECT {} FROM agents WHERE id = ?1", PERSONA_COLUMNS),
                    [id],
                    rows::persona,
                )?;
                Ok(created)
            })
            .await
            .map_err(store_error)
    }

    /// Enabled personas, by name.
    pub async fn list_personas(&self) -> Result<Vec<Persona>, StoreError> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM agents WHERE enabled = 1 ORDER BY name COLLATE NOCASE ASC, name ASC",
                    PERSONA_COLUMNS
                ))?;
                let personas = stmt
                    .query_map([], rows::persona)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(personas)
            })
            .await
            .map_err(store_error)
    }

    /// Enable or disable a persona. Returns `false` if no persona has that name.
    pub async fn set_persona_enabled(&self, name: &str, enabled: bool) -> Result<bool, StoreError> {
        let name = name.to_string();
        self.conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE agents SET enabled = ?1 WHERE name = ?2",
                    params![enabled, name],
                )?;
                Ok(changed > 0)
            })
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl SkillCatalog for SqliteSkillStore {
    async fn get_persona(&self, name: &str) -> Result<Option<Persona>, StoreError> {
        let name = name.to_string();
        self.conn
            .call(move |conn| {
                let persona = conn
                    .query_row(
                        &format!(
                            "SELECT {} FROM agents WHERE name = ?1 AND enabled = 1",
                            PERSONA_COLUMNS
                        ),
                        [&name],
                        rows::persona,
                    )
                    .optional()?;
                Ok(persona)
            })
            .await
            .map_err(store_error)
    }

    async fn list_skills(&self, persona_name: &str) -> Result<Vec<SkillSummary>, StoreError> {
        let persona_name = persona_name.to_string();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM skills s
                     JOIN agents a ON a.id = s.agent_id
                     WHERE a.name = ?1 AND a.enabled = 1 AND s.enabled = 1
                     ORDER BY s.priority DESC, s.name COLLATE NOCASE ASC, s.name ASC",
                    SUMMARY_COLUMNS
                ))?;
                let skills = stmt
                    .query_map([&persona_name], rows::summary)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(skills)
            })
            .await
            .map_err(store_error)
    }

    async fn get_skill(
        &self,
        persona_name: &str,
        identifier: &str,
    ) -> Result<Option<Skill>, StoreError> {
        let persona_name = persona_name.to_string();
        let identifier = identifier.to_string();
        self.conn
            .call(move |conn| {
                let Some(persona_id) = enabled_persona_id(conn, &persona_name)? else {
                    return Ok(None);
                };

                let by_id = conn
                    .query_row(
                        &format!(
                            "SELECT {} FROM skills s
                             WHERE s.agent_id = ?1 AND s.skill_id = ?2 AND s.enabled = 1",
                            SKILL_COLUMNS
                        ),
                        params![persona_id, identifier],
                        rows::skill,
                    )
                    .optional()?;
                if by_id.is_some() {
                    return Ok(by_id);
                }

                // Display names are not unique; prefer the highest priority.
                let by_name = conn
                    .query_row(
                        &format!(
                            "SELECT {} FROM skills s
                             WHERE s.agent_id = ?1 AND s.name = ?2 AND s.enabled = 1
                             ORDER BY s.priority DESC, s.id ASC LIMIT 1",
                            SKILL_COLUMNS
                        ),
                        params![persona_id, identifier],
                        rows::skill,
                    )
                    .optional()?;
                Ok(by_name)
            })
            .await
            .map_err(store_error)
    }
}

fn enabled_persona_id(conn: &SqlConnection, name: &str) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM agents WHERE name = ?1 AND enabled = 1",
        [name],
        |row| row.get(0),
    )
    .optional()
}

/// Carry a domain error out of a connection closure.
fn reject(err: StoreError) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Other(Box::new(err))
}

/// Map a connection-level error back onto the store's error kinds.
fn store_error(err: tokio_rusqlite::Error) -> StoreError {
    match err {
        tokio_rusqlite::Error::Other(boxed) => match boxed.downcast::<StoreError>() {
            Ok(store_err) => *store_err,
            Err(other) => StoreError::Unavailable(other.to_string()),
        },
        tokio_rusqlite::Error::Rusqlite(e) if is_unique_violation(&e) => {
            StoreError::Conflict(e.to_string())
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
