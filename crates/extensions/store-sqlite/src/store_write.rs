//! Skill import, sync log and side-table accessors.

use rusqlite::{Connection as SqlConnection, OptionalExtension, params};
use tracing::{debug, info};

use skillvault_protocols::manifest::NewRequirement;
use skillvault_protocols::{
    ApiCallManifest, Skill, SkillApiCall, SkillImport, SkillRequirement, StoreError,
    SyncLogEntry, SyncOutcome,
};

use super::{SqliteSkillStore, enabled_persona_id, reject, store_error};
use crate::rows::{self, API_CALL_COLUMNS, REQUIREMENT_COLUMNS, SKILL_COLUMNS, SYNC_COLUMNS};

impl SqliteSkillStore {
    /// Write a skill with its API-call descriptors and requirements as one
    /// atomic unit under the named persona.
    ///
    /// Fails with `NotFound` if the persona is missing or disabled, with
    /// `Conflict` if the skill ID is taken by any persona, and with
    /// `Validation` if the definition or any nested row is malformed. On
    /// failure nothing is written.
    pub async fn import_skill(
        &self,
        persona_name: &str,
        import: SkillImport,
    ) -> Result<Skill, StoreError> {
        import.validate()?;

        let persona_name = persona_name.to_string();
        let tags = to_json(&import.manifest.tags)?;
        let examples = import.examples.as_ref().map(to_json).transpose()?;
        let metadata = import.metadata.as_ref().map(to_json).transpose()?;
        let call_count = import.manifest.api_calls.len();

        let skill = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                let persona_id = enabled_persona_id(&tx, &persona_name)?.ok_or_else(|| {
                    reject(StoreError::NotFound(format!(
                        "persona '{}' does not exist or is disabled",
                        persona_name
                    )))
                })?;

                let manifest = &import.manifest;
                let skill_id = manifest.skill_id().map_err(reject)?;
                let name = manifest.display_name().map_err(reject)?;
                let status = manifest.skill_status().map_err(reject)?;

                let taken: bool = tx
                    .prepare("SELECT 1 FROM skills WHERE skill_id = ?1")?
                    .exists([skill_id])?;
                if taken {
                    return Err(reject(StoreError::Conflict(format!(
                        "skill '{}' already exists",
                        skill_id
                    ))));
                }

                let provenance = &import.provenance;
                tx.execute(
                    "INSERT INTO skills (
                        skill_id, name, short_description, description, version, category,
                        tags, author, content, content_file_path, examples, metadata, status,
                        priority, agent_id, repo_url, commit_hash, last_synced_at
                     ) VALUES (
                        ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                        CASE WHEN ?18 THEN strftime('%Y-%m-%dT%H:%M:%fZ', 'now') END
                     )",
                    params![
                        skill_id,
                        name,
                        manifest.short_description,
                        manifest.description.as_deref().unwrap_or_default(),
                        manifest.version,
                        manifest.category,
                        tags,
                        manifest.author,
                        import.content,
                        provenance.content_file_path,
                        examples,
                        metadata,
                        status.as_str(),
                        manifest.priority,
                        persona_id,
                        provenance.repo_url,
                        provenance.commit_hash,
                        provenance.is_remote(),
                    ],
                )?;
                let row_id = tx.last_insert_rowid();

                for call in &manifest.api_calls {
                    insert_api_call(&tx, row_id, call)?;
                }
                for requirement in manifest.requirements.rows() {
                    insert_requirement(&tx, row_id, &requirement)?;
                }

                let skill = tx.query_row(
                    &format!("SELECT {} FROM skills s WHERE s.id = ?1", SKILL_COLUMNS),
                    [row_id],
                    rows::skill,
                )?;
                tx.commit()?;
                Ok(skill)
            })
            .await
            .map_err(store_error)?;

        info!(
            "Imported skill '{}' ({}) with {} api calls",
            skill.skill_id,
            skill.name,
            call_count
        );
        Ok(skill)
    }

    /// Append an entry to a skill's sync log.
    pub async fn record_sync(
        &self,
        skill_id: &str,
        outcome: SyncOutcome,
    ) -> Result<SyncLogEntry, StoreError> {
        let skill_id = skill_id.to_string();
        let files = to_json(&outcome.files_updated)?;
        let duration_ms = outcome
            .duration_ms
            .map(|ms| i64::try_from(ms).unwrap_or(i64::MAX));

        self.conn
            .call(move |conn| {
                let row_id: i64 = conn
                    .query_row(
                        "SELECT id FROM skills WHERE skill_id = ?1",
                        [&skill_id],
                        |row| row.get(0),
                    )
                    .optional()?
                    .ok_or_else(|| {
                        reject(StoreError::NotFound(format!("skill '{}'", skill_id)))
                    })?;

                conn.execute(
                    "INSERT INTO skill_sync_log (
                        skill_id, sync_type, commit_hash, sync_status, sync_message,
                        files_updated, sync_duration_ms
                     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        row_id,
                        outcome.sync_type.as_str(),
                        outcome.commit_hash,
                        outcome.status.as_str(),
                        outcome.message,
                        files,
                        duration_ms,
                    ],
                )?;
                let id = conn.last_insert_rowid();
                debug!("Recorded {} sync for skill '{}'", outcome.status.as_str(), skill_id);

                let entry = conn.query_row(
                    &format!(
                        "SELECT {} FROM skill_sync_log l JOIN skills s ON s.id = l.skill_id
                         WHERE l.id = ?1",
                        SYNC_COLUMNS
                    ),
                    [id],
                    rows::sync_entry,
                )?;
                Ok(entry)
            })
            .await
            .map_err(store_error)
    }

    /// Sync log of a skill, newest first.
    pub async fn sync_history(&self, skill_id: &str) -> Result<Vec<SyncLogEntry>, StoreError> {
        let skill_id = skill_id.to_string();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM skill_sync_log l JOIN skills s ON s.id = l.skill_id
                     WHERE s.skill_id = ?1
                     ORDER BY l.synced_at DESC, l.id DESC",
                    SYNC_COLUMNS
                ))?;
                let entries = stmt
                    .query_map([&skill_id], rows::sync_entry)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(entries)
            })
            .await
            .map_err(store_error)
    }

    /// Enabled API-call descriptors of a skill, in declaration order.
    pub async fn list_api_calls(&self, skill_id: &str) -> Result<Vec<SkillApiCall>, StoreError> {
        let skill_id = skill_id.to_string();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM skill_api_calls c JOIN skills s ON s.id = c.skill_id
                     WHERE s.skill_id = ?1 AND c.enabled = 1
                     ORDER BY c.id ASC",
                    API_CALL_COLUMNS
                ))?;
                let calls = stmt
                    .query_map([&skill_id], rows::api_call)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(calls)
            })
            .await
            .map_err(store_error)
    }

    /// Declared requirements of a skill, in declaration order.
    pub async fn list_requirements(
        &self,
        skill_id: &str,
    ) -> Result<Vec<SkillRequirement>, StoreError> {
        let skill_id = skill_id.to_string();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM skill_requirements r JOIN skills s ON s.id = r.skill_id
                     WHERE s.skill_id = ?1
                     ORDER BY r.id ASC",
                    REQUIREMENT_COLUMNS
                ))?;
                let requirements = stmt
                    .query_map([&skill_id], rows::requirement)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(requirements)
            })
            .await
            .map_err(store_error)
    }
}

fn insert_api_call(
    conn: &SqlConnection,
    skill_row: i64,
    call: &ApiCallManifest,
) -> Result<(), tokio_rusqlite::Error> {
    let (name, method, url) = call.validate().map_err(reject)?;
    let required = to_json(&call.required_params).map_err(reject)?;
    let optional = to_json(&call.optional_params).map_err(reject)?;
    let auth_config = call.auth_config.as_ref().map(to_json).transpose().map_err(reject)?;
    let headers = call.request_headers.as_ref().map(to_json).transpose().map_err(reject)?;
    let response_format = call.response_format.as_ref().map(to_json).transpose().map_err(reject)?;

    conn.execute(
        "INSERT INTO skill_api_calls (
            skill_id, api_name, method, url, description, required_params, optional_params,
            auth_type, auth_config, request_headers, request_body_template, response_format,
            timeout_seconds, retry_count
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            skill_row,
            name,
            method,
            url,
            call.description,
            required,
            optional,
            call.auth_type,
            auth_config,
            headers,
            call.request_body_template,
            response_format,
            call.timeout_seconds,
            call.retry_count,
        ],
    )?;
    Ok(())
}

fn insert_requirement(
    conn: &SqlConnection,
    skill_row: i64,
    requirement: &NewRequirement,
) -> Result<(), tokio_rusqlite::Error> {
    requirement.validate().map_err(reject)?;
    conn.execute(
        "INSERT INTO skill_requirements (skill_id, requirement_type, requirement_name, requirement_value)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            skill_row,
            requirement.requirement_type.as_str(),
            requirement.name,
            requirement.value,
        ],
    )?;
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Validation(e.to_string()))
}
