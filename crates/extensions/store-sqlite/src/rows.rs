//! Row-to-entity mapping.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

use skillvault_protocols::{
    Persona, Provenance, SkillApiCall, Skill, SkillRequirement, SkillSummary, SyncLogEntry,
    SyncOutcome,
};

pub(crate) const PERSONA_COLUMNS: &str =
    "id, name, description, system_prompt, enabled, created_at, updated_at";

pub(crate) const SUMMARY_COLUMNS: &str =
    "s.skill_id, s.name, s.short_description, s.description, s.version, s.category, s.tags, s.priority";

pub(crate) const SKILL_COLUMNS: &str = "s.id, s.agent_id, s.skill_id, s.name, s.short_description, \
     s.description, s.version, s.category, s.tags, s.author, s.content, s.examples, s.metadata, \
     s.status, s.priority, s.enabled, s.content_file_path, s.repo_url, s.commit_hash, \
     s.last_synced_at, s.created_at, s.updated_at";

pub(crate) const API_CALL_COLUMNS: &str = "c.id, c.api_name, c.method, c.url, c.description, \
     c.required_params, c.optional_params, c.auth_type, c.auth_config, c.request_headers, \
     c.request_body_template, c.response_format, c.timeout_seconds, c.retry_count, c.enabled";

pub(crate) const REQUIREMENT_COLUMNS: &str =
    "r.id, r.requirement_type, r.requirement_name, r.requirement_value, r.is_required, r.created_at";

pub(crate) const SYNC_COLUMNS: &str = "l.id, s.skill_id, l.sync_type, l.sync_status, l.sync_message, \
     l.commit_hash, l.files_updated, l.sync_duration_ms, l.synced_at";

pub(crate) fn persona(row: &Row<'_>) -> rusqlite::Result<Persona> {
    Ok(Persona {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        system_prompt: row.get(3)?,
        enabled: row.get(4)?,
        created_at: timestamp(row, 5)?,
        updated_at: timestamp(row, 6)?,
    })
}

pub(crate) fn summary(row: &Row<'_>) -> rusqlite::Result<SkillSummary> {
    Ok(SkillSummary {
        skill_id: row.get(0)?,
        name: row.get(1)?,
        short_description: row.get(2)?,
        description: row.get(3)?,
        version: row.get(4)?,
        category: row.get(5)?,
        tags: json(row, 6)?,
        priority: row.get(7)?,
    })
}

pub(crate) fn skill(row: &Row<'_>) -> rusqlite::Result<Skill> {
    Ok(Skill {
        id: row.get(0)?,
        persona_id: row.get(1)?,
        skill_id: row.get(2)?,
        name: row.get(3)?,
        short_description: row.get(4)?,
        description: row.get(5)?,
        version: row.get(6)?,
        category: row.get(7)?,
        tags: json(row, 8)?,
        author: row.get(9)?,
        content: row.get(10)?,
        examples: optional_json(row, 11)?,
        metadata: optional_json(row, 12)?,
        status: parsed(row, 13)?,
        priority: row.get(14)?,
        enabled: row.get(15)?,
        provenance: Provenance {
            content_file_path: row.get(16)?,
            repo_url: row.get(17)?,
            commit_hash: row.get(18)?,
        },
        last_synced_at: optional_timestamp(row, 19)?,
        created_at: timestamp(row, 20)?,
        updated_at: timestamp(row, 21)?,
    })
}

pub(crate) fn api_call(row: &Row<'_>) -> rusqlite::Result<SkillApiCall> {
    Ok(SkillApiCall {
        id: row.get(0)?,
        api_name: row.get(1)?,
        method: row.get(2)?,
        url: row.get(3)?,
        description: row.get(4)?,
        required_params: json(row, 5)?,
        optional_params: json(row, 6)?,
        auth_type: row.get(7)?,
        auth_config: optional_json(row, 8)?,
        request_headers: optional_json(row, 9)?,
        request_body_template: row.get(10)?,
        response_format: optional_json(row, 11)?,
        timeout_seconds: row.get(12)?,
        retry_count: row.get(13)?,
        enabled: row.get(14)?,
    })
}

pub(crate) fn requirement(row: &Row<'_>) -> rusqlite::Result<SkillRequirement> {
    Ok(SkillRequirement {
        id: row.get(0)?,
        requirement_type: parsed(row, 1)?,
        name: row.get(2)?,
        value: row.get(3)?,
        is_required: row.get(4)?,
        created_at: timestamp(row, 5)?,
    })
}

pub(crate) fn sync_entry(row: &Row<'_>) -> rusqlite::Result<SyncLogEntry> {
    let duration_ms: Option<i64> = row.get(7)?;
    Ok(SyncLogEntry {
        id: row.get(0)?,
        skill_id: row.get(1)?,
        outcome: SyncOutcome {
            sync_type: parsed(row, 2)?,
            status: parsed(row, 3)?,
            message: row.get(4)?,
            commit_hash: row.get(5)?,
            files_updated: json(row, 6)?,
            duration_ms: duration_ms.and_then(|ms| u64::try_from(ms).ok()),
        },
        synced_at: timestamp(row, 8)?,
    })
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn optional_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        DateTime::parse_from_rfc3339(&t)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| conversion_error(idx, e))
    })
    .transpose()
}

fn json<T: serde::de::DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text).map_err(|e| conversion_error(idx, e))
}

fn optional_json(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<serde_json::Value>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| serde_json::from_str(&t).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn parsed<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse().map_err(|e| conversion_error(idx, e))
}
