//! Database schema management.

use rusqlite::Connection;
use tokio_rusqlite::Error;

/// Version recorded in `PRAGMA user_version` after initialization.
pub const SCHEMA_VERSION: i32 = 1;

/// Enable foreign keys for this connection and create missing tables.
pub fn init_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

const SCHEMA: &str = r#"
-- Personas
CREATE TABLE IF NOT EXISTS agents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    system_prompt TEXT,
    enabled INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- Skills, owned by exactly one persona
CREATE TABLE IF NOT EXISTS skills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    skill_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    short_description TEXT,
    description TEXT NOT NULL,
    version TEXT NOT NULL,
    category TEXT,
    tags TEXT NOT NULL DEFAULT '[]',
    author TEXT,
    content TEXT NOT NULL,
    content_file_path TEXT,
    examples TEXT,
    metadata TEXT,
    status TEXT NOT NULL DEFAULT 'active'
        CHECK (status IN ('active', 'deprecated', 'archived')),
    priority INTEGER NOT NULL DEFAULT 0,
    agent_id INTEGER NOT NULL REFERENCES agents(id) ON DELETE CASCADE,
    enabled INTEGER NOT NULL DEFAULT 1,
    repo_url TEXT,
    commit_hash TEXT,
    last_synced_at TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS skill_api_calls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    skill_id INTEGER NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
    api_name TEXT NOT NULL,
    method TEXT NOT NULL,
    url TEXT NOT NULL,
    description TEXT,
    required_params TEXT NOT NULL DEFAULT '[]',
    optional_params TEXT NOT NULL DEFAULT '[]',
    auth_type TEXT,
    auth_config TEXT,
    request_headers TEXT,
    request_body_template TEXT,
    response_format TEXT,
    timeout_seconds INTEGER NOT NULL DEFAULT 30,
    retry_count INTEGER NOT NULL DEFAULT 0,
    enabled INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS skill_requirements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    skill_id INTEGER NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
    requirement_type TEXT NOT NULL
        CHECK (requirement_type IN ('dependency', 'api_key', 'min_version')),
    requirement_name TEXT NOT NULL,
    requirement_value TEXT,
    is_required INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- Append-only audit trail
CREATE TABLE IF NOT EXISTS skill_sync_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    skill_id INTEGER NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
    sync_type TEXT NOT NULL,
    commit_hash TEXT,
    sync_status TEXT NOT NULL,
    sync_message TEXT,
    files_updated TEXT NOT NULL DEFAULT '[]',
    sync_duration_ms INTEGER,
    synced_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_skills_agent ON skills(agent_id, enabled);
CREATE INDEX IF NOT EXISTS idx_skills_agent_name ON skills(agent_id, name);
CREATE INDEX IF NOT EXISTS idx_api_calls_skill ON skill_api_calls(skill_id);
CREATE INDEX IF NOT EXISTS idx_requirements_skill ON skill_requirements(skill_id);
CREATE INDEX IF NOT EXISTS idx_sync_log_skill ON skill_sync_log(skill_id);

-- Server-assigned updated_at
CREATE TRIGGER IF NOT EXISTS agents_touch AFTER UPDATE ON agents
WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE agents SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS skills_touch AFTER UPDATE ON skills
WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE skills SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS skill_api_calls_touch AFTER UPDATE ON skill_api_calls
WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE skill_api_calls SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")
            .unwrap();
        stmt.exists([name]).unwrap()
    }

    #[test]
    fn test_schema_creation() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        for table in [
            "agents",
            "skills",
            "skill_api_calls",
            "skill_requirements",
            "skill_sync_log",
        ] {
            assert!(table_exists(&conn, table), "missing table {}", table);
        }

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }

    #[test]
    fn test_orphan_skill_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO skills (skill_id, name, description, version, content, agent_id)
             VALUES ('x', 'X', 'd', '1.0.0', 'c', 42)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cascade_delete_side_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        conn.execute("INSERT INTO agents (name) VALUES ('p')", []).unwrap();
        conn.execute(
            "INSERT INTO skills (skill_id, name, description, version, content, agent_id)
             VALUES ('x', 'X', 'd', '1.0.0', 'c', 1)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO skill_api_calls (skill_id, api_name, method, url) VALUES (1, 'a', 'GET', 'u')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO skill_requirements (skill_id, requirement_type, requirement_name)
             VALUES (1, 'api_key', 'KEY')",
            [],
        )
        .unwrap();

        conn.execute("DELETE FROM skills WHERE id = 1", []).unwrap();

        let calls: i64 = conn
            .query_row("SELECT COUNT(*) FROM skill_api_calls", [], |row| row.get(0))
            .unwrap();
        let reqs: i64 = conn
            .query_row("SELECT COUNT(*) FROM skill_requirements", [], |row| row.get(0))
            .unwrap();
        assert_eq!(calls, 0);
        assert_eq!(reqs, 0);
    }

    #[test]
    fn test_timestamps_are_server_assigned() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn.execute("INSERT INTO agents (name) VALUES ('p')", []).unwrap();

        let created: String = conn
            .query_row("SELECT created_at FROM agents WHERE name = 'p'", [], |row| row.get(0))
            .unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&created).is_ok());
    }
}
