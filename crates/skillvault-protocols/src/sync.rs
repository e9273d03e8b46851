//! Sync audit trail definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Full,
    Incremental,
}

impl SyncType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncType::Full => "full",
            SyncType::Incremental => "incremental",
        }
    }
}

impl FromStr for SyncType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(SyncType::Full),
            "incremental" => Ok(SyncType::Incremental),
            other => Err(StoreError::Validation(format!("unknown sync type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Failed,
    Partial,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Success => "success",
            SyncStatus::Failed => "failed",
            SyncStatus::Partial => "partial",
        }
    }
}

impl FromStr for SyncStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(SyncStatus::Success),
            "failed" => Ok(SyncStatus::Failed),
            "partial" => Ok(SyncStatus::Partial),
            other => Err(StoreError::Validation(format!("unknown sync status '{}'", other))),
        }
    }
}

/// Outcome of an import or sync attempt, to be appended to the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub sync_type: SyncType,
    pub status: SyncStatus,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub commit_hash: Option<String>,

    #[serde(default)]
    pub files_updated: Vec<String>,

    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl SyncOutcome {
    pub fn new(sync_type: SyncType, status: SyncStatus) -> Self {
        Self {
            sync_type,
            status,
            message: None,
            commit_hash: None,
            files_updated: Vec::new(),
            duration_ms: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_commit_hash(mut self, commit_hash: impl Into<String>) -> Self {
        self.commit_hash = Some(commit_hash.into());
        self
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files_updated = files;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// A row of the append-only sync log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncLogEntry {
    pub id: i64,

    /// External skill ID the entry belongs to.
    pub skill_id: String,

    #[serde(flatten)]
    pub outcome: SyncOutcome,

    pub synced_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_builder() {
        let outcome = SyncOutcome::new(SyncType::Full, SyncStatus::Success)
            .with_message("imported")
            .with_files(vec!["skill.json".to_string(), "content.md".to_string()])
            .with_duration_ms(12);
        assert_eq!(outcome.files_updated.len(), 2);
        assert_eq!(outcome.duration_ms, Some(12));
        assert_eq!(outcome.message.as_deref(), Some("imported"));
        assert!(outcome.commit_hash.is_none());
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!("incremental".parse::<SyncType>().unwrap(), SyncType::Incremental);
        assert_eq!("partial".parse::<SyncStatus>().unwrap(), SyncStatus::Partial);
        assert_eq!(SyncStatus::Failed.as_str(), "failed");
        assert!("weekly".parse::<SyncType>().is_err());
    }
}
