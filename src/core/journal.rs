//! Append-only JSONL journal of autoload activity.
//!
//! One line per operation (`resolve`, `load`, `load_namespace`). The journal is optional; an
//! `Autoloader` without one records nothing.

use crate::core::error::AutoloadError;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use ulid::Ulid;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JournalEvent {
    pub ts: String,
    pub event_id: String,
    pub op: String,
    pub target: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl JournalEvent {
    pub fn new(op: &str, target: &str, status: &str) -> Self {
        Self {
            ts: now_epoch_z(),
            event_id: Ulid::new().to_string(),
            op: op.to_string(),
            target: target.to_string(),
            status: status.to_string(),
            path: None,
            content_hash: None,
        }
    }

    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_string_lossy().to_string());
        self
    }

    pub fn with_hash(mut self, hash: &str) -> Self {
        self.content_hash = Some(hash.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, event: &JournalEvent) -> Result<(), AutoloadError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let line = serde_json::to_string(event)?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(f, "{}", line)?;
        Ok(())
    }

    /// Reads every event back; malformed lines are skipped.
    pub fn read_all(&self) -> Result<Vec<JournalEvent>, AutoloadError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .filter_map(|l| serde_json::from_str(l).ok())
            .collect())
    }
}

/// Returns unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
pub fn now_epoch_z() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}
