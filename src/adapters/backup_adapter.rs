//! JSON backup envelope import/export.
//!
//! A backup wraps the raw trade list with the session settings and an export
//! stamp, so a journal can be moved between machines in one file.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::JournalError;
use crate::domain::session::SessionWindow;
use crate::domain::trade::Trade;

pub const BACKUP_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEnvelope {
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub settings: Option<BackupSettings>,
    pub export_date: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSettings {
    pub session_start: String,
    pub session_end: String,
}

impl BackupSettings {
    pub fn from_window(window: &SessionWindow) -> Self {
        BackupSettings {
            session_start: window.start.format("%H:%M").to_string(),
            session_end: window.end.format("%H:%M").to_string(),
        }
    }

    pub fn session_window(&self) -> Result<SessionWindow, JournalError> {
        SessionWindow::parse(&self.session_start, &self.session_end)
    }
}

pub fn write_backup(
    path: &Path,
    trades: &[Trade],
    session: &SessionWindow,
    exported_at: DateTime<Utc>,
) -> Result<(), JournalError> {
    let envelope = BackupEnvelope {
        trades: trades.to_vec(),
        settings: Some(BackupSettings::from_window(session)),
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: BACKUP_VERSION.to_string(),
    };
    let json = serde_json::to_string_pretty(&envelope).map_err(|e| JournalError::Storage {
        reason: format!("failed to serialize backup: {e}"),
    })?;
    fs::write(path, json).map_err(|e| JournalError::Storage {
        reason: format!("failed to write {}: {}", path.display(), e),
    })
}

/// Parses a backup file. A file that is not a well-formed envelope of
/// trade-shaped records is rejected as a whole; record-level range checks
/// happen later in `TradeStore::replace_all`.
pub fn read_backup(path: &Path) -> Result<BackupEnvelope, JournalError> {
    let content = fs::read_to_string(path).map_err(|e| JournalError::Storage {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    serde_json::from_str(&content).map_err(|e| JournalError::ImportShape {
        reason: format!("not a valid backup file: {e}"),
    })
}
