//! JSON file persistence adapter.

use std::fs;
use std::path::PathBuf;

use crate::domain::error::JournalError;
use crate::domain::trade::Trade;
use crate::ports::storage_port::StoragePort;

/// Stores the trade list as a pretty-printed JSON array at a fixed path. A
/// missing file loads as an empty journal.
pub struct JsonStorageAdapter {
    path: PathBuf,
}

impl JsonStorageAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StoragePort for JsonStorageAdapter {
    fn load(&self) -> Result<Vec<Trade>, JournalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| JournalError::Storage {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        serde_json::from_str(&content).map_err(|e| JournalError::Storage {
            reason: format!("corrupt journal file {}: {}", self.path.display(), e),
        })
    }

    fn save(&self, trades: &[Trade]) -> Result<(), JournalError> {
        let json = serde_json::to_string_pretty(trades).map_err(|e| JournalError::Storage {
            reason: format!("failed to serialize journal: {e}"),
        })?;
        fs::write(&self.path, json).map_err(|e| JournalError::Storage {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}
