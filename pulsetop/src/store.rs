//! Durable record of the last successful manual sync.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/pulsetop/last_sync.json
//! (fallback ~/.config/pulsetop/last_sync.json). Last-writer-wins.

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("pulsetop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pulsetop")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SyncRecord {
    #[serde(default)]
    last_sync: Option<String>,
}

pub struct SyncStore {
    path: PathBuf,
}

impl SyncStore {
    pub fn open_default() -> Self {
        Self::at(config_dir().join("last_sync.json"))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Display timestamp of the last successful sync, `"Never"` when none
    /// was ever recorded (or the file is unreadable/corrupt).
    pub fn last_sync(&self) -> String {
        let record: SyncRecord = match fs::read_to_string(&self.path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => SyncRecord::default(),
        };
        record.last_sync.unwrap_or_else(crate::types::never)
    }

    /// Overwrite the record with a new timestamp.
    pub fn record_sync(&self, stamp: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let record = SyncRecord {
            last_sync: Some(stamp.to_string()),
        };
        let data = serde_json::to_vec_pretty(&record).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
