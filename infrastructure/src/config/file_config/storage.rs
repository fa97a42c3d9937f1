//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File locations; relative paths resolve against the working directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// JSON database of papers, authors and users
    pub database: PathBuf,
    /// TOML round state
    pub state_file: PathBuf,
    /// Directory for `paperbot.log`
    pub log_dir: PathBuf,
    /// JSONL round event log; `None` disables it
    pub event_log: Option<PathBuf>,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("paperbot.json"),
            state_file: PathBuf::from("paperbot-state.toml"),
            log_dir: PathBuf::from("logs"),
            event_log: Some(PathBuf::from("logs/rounds.jsonl")),
        }
    }
}
