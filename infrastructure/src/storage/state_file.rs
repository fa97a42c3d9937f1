//! TOML round state file

use paperbot_application::{RoundStateRepository, StateError};
use paperbot_domain::RoundState;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists [`RoundState`] as a TOML document
pub struct TomlStateFile {
    path: PathBuf,
}

impl TomlStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RoundStateRepository for TomlStateFile {
    fn load(&self) -> Result<Option<RoundState>, StateError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StateError::Io(e.to_string()))?;
        let state = toml::from_str(&content).map_err(|e| StateError::Corrupt(e.to_string()))?;
        debug!("Loaded round state from {}", self.path.display());
        Ok(Some(state))
    }

    fn save(&self, state: &RoundState) -> Result<(), StateError> {
        let content =
            toml::to_string_pretty(state).map_err(|e| StateError::Corrupt(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StateError::Io(e.to_string()))?;
        }
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content).map_err(|e| StateError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StateError::Io(e.to_string()))?;
        debug!("Saved round state to {}", self.path.display());
        Ok(())
    }
}
