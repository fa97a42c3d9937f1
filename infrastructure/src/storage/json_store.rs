//! JSON file record store
//!
//! The whole database is one JSON object with a map per collection:
//!
//! ```text
//! {
//!   "papers":  { "<normalized title>": { ... } },
//!   "authors": { "<normalized name>":  { ... } },
//!   "users":   { "<username>":         { ... } }
//! }
//! ```
//!
//! Records are held in memory for the run and written back on `close`,
//! through a temporary file renamed over the original.

use paperbot_application::{Collection, RecordStore, StoreError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

type Collections = BTreeMap<String, BTreeMap<String, Value>>;

/// File-backed [`RecordStore`]
pub struct JsonFileStore {
    path: PathBuf,
    /// `None` once closed
    records: Mutex<Option<Collections>>,
}

impl JsonFileStore {
    /// Open the database at `path`, creating it if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let open_error = |reason: String| StoreError::Open {
            path: path.display().to_string(),
            reason,
        };

        let records = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| open_error(e.to_string()))?;
            if content.trim().is_empty() {
                Collections::new()
            } else {
                serde_json::from_str(&content).map_err(|e| open_error(e.to_string()))?
            }
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| open_error(e.to_string()))?;
            }
            Collections::new()
        };

        let store = Self {
            path,
            records: Mutex::new(Some(records)),
        };
        // Fail now, not at the end of the tick, if the file cannot be written
        store.persist()?;

        let counts: Vec<String> = Collection::ALL
            .iter()
            .map(|c| format!("{}={}", c, store.keys(*c).map(|k| k.len()).unwrap_or(0)))
            .collect();
        info!("Opened store {} ({})", store.path.display(), counts.join(", "));
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Collections>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Io("store lock poisoned".to_string()))
    }

    fn persist(&self) -> Result<(), StoreError> {
        let guard = self.lock()?;
        let records = guard.as_ref().ok_or(StoreError::Closed)?;
        let content =
            serde_json::to_string_pretty(records).map_err(|e| StoreError::Io(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        debug!("Wrote store {}", self.path.display());
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        let guard = self.lock()?;
        let records = guard.as_ref().ok_or(StoreError::Closed)?;
        Ok(records
            .get(collection.as_str())
            .and_then(|c| c.get(key))
            .cloned())
    }

    fn put(&self, collection: Collection, key: &str, record: Value) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        let records = guard.as_mut().ok_or(StoreError::Closed)?;
        records
            .entry(collection.as_str().to_string())
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }

    fn keys(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        let guard = self.lock()?;
        let records = guard.as_ref().ok_or(StoreError::Closed)?;
        Ok(records
            .get(collection.as_str())
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn close(&self) -> Result<(), StoreError> {
        self.persist()?;
        self.lock()?.take();
        info!("Closed store {}", self.path.display());
        Ok(())
    }
}
