//! Record store port
//!
//! A key-indexed document store with one namespace per [`Collection`].
//! Records are JSON values; typed mapping happens in the registry.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Named record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Papers,
    Authors,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Papers, Collection::Authors, Collection::Users];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Papers => "papers",
            Collection::Authors => "authors",
            Collection::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open store at {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("Store I/O error: {0}")]
    Io(String),

    #[error("Invalid {collection} record '{key}': {reason}")]
    InvalidRecord {
        collection: Collection,
        key: String,
        reason: String,
    },

    #[error("Store is closed")]
    Closed,
}

/// Key-indexed record store
///
/// Single writer per invocation; `close` makes every `put` durable.
pub trait RecordStore: Send + Sync {
    fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError>;

    fn put(&self, collection: Collection, key: &str, record: Value) -> Result<(), StoreError>;

    /// All keys of a collection, sorted
    fn keys(&self, collection: Collection) -> Result<Vec<String>, StoreError>;

    fn close(&self) -> Result<(), StoreError>;
}

/// Read and deserialize a record
pub fn get_record<T: DeserializeOwned>(
    store: &dyn RecordStore,
    collection: Collection,
    key: &str,
) -> Result<Option<T>, StoreError> {
    store
        .get(collection, key)?
        .map(|value| {
            serde_json::from_value(value).map_err(|e| StoreError::InvalidRecord {
                collection,
                key: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Serialize and write a record
pub fn put_record<T: Serialize>(
    store: &dyn RecordStore,
    collection: Collection,
    key: &str,
    record: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(record).map_err(|e| StoreError::InvalidRecord {
        collection,
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.put(collection, key, value)
}
