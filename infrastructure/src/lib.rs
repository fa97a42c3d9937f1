//! Infrastructure layer for paperbot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Reddit client, file-backed storage,
//! round event logging and configuration file loading.

pub mod config;
pub mod logging;
pub mod reddit;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileAccountConfig, FileCommunityConfig, FileConfig, FileScheduleConfig,
    FileStorageConfig, FileTemplatesConfig,
};
pub use logging::JsonlRoundEventLogger;
pub use reddit::{RedditClient, RedditError};
pub use storage::{JsonFileStore, TomlStateFile};
