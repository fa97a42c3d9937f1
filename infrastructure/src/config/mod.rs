//! Configuration file loading for paperbot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `PAPERBOT_<SECTION>__<KEY>` (e.g. `PAPERBOT_ACCOUNT__PASSWORD`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./paperbot.toml`
//! 4. Global: `~/.config/paperbot/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAccountConfig, FileCommunityConfig, FileConfig, FileScheduleConfig, FileStorageConfig,
    FileTemplatesConfig,
};
pub use loader::ConfigLoader;
