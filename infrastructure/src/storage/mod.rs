//! File-backed storage adapters
//!
//! - [`JsonFileStore`]: papers, authors and users records
//! - [`TomlStateFile`]: the round state

mod json_store;
mod state_file;

pub use json_store::JsonFileStore;
pub use state_file::TomlStateFile;
