//! Presentation layer for paperbot
//!
//! This crate contains the CLI definition and the console formatter
//! for tick reports.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::TickReportFormatter;
