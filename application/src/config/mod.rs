//! Application-level configuration.
//!
//! - [`RoundSettings`]: destination, templates and schedule used by the tick

pub mod round_settings;

pub use round_settings::RoundSettings;
