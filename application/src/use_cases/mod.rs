//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod notifications;
pub mod process_inbox;
pub mod rank_nominations;
pub mod registry;
pub mod run_tick;
