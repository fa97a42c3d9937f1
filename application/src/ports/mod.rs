//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod event_logger;
pub mod platform;
pub mod record_store;
pub mod state_repository;
