//! Application layer for paperbot
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::RoundSettings;
pub use ports::{
    event_logger::{NoRoundEventLogger, RoundEvent, RoundEventLogger},
    platform::{Credentials, PlatformClient, PlatformError},
    record_store::{Collection, RecordStore, StoreError},
    state_repository::{RoundStateRepository, StateError},
};
pub use use_cases::notifications::{DeliveryReport, NotifySubscribersUseCase};
pub use use_cases::process_inbox::{InboxSummary, ProcessInboxUseCase};
pub use use_cases::rank_nominations::{RankNominationsUseCase, RankingOutcome, RankingStats};
pub use use_cases::registry::{PaperRegistry, RegistryError, UpsertOutcome};
pub use use_cases::run_tick::{RunTickUseCase, TickError, TickOutcome, TickReport};
