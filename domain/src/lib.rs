//! Domain layer for paperbot
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Rounds
//!
//! A round is one voting-then-discussion cycle:
//!
//! - **Voting**: a thread is opened and members reply with nominations
//! - **Discussion**: the best-scored nomination gets its own thread
//!
//! ## Papers
//!
//! Every nomination is parsed into a [`Candidate`] and merged into a
//! persisted [`Paper`], deduplicated by [`NormalizedTitle`].

pub mod config;
pub mod core;
pub mod nomination;
pub mod paper;
pub mod platform;
pub mod ranking;
pub mod round;
pub mod subscription;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::error::DomainError;
pub use nomination::{
    candidate::Candidate,
    parser::{
        NominationField, NominationParser, ParseError, ParseOutcome, RegexNominationParser,
        RejectionReason,
    },
};
pub use paper::{
    entities::{Author, Nomination, Paper, Submitter},
    title::{NormalizedTitle, normalize_title},
};
pub use platform::{InboxMessage, PlatformComment, ThreadHandle};
pub use ranking::{
    order::{RankedNomination, rank_order},
    table::ranking_table,
};
pub use round::{
    schedule::{RoundInterval, TickDecision, advance_past, decide},
    state::{RoundPhase, RoundState},
    templates::MessageTemplate,
};
pub use subscription::{RoundKind, SubscriptionAction, SubscriptionRequest};
