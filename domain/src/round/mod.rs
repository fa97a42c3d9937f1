//! Round lifecycle
//!
//! ```text
//!   Idle ──(voting due)──▶ VotingOpen ──(discussion due)──▶ DiscussionOpen
//!                              ▲                                  │
//!                              └──────────(voting due)────────────┘
//! ```
//!
//! Each invocation of the bot is one tick: [`schedule::decide`] looks at
//! today's date and the persisted [`state::RoundState`] and picks at most
//! one transition.

pub mod schedule;
pub mod state;
pub mod templates;

pub use schedule::{RoundInterval, TickDecision, advance_past, decide};
pub use state::{RoundPhase, RoundState};
pub use templates::MessageTemplate;
