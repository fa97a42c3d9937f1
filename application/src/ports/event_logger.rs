//! Port for structured round event logging.
//!
//! Defines the [`RoundEventLogger`] trait for recording what each tick did
//! (threads opened, nominations rejected, subscriptions changed, ...) to a
//! structured audit log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures round
//! history in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured round event for logging.
pub struct RoundEvent {
    /// Event type identifier (e.g., "voting_opened", "nomination_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RoundEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging round events.
///
/// The `log` method is synchronous and non-fallible; a broken audit log
/// must never stop a round transition.
pub trait RoundEventLogger: Send + Sync {
    fn log(&self, event: RoundEvent);
}

/// No-op implementation for tests and when the audit log is disabled.
pub struct NoRoundEventLogger;

impl RoundEventLogger for NoRoundEventLogger {
    fn log(&self, _event: RoundEvent) {}
}
