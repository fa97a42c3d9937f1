//! Logging infrastructure: structured round event logging.
//!
//! Provides [`JsonlRoundEventLogger`], a JSONL file writer that implements
//! the [`RoundEventLogger`](paperbot_application::RoundEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlRoundEventLogger;
