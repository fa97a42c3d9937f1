//! Round state persistence port

use paperbot_domain::RoundState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Round state I/O error: {0}")]
    Io(String),

    #[error("Round state is corrupt: {0}")]
    Corrupt(String),
}

/// Loads the round state at startup and writes it back at the end of a tick
pub trait RoundStateRepository: Send + Sync {
    /// `None` when no state was ever saved
    fn load(&self) -> Result<Option<RoundState>, StateError>;

    fn save(&self, state: &RoundState) -> Result<(), StateError>;
}
