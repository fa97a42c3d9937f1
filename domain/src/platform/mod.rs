//! Platform-facing value objects
//!
//! Shapes of the data the discussion platform hands to the core. They are
//! plain values; fetching them is the platform port's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A thread created on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadHandle {
    /// Platform id, used for follow-up operations
    pub id: String,
    /// Permalink shown to members
    pub permalink: String,
}

impl ThreadHandle {
    pub fn new(id: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            permalink: permalink.into(),
        }
    }
}

/// A top-level reply in a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformComment {
    pub id: String,
    /// `None` when the account was deleted
    pub author: Option<String>,
    pub body: String,
    /// Approval score; may be negative
    pub score: i64,
    pub permalink: String,
    pub created: DateTime<Utc>,
}

impl PlatformComment {
    pub fn has_author(&self) -> bool {
        self.author.as_deref().is_some_and(|a| !a.is_empty())
    }
}

/// An unread private message addressed to the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    pub id: String,
    /// `None` for system messages without a user sender
    pub sender: Option<String>,
    pub subject: String,
    pub body: String,
}
