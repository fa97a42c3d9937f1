//! Persisted round state

use crate::platform::ThreadHandle;
use crate::subscription::RoundKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which thread is currently the active one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// No round opened yet
    #[default]
    Idle,
    /// A voting thread is collecting nominations
    VotingOpen,
    /// The last winner is being discussed
    DiscussionOpen,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::VotingOpen => "voting_open",
            RoundPhase::DiscussionOpen => "discussion_open",
        }
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single persisted instance, loaded once per tick and written back at the end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub next_voting_date: NaiveDate,
    pub next_discussion_date: NaiveDate,
    /// Monotonic round counter, incremented when a discussion opens
    #[serde(default)]
    pub paper_round: u32,
    #[serde(default)]
    pub phase: RoundPhase,
    /// Whether the bot may pin threads and change comment ordering
    #[serde(default)]
    pub moderator_mode: bool,
    #[serde(default)]
    pub voting_subscribers: BTreeSet<String>,
    #[serde(default)]
    pub discussion_subscribers: BTreeSet<String>,
    #[serde(default)]
    pub current_voting_thread: Option<ThreadHandle>,
    #[serde(default)]
    pub current_discussion_thread: Option<ThreadHandle>,
}

impl RoundState {
    /// Fresh state for a community that has never run a round
    pub fn new(next_voting_date: NaiveDate, next_discussion_date: NaiveDate) -> Self {
        Self {
            next_voting_date,
            next_discussion_date,
            paper_round: 0,
            phase: RoundPhase::Idle,
            moderator_mode: false,
            voting_subscribers: BTreeSet::new(),
            discussion_subscribers: BTreeSet::new(),
            current_voting_thread: None,
            current_discussion_thread: None,
        }
    }

    pub fn with_moderator_mode(mut self, enabled: bool) -> Self {
        self.moderator_mode = enabled;
        self
    }

    pub fn subscribers(&self, kind: RoundKind) -> &BTreeSet<String> {
        match kind {
            RoundKind::Voting => &self.voting_subscribers,
            RoundKind::Discussion => &self.discussion_subscribers,
        }
    }

    pub fn subscribers_mut(&mut self, kind: RoundKind) -> &mut BTreeSet<String> {
        match kind {
            RoundKind::Voting => &mut self.voting_subscribers,
            RoundKind::Discussion => &mut self.discussion_subscribers,
        }
    }

    /// A voting thread is open and has not been ranked yet
    pub fn voting_in_progress(&self) -> bool {
        self.phase == RoundPhase::VotingOpen && self.current_voting_thread.is_some()
    }

    /// Round kinds `user` is currently subscribed to
    pub fn subscriptions_of(&self, user: &str) -> Vec<RoundKind> {
        RoundKind::ALL
            .into_iter()
            .filter(|kind| self.subscribers(*kind).contains(user))
            .collect()
    }
}
