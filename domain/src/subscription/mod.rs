//! Subscription requests
//!
//! Members manage their notifications by private message, e.g.
//! `subscribe voting discussion` or `unsubscribe voting`. The keywords may
//! appear in the subject or the body, in any case.

use crate::round::state::RoundState;
use serde::{Deserialize, Serialize};

/// The two kinds of thread a member can be notified about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundKind {
    Voting,
    Discussion,
}

impl RoundKind {
    pub const ALL: [RoundKind; 2] = [RoundKind::Voting, RoundKind::Discussion];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundKind::Voting => "voting",
            RoundKind::Discussion => "discussion",
        }
    }
}

impl std::fmt::Display for RoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    Subscribe,
    Unsubscribe,
}

/// A recognized subscribe/unsubscribe message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    pub action: SubscriptionAction,
    /// Kinds named in the message, without duplicates, in canonical order
    pub kinds: Vec<RoundKind>,
}

impl SubscriptionRequest {
    /// Recognize a request from a message's subject and body.
    ///
    /// Needs an action keyword and at least one round kind; anything else
    /// is not a subscription request.
    ///
    /// # Examples
    ///
    /// ```
    /// use paperbot_domain::{RoundKind, SubscriptionAction, SubscriptionRequest};
    ///
    /// let request = SubscriptionRequest::parse("", "subscribe voting discussion").unwrap();
    /// assert_eq!(request.action, SubscriptionAction::Subscribe);
    /// assert_eq!(request.kinds, vec![RoundKind::Voting, RoundKind::Discussion]);
    ///
    /// assert!(SubscriptionRequest::parse("hello", "nice bot").is_none());
    /// ```
    pub fn parse(subject: &str, body: &str) -> Option<Self> {
        let text = format!("{subject} {body}").to_lowercase();
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let action = if words.contains(&"unsubscribe") {
            SubscriptionAction::Unsubscribe
        } else if words.contains(&"subscribe") {
            SubscriptionAction::Subscribe
        } else {
            return None;
        };

        let kinds: Vec<RoundKind> = RoundKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                RoundKind::Voting => words.contains(&"voting"),
                RoundKind::Discussion => {
                    words.contains(&"discussion") || words.contains(&"discussions")
                }
            })
            .collect();

        if kinds.is_empty() {
            return None;
        }
        Some(Self { action, kinds })
    }

    /// Apply the request for `user`; returns whether any set changed.
    ///
    /// Idempotent: subscribing twice or unsubscribing a non-member is a no-op.
    pub fn apply_to(&self, state: &mut RoundState, user: &str) -> bool {
        let mut changed = false;
        for kind in &self.kinds {
            let subscribers = state.subscribers_mut(*kind);
            changed |= match self.action {
                SubscriptionAction::Subscribe => subscribers.insert(user.to_string()),
                SubscriptionAction::Unsubscribe => subscribers.remove(user),
            };
        }
        changed
    }
}
