//! Inbox processing use case
//!
//! Subscription requests update the round state and get a confirmation;
//! every other message is forwarded to the maintainer. Each message is
//! marked read once, whatever happened to it.

use crate::ports::event_logger::{RoundEvent, RoundEventLogger};
use crate::ports::platform::{PlatformClient, PlatformError};
use paperbot_domain::{
    InboxMessage, MessageTemplate, RoundKind, RoundState, SubscriptionRequest,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// What happened to the unread messages of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboxSummary {
    pub processed: usize,
    pub subscription_changes: usize,
    pub forwarded: usize,
    /// Replies or forwards that could not be sent
    pub delivery_failures: usize,
}

pub struct ProcessInboxUseCase<P: PlatformClient> {
    platform: Arc<P>,
    event_logger: Arc<dyn RoundEventLogger>,
}

impl<P: PlatformClient> ProcessInboxUseCase<P> {
    pub fn new(platform: Arc<P>, event_logger: Arc<dyn RoundEventLogger>) -> Self {
        Self {
            platform,
            event_logger,
        }
    }

    /// Handle every unread message.
    ///
    /// Fails only when the inbox itself cannot be fetched.
    pub async fn execute(
        &self,
        state: &mut RoundState,
        maintainer: Option<&str>,
    ) -> Result<InboxSummary, PlatformError> {
        let messages = self.platform.get_unread_messages().await?;
        let mut summary = InboxSummary::default();

        for message in &messages {
            let delivered = match (
                message.sender.as_deref().filter(|s| !s.is_empty()),
                SubscriptionRequest::parse(&message.subject, &message.body),
            ) {
                (Some(sender), Some(request)) => {
                    summary.subscription_changes += 1;
                    self.apply_subscription(state, sender, &request).await
                }
                _ => {
                    summary.forwarded += 1;
                    self.forward(message, maintainer).await
                }
            };
            if !delivered {
                summary.delivery_failures += 1;
            }

            if let Err(e) = self.platform.mark_message_read(&message.id).await {
                warn!("Failed to mark message {} read: {}", message.id, e);
            }
            summary.processed += 1;
        }

        if summary.processed > 0 {
            info!(
                "Processed {} message(s): {} subscription request(s), {} forwarded",
                summary.processed, summary.subscription_changes, summary.forwarded
            );
        }
        Ok(summary)
    }

    async fn apply_subscription(
        &self,
        state: &mut RoundState,
        sender: &str,
        request: &SubscriptionRequest,
    ) -> bool {
        let changed = request.apply_to(state, sender);
        let subscribed: Vec<RoundKind> = state.subscriptions_of(sender);

        info!(
            "{:?} {} for {:?} (changed: {})",
            request.action, sender, request.kinds, changed
        );
        self.event_logger.log(RoundEvent::new(
            "subscription_changed",
            json!({
                "user": sender,
                "action": format!("{:?}", request.action).to_lowercase(),
                "kinds": request.kinds,
                "changed": changed,
            }),
        ));

        let (subject, body) = MessageTemplate::subscription_confirmation(&subscribed);
        match self.platform.send_direct_message(sender, &subject, &body).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to confirm subscription to {}: {}", sender, e);
                false
            }
        }
    }

    async fn forward(&self, message: &InboxMessage, maintainer: Option<&str>) -> bool {
        let Some(maintainer) = maintainer else {
            warn!(
                "No maintainer configured; dropping message {} ({})",
                message.id, message.subject
            );
            return false;
        };

        let sender = message.sender.as_deref().unwrap_or("[unknown]");
        let (subject, body) =
            MessageTemplate::forwarded_message(sender, &message.subject, &message.body);
        match self.platform.send_direct_message(maintainer, &subject, &body).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to forward message {} to {}: {}", message.id, maintainer, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, MockPlatform, RecordingEventLogger, message};

    fn state() -> RoundState {
        RoundState::new("2026-10-19".parse().unwrap(), "2026-11-02".parse().unwrap())
    }

    fn mark_read_count(platform: &MockPlatform, id: &str) -> usize {
        platform
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::MarkRead { message_id } if message_id == id))
            .count()
    }

    #[tokio::test]
    async fn test_subscribe_voting_and_discussion() {
        let platform = Arc::new(MockPlatform::new().with_inbox(vec![message(
            "m1",
            Some("alice"),
            "hi",
            "subscribe voting discussion",
        )]));
        let logger = Arc::new(RecordingEventLogger::default());
        let use_case = ProcessInboxUseCase::new(platform.clone(), logger.clone());
        let mut state = state();

        let summary = use_case.execute(&mut state, Some("admin")).await.unwrap();

        assert!(state.voting_subscribers.contains("alice"));
        assert!(state.discussion_subscribers.contains("alice"));
        assert_eq!(summary.subscription_changes, 1);

        let messages = platform.direct_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "alice");
        assert!(messages[0].2.contains("voting, discussion"));
        assert_eq!(mark_read_count(&platform, "m1"), 1);
        assert_eq!(logger.event_types(), vec!["subscription_changed"]);
    }

    #[tokio::test]
    async fn test_unsubscribe_removes_sender() {
        let platform = Arc::new(MockPlatform::new().with_inbox(vec![message(
            "m1",
            Some("alice"),
            "Unsubscribe",
            "voting please",
        )]));
        let use_case =
            ProcessInboxUseCase::new(platform.clone(), Arc::new(RecordingEventLogger::default()));
        let mut state = state();
        state.voting_subscribers.insert("alice".to_string());
        state.discussion_subscribers.insert("alice".to_string());

        use_case.execute(&mut state, None).await.unwrap();

        assert!(!state.voting_subscribers.contains("alice"));
        assert!(state.discussion_subscribers.contains("alice"));
    }

    #[tokio::test]
    async fn test_unknown_message_forwarded_and_marked_read() {
        let platform = Arc::new(MockPlatform::new().with_inbox(vec![message(
            "m2",
            Some("bob"),
            "Question",
            "When is the next round?",
        )]));
        let use_case =
            ProcessInboxUseCase::new(platform.clone(), Arc::new(RecordingEventLogger::default()));
        let mut state = state();

        let summary = use_case.execute(&mut state, Some("admin")).await.unwrap();

        assert_eq!(summary.forwarded, 1);
        let messages = platform.direct_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "admin");
        assert!(messages[0].1.contains("/u/bob"));
        assert!(messages[0].2.contains("> When is the next round?"));
        assert_eq!(mark_read_count(&platform, "m2"), 1);
        assert!(state.voting_subscribers.is_empty());
    }

    #[tokio::test]
    async fn test_marked_read_even_when_reply_fails() {
        let platform = Arc::new(
            MockPlatform::new()
                .with_inbox(vec![message("m3", Some("carol"), "subscribe", "discussion")])
                .failing_recipient("carol"),
        );
        let use_case =
            ProcessInboxUseCase::new(platform.clone(), Arc::new(RecordingEventLogger::default()));
        let mut state = state();

        let summary = use_case.execute(&mut state, None).await.unwrap();

        assert!(state.discussion_subscribers.contains("carol"));
        assert_eq!(summary.delivery_failures, 1);
        assert_eq!(mark_read_count(&platform, "m3"), 1);
    }

    #[tokio::test]
    async fn test_message_without_sender_is_forwarded() {
        let platform = Arc::new(MockPlatform::new().with_inbox(vec![message(
            "m4",
            None,
            "subscribe",
            "voting",
        )]));
        let use_case =
            ProcessInboxUseCase::new(platform.clone(), Arc::new(RecordingEventLogger::default()));
        let mut state = state();

        let summary = use_case.execute(&mut state, Some("admin")).await.unwrap();

        assert_eq!(summary.forwarded, 1);
        assert!(state.voting_subscribers.is_empty());
        assert_eq!(mark_read_count(&platform, "m4"), 1);
    }

    #[tokio::test]
    async fn test_inbox_fetch_failure_is_an_error() {
        let platform = MockPlatform::new();
        *platform.fail_inbox.lock().unwrap() = true;
        let use_case = ProcessInboxUseCase::new(
            Arc::new(platform),
            Arc::new(RecordingEventLogger::default()),
        );
        let mut state = state();

        assert!(use_case.execute(&mut state, None).await.is_err());
    }
}
