//! Round-open notifications

use crate::ports::platform::PlatformClient;
use paperbot_domain::{MessageTemplate, RoundKind};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of notifying a subscriber set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<String>,
    pub failed: Vec<String>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct NotifySubscribersUseCase<P: PlatformClient> {
    platform: Arc<P>,
}

impl<P: PlatformClient> NotifySubscribersUseCase<P> {
    pub fn new(platform: Arc<P>) -> Self {
        Self { platform }
    }

    /// Message every recipient individually.
    ///
    /// A failed delivery is logged and does not stop the others.
    pub async fn notify<'r>(
        &self,
        kind: RoundKind,
        recipients: impl IntoIterator<Item = &'r String>,
        title: &str,
        link: &str,
    ) -> DeliveryReport {
        let (subject, body) = MessageTemplate::round_notification(kind, title, link);
        let mut report = DeliveryReport::default();

        for recipient in recipients {
            match self
                .platform
                .send_direct_message(recipient, &subject, &body)
                .await
            {
                Ok(()) => {
                    debug!("Notified {} about {} thread", recipient, kind);
                    report.delivered.push(recipient.clone());
                }
                Err(e) => {
                    warn!("Failed to notify {}: {}", recipient, e);
                    report.failed.push(recipient.clone());
                }
            }
        }

        report
    }
}
