//! Settings for round transitions

use paperbot_domain::{MessageTemplate, RoundInterval};

/// Community-specific settings the tick use case runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSettings {
    /// Community (subreddit) threads are created in
    pub destination: String,
    /// Receives messages the bot does not understand
    pub maintainer: Option<String>,
    /// Wiki page listing discussed papers; `None` disables the archive
    pub archive_page: Option<String>,
    /// Time between two voting (and two discussion) threads
    pub interval: RoundInterval,
    pub voting_title: String,
    pub voting_body: String,
    pub discussion_title: String,
}

impl RoundSettings {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            maintainer: None,
            archive_page: None,
            interval: RoundInterval::default(),
            voting_title: MessageTemplate::DEFAULT_VOTING_TITLE.to_string(),
            voting_body: MessageTemplate::DEFAULT_VOTING_BODY.to_string(),
            discussion_title: MessageTemplate::DEFAULT_DISCUSSION_TITLE.to_string(),
        }
    }

    pub fn with_maintainer(mut self, maintainer: impl Into<String>) -> Self {
        self.maintainer = Some(maintainer.into());
        self
    }

    pub fn with_archive_page(mut self, page: impl Into<String>) -> Self {
        self.archive_page = Some(page.into());
        self
    }

    pub fn with_interval(mut self, interval: RoundInterval) -> Self {
        self.interval = interval;
        self
    }
}
