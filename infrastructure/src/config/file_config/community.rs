//! Community configuration from TOML (`[community]` section)

use paperbot_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Where the bot posts and who looks after it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCommunityConfig {
    /// Subreddit name without the `/r/` prefix
    pub subreddit: String,
    /// Receives messages the bot does not understand
    pub maintainer: Option<String>,
    /// Pin threads and use contest-mode ordering (needs moderator rights)
    pub moderator_mode: bool,
    /// Wiki page listing every discussed paper
    pub archive_page: Option<String>,
}

impl FileCommunityConfig {
    /// Subreddit with any `/r/` or `r/` prefix removed
    pub fn destination(&self) -> String {
        self.subreddit
            .trim()
            .trim_start_matches('/')
            .trim_start_matches("r/")
            .to_string()
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.destination().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingField {
                    field: "community.subreddit".to_string(),
                },
                "community.subreddit must be set",
            ));
        }
        if self.maintainer.as_deref().is_none_or(|m| m.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingField {
                    field: "community.maintainer".to_string(),
                },
                "community.maintainer is not set; unrecognized messages will be dropped",
            ));
        }
        issues
    }
}
