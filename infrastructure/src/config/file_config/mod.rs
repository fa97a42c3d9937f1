//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application settings
//! after validation.

mod account;
mod community;
mod schedule;
mod storage;
mod templates;

pub use account::FileAccountConfig;
pub use community::FileCommunityConfig;
pub use schedule::FileScheduleConfig;
pub use storage::FileStorageConfig;
pub use templates::FileTemplatesConfig;

use chrono::NaiveDate;
use paperbot_application::RoundSettings;
use paperbot_domain::{ConfigIssue, RoundState};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reddit credentials
    pub account: FileAccountConfig,
    /// Subreddit, maintainer and moderation settings
    pub community: FileCommunityConfig,
    /// First round dates and interval
    pub schedule: FileScheduleConfig,
    /// Database, state and log locations
    pub storage: FileStorageConfig,
    /// Thread titles and bodies
    pub templates: FileTemplatesConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Any issue with [`Severity::Error`](paperbot_domain::Severity::Error)
    /// must stop the bot before it touches the platform.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.account.validate());
        issues.extend(self.community.validate());
        issues.extend(self.schedule.validate());
        issues.extend(self.templates.validate());
        issues
    }

    /// Settings for the tick use case
    pub fn to_round_settings(&self) -> RoundSettings {
        let mut settings = RoundSettings::new(self.community.destination())
            .with_interval(self.schedule.interval());
        if let Some(maintainer) = self.community.maintainer.as_deref().filter(|m| !m.is_empty()) {
            settings = settings.with_maintainer(maintainer);
        }
        if let Some(page) = self.community.archive_page.as_deref().filter(|p| !p.is_empty()) {
            settings = settings.with_archive_page(page);
        }
        settings.voting_title = self.templates.voting_title.clone();
        settings.voting_body = self.templates.voting_body.clone();
        settings.discussion_title = self.templates.discussion_title.clone();
        settings
    }

    /// Round state for a community that has never run a round
    pub fn initial_state(&self, today: NaiveDate) -> RoundState {
        let (voting, discussion) = self.schedule.first_dates(today);
        RoundState::new(voting, discussion).with_moderator_mode(self.community.moderator_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperbot_domain::RoundInterval;

    const FULL: &str = r#"
[account]
user_agent = "paperbot/0.3 by /u/admin"
username = "cspaperbot"
password = "hunter2"
client_id = "abc"
client_secret = "def"

[community]
subreddit = "cspapers"
maintainer = "admin"
moderator_mode = true
archive_page = "discussed"

[schedule]
first_voting_date = "2026-10-19"
first_discussion_date = "2026-10-26"
interval_days = 14

[storage]
database = "data/papers.json"
event_log = "logs/rounds.jsonl"

[templates]
discussion_title = "[Round {round}] {title}"
"#;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_deserialize_full_config() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        assert_eq!(config.account.username, "cspaperbot");
        assert_eq!(config.community.subreddit, "cspapers");
        assert!(config.community.moderator_mode);
        assert_eq!(config.storage.database.to_str(), Some("data/papers.json"));
        // Unset keys keep their defaults
        assert_eq!(config.storage.state_file.to_str(), Some("paperbot-state.toml"));
        assert!(config.templates.voting_title.contains("{round}"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config_needs_credentials() {
        let issues = FileConfig::default().validate();
        assert!(issues.iter().any(|i| i.is_fatal()));
        assert!(issues.iter().any(|i| i.message.contains("account.password")));
        assert!(issues.iter().any(|i| i.message.contains("community.subreddit")));
    }

    #[test]
    fn test_to_round_settings() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        let settings = config.to_round_settings();
        assert_eq!(settings.destination, "cspapers");
        assert_eq!(settings.maintainer.as_deref(), Some("admin"));
        assert_eq!(settings.archive_page.as_deref(), Some("discussed"));
        assert_eq!(settings.interval, RoundInterval::TWO_WEEKS);
        assert_eq!(settings.discussion_title, "[Round {round}] {title}");
    }

    #[test]
    fn test_initial_state() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        let state = config.initial_state(date("2026-10-01"));
        assert_eq!(state.next_voting_date, date("2026-10-19"));
        assert_eq!(state.next_discussion_date, date("2026-10-26"));
        assert!(state.moderator_mode);
        assert_eq!(state.paper_round, 0);
    }
}
