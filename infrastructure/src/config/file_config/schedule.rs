//! Schedule configuration from TOML (`[schedule]` section)

use chrono::{Days, NaiveDate};
use paperbot_domain::{ConfigIssue, ConfigIssueCode, RoundInterval};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dates seeding the first round, and the round interval.
///
/// Dates are quoted `YYYY-MM-DD` strings. They are only read when no round
/// state has been saved yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScheduleConfig {
    pub first_voting_date: Option<String>,
    pub first_discussion_date: Option<String>,
    pub interval_days: i64,
}

impl Default for FileScheduleConfig {
    fn default() -> Self {
        Self {
            first_voting_date: None,
            first_discussion_date: None,
            interval_days: RoundInterval::TWO_WEEKS.as_days() as i64,
        }
    }
}

impl FileScheduleConfig {
    pub fn interval(&self) -> RoundInterval {
        RoundInterval::days(self.interval_days).unwrap_or_default()
    }

    /// First voting and discussion dates.
    ///
    /// Voting defaults to `today`; discussion defaults to half an interval
    /// after voting, so the two kinds of thread alternate.
    pub fn first_dates(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let voting = parse_date(self.first_voting_date.as_deref()).unwrap_or(today);
        let discussion = parse_date(self.first_discussion_date.as_deref())
            .or_else(|| voting.checked_add_days(Days::new(self.default_offset_days())))
            .unwrap_or(voting);
        (voting, discussion)
    }

    fn default_offset_days(&self) -> u64 {
        (self.interval().as_days() / 2).max(1)
    }

    /// Days from the first voting date to the first discussion date, when
    /// it does not depend on the day the bot first runs
    fn discussion_offset(&self) -> Option<i64> {
        match (
            parse_date(self.first_voting_date.as_deref()),
            parse_date(self.first_discussion_date.as_deref()),
        ) {
            (Some(voting), Some(discussion)) => Some((discussion - voting).num_days()),
            (_, None) if self.first_discussion_date.is_none() => {
                Some(self.default_offset_days() as i64)
            }
            _ => None,
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if RoundInterval::days(self.interval_days).is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "schedule.interval_days".to_string(),
                    value: self.interval_days.to_string(),
                },
                format!(
                    "schedule.interval_days must be at least 1, got {}",
                    self.interval_days
                ),
            ));
        }

        for (field, value) in [
            ("schedule.first_voting_date", &self.first_voting_date),
            ("schedule.first_discussion_date", &self.first_discussion_date),
        ] {
            if let Some(value) = value
                && parse_date(Some(value)).is_none()
            {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidValue {
                        field: field.to_string(),
                        value: value.clone(),
                    },
                    format!("{field}: '{value}' is not a YYYY-MM-DD date"),
                ));
            }
        }

        if let Ok(interval) = RoundInterval::days(self.interval_days)
            && let Some(offset) = self.discussion_offset()
            && offset.rem_euclid(interval.as_days() as i64) == 0
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::Inconsistent {
                    detail: format!(
                        "discussion offset of {offset} day(s) is a multiple of \
                         schedule.interval_days ({})",
                        interval.as_days()
                    ),
                },
                "schedule: voting and discussion would fall on the same day every round; \
                 move schedule.first_discussion_date between two voting dates",
            ));
        }

        if let (Some(voting), Some(discussion)) = (
            parse_date(self.first_voting_date.as_deref()),
            parse_date(self.first_discussion_date.as_deref()),
        ) && discussion <= voting
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::DiscussionBeforeVoting,
                format!(
                    "first discussion ({discussion}) is not after first voting ({voting}); \
                     the first discussion will be skipped"
                ),
            ));
        }

        issues
    }
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v.trim(), DATE_FORMAT).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_dates_default_from_today() {
        let config = FileScheduleConfig::default();
        assert_eq!(
            config.first_dates(date("2026-10-19")),
            (date("2026-10-19"), date("2026-10-26"))
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_first_dates_from_config() {
        let config = FileScheduleConfig {
            first_voting_date: Some("2026-10-26".to_string()),
            first_discussion_date: Some("2026-11-05".to_string()),
            interval_days: 7,
        };
        assert_eq!(
            config.first_dates(date("2026-10-19")),
            (date("2026-10-26"), date("2026-11-05"))
        );
        assert_eq!(config.interval().as_days(), 7);
    }

    #[test]
    fn test_invalid_values() {
        let config = FileScheduleConfig {
            first_voting_date: Some("next monday".to_string()),
            first_discussion_date: None,
            interval_days: 0,
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(ConfigIssue::is_fatal));
    }

    #[test]
    fn test_discussion_before_voting_warns() {
        let config = FileScheduleConfig {
            first_voting_date: Some("2026-11-02".to_string()),
            first_discussion_date: Some("2026-10-26".to_string()),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::DiscussionBeforeVoting);
    }

    #[test]
    fn test_discussion_on_voting_day_is_rejected() {
        let config = FileScheduleConfig {
            first_voting_date: Some("2026-10-19".to_string()),
            first_discussion_date: Some("2026-11-02".to_string()),
            interval_days: 14,
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_fatal());
        assert!(matches!(issues[0].code, ConfigIssueCode::Inconsistent { .. }));

        let same_day = FileScheduleConfig {
            first_discussion_date: Some("2026-10-19".to_string()),
            ..config
        };
        assert!(same_day.validate().iter().any(ConfigIssue::is_fatal));
    }

    #[test]
    fn test_daily_interval_cannot_alternate() {
        let config = FileScheduleConfig {
            interval_days: 1,
            ..Default::default()
        };
        assert!(config.validate().iter().any(ConfigIssue::is_fatal));
    }
}
