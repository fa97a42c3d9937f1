//! Template configuration from TOML (`[templates]` section)

use paperbot_domain::{ConfigIssue, ConfigIssueCode, MessageTemplate};
use serde::{Deserialize, Serialize};

/// Thread titles and bodies.
///
/// Placeholders: `{round}` and `{date}` in the voting title, `{round}` and
/// `{closes}` in the voting body, `{title}` and `{round}` in the discussion
/// title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTemplatesConfig {
    pub voting_title: String,
    pub voting_body: String,
    pub discussion_title: String,
}

impl Default for FileTemplatesConfig {
    fn default() -> Self {
        Self {
            voting_title: MessageTemplate::DEFAULT_VOTING_TITLE.to_string(),
            voting_body: MessageTemplate::DEFAULT_VOTING_BODY.to_string(),
            discussion_title: MessageTemplate::DEFAULT_DISCUSSION_TITLE.to_string(),
        }
    }
}

impl FileTemplatesConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("templates.voting_title", &self.voting_title),
            ("templates.voting_body", &self.voting_body),
            ("templates.discussion_title", &self.discussion_title),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingField {
                        field: field.to_string(),
                    },
                    format!("{field} must not be empty"),
                ));
            }
        }
        if !self.discussion_title.contains("{title}") {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::Inconsistent {
                    detail: "templates.discussion_title has no {title} placeholder".to_string(),
                },
                "templates.discussion_title does not name the paper; every discussion \
                 thread will have the same title",
            ));
        }
        issues
    }
}
