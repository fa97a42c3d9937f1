//! Account configuration from TOML (`[account]` section)

use paperbot_application::Credentials;
use paperbot_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Reddit script-app credentials.
///
/// Secrets are best supplied through the environment, e.g.
/// `PAPERBOT_ACCOUNT__PASSWORD`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAccountConfig {
    pub user_agent: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Default for FileAccountConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("paperbot/{}", env!("CARGO_PKG_VERSION")),
            username: String::new(),
            password: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

impl std::fmt::Debug for FileAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAccountConfig")
            .field("user_agent", &self.user_agent)
            .field("username", &self.username)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl FileAccountConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            user_agent: self.user_agent.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("account.user_agent", &self.user_agent),
            ("account.username", &self.username),
            ("account.password", &self.password),
            ("account.client_id", &self.client_id),
            ("account.client_secret", &self.client_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::MissingField {
                    field: field.to_string(),
                },
                format!("{field} must be set"),
            )
        })
        .collect()
    }
}
