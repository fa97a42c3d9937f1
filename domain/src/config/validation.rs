//! Configuration issues reported by config validation.
//!
//! Loaders collect every problem they find instead of stopping at the first
//! one, so a maintainer sees the complete list in a single run.
//!
//! # Examples
//!
//! ```
//! use paperbot_domain::config::validation::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issue = ConfigIssue::error(
//!     ConfigIssueCode::MissingField { field: "account.username".to_string() },
//!     "account.username must be set",
//! );
//! assert!(issue.is_fatal());
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the bot cannot start with this configuration.
    Error,
    /// Non-fatal: the bot runs but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required value is empty.
    MissingField { field: String },
    /// A value could not be parsed or is out of range.
    InvalidValue { field: String, value: String },
    /// Discussion would open before the first voting round closes.
    DiscussionBeforeVoting,
    /// Settings that work on their own but conflict with each other.
    Inconsistent { detail: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Whether this issue must abort startup
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
    }
}
