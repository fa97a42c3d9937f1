//! Normalized title value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Normalize a title (or author name) into its registry key.
///
/// Trims, collapses whitespace runs to one space and lowercases, so
/// `"  Attention Is  All You Need"` and `"attention is all you need"` share a key.
pub fn normalize_title(title: &str) -> String {
    crate::core::string::collapse_whitespace(title).to_lowercase()
}

/// Registry key for a paper (Value Object)
///
/// The title is the only identity of a paper: two nominations are the same
/// paper exactly when their normalized titles are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedTitle(String);

impl NormalizedTitle {
    /// Normalize a raw title, rejecting titles that are empty after trimming
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let key = normalize_title(raw);
        if key.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NormalizedTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
