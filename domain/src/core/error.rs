//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Paper title cannot be empty")]
    EmptyTitle,

    #[error("Paper '{title}' was already discussed at {discussion_ref}")]
    AlreadyDiscussed {
        title: String,
        discussion_ref: String,
    },

    #[error("Round interval must be at least one day, got {0}")]
    InvalidInterval(i64),
}

impl DomainError {
    /// Check if this error is the registry's "already discussed" conflict
    pub fn is_already_discussed(&self) -> bool {
        matches!(self, DomainError::AlreadyDiscussed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_discussed_display() {
        let error = DomainError::AlreadyDiscussed {
            title: "Dummy paper".to_string(),
            discussion_ref: "/r/cspapers/comments/abc".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Paper 'Dummy paper' was already discussed at /r/cspapers/comments/abc"
        );
    }

    #[test]
    fn test_is_already_discussed_check() {
        assert!(
            DomainError::AlreadyDiscussed {
                title: "x".to_string(),
                discussion_ref: "y".to_string(),
            }
            .is_already_discussed()
        );
        assert!(!DomainError::EmptyTitle.is_already_discussed());
        assert!(!DomainError::InvalidInterval(0).is_already_discussed());
    }
}
