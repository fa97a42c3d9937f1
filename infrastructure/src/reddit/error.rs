//! Error types for the Reddit adapter

use paperbot_application::PlatformError;
use thiserror::Error;

/// Result type alias for Reddit operations
pub type Result<T> = std::result::Result<T, RedditError>;

/// Errors that can occur when talking to the Reddit API
#[derive(Error, Debug)]
pub enum RedditError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Reddit API error: {0}")]
    Api(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not authenticated")]
    NotAuthenticated,
}

impl From<serde_json::Error> for RedditError {
    fn from(e: serde_json::Error) -> Self {
        RedditError::Parse(e.to_string())
    }
}

impl From<RedditError> for PlatformError {
    fn from(e: RedditError) -> Self {
        match e {
            RedditError::Http(e) if e.is_timeout() => PlatformError::Timeout,
            RedditError::Http(e) => PlatformError::RequestFailed(e.to_string()),
            RedditError::Status { status: 404, body } => PlatformError::NotFound(body),
            e @ (RedditError::Status { .. } | RedditError::Api(_)) => {
                PlatformError::RequestFailed(e.to_string())
            }
            RedditError::Parse(msg) => PlatformError::UnexpectedResponse(msg),
            RedditError::Auth(msg) => PlatformError::AuthenticationFailed(msg),
            RedditError::NotAuthenticated => PlatformError::NotAuthenticated,
        }
    }
}
