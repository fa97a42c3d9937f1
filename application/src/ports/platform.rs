//! Discussion platform port
//!
//! Defines the interface for talking to the forum the community lives on.
//! The bot only ever awaits one call at a time; retries and rate limiting
//! are the adapter's concern.

use async_trait::async_trait;
use paperbot_domain::{InboxMessage, PlatformComment, ThreadHandle};
use thiserror::Error;

/// Errors that can occur during platform operations
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timeout")]
    Timeout,
}

/// Account credentials handed to [`PlatformClient::authenticate`]
#[derive(Clone, Default)]
pub struct Credentials {
    pub user_agent: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_agent", &self.user_agent)
            .field("username", &self.username)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Gateway to the discussion platform
///
/// `destination` is the community (subreddit) threads and pages live in.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), PlatformError>;

    async fn create_thread(
        &self,
        destination: &str,
        title: &str,
        body: &str,
    ) -> Result<ThreadHandle, PlatformError>;

    /// Pin or unpin a thread at the top of the community
    async fn set_pinned(&self, thread: &ThreadHandle, pinned: bool) -> Result<(), PlatformError>;

    /// Switch contest-style, approval-ranked comment ordering on or off
    async fn set_approval_ranked_ordering(
        &self,
        thread: &ThreadHandle,
        enabled: bool,
    ) -> Result<(), PlatformError>;

    /// Top-level comments of a thread, in platform order
    async fn get_thread_comments(&self, thread_id: &str)
    -> Result<Vec<PlatformComment>, PlatformError>;

    async fn reply_to_comment(&self, comment_id: &str, body: &str) -> Result<(), PlatformError>;

    async fn get_unread_messages(&self) -> Result<Vec<InboxMessage>, PlatformError>;

    async fn mark_message_read(&self, message_id: &str) -> Result<(), PlatformError>;

    async fn send_direct_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), PlatformError>;

    async fn edit_page(
        &self,
        destination: &str,
        page: &str,
        content: &str,
    ) -> Result<(), PlatformError>;

    /// Current page content, `None` if the page does not exist yet
    async fn get_page(&self, destination: &str, page: &str)
    -> Result<Option<String>, PlatformError>;
}
