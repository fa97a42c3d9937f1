//! Reddit API client
//!
//! Implements [`PlatformClient`] over Reddit's OAuth API with the
//! script-app password grant. Requests are sent one at a time; a `429`
//! response is retried once after the advertised reset delay.

use super::error::{RedditError, Result};
use super::listing;
use async_trait::async_trait;
use paperbot_application::{Credentials, PlatformClient, PlatformError};
use paperbot_domain::{InboxMessage, PlatformComment, ThreadHandle};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, warn};

const AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_URL: &str = "https://oauth.reddit.com";

/// Request timeout for every API call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest wait honoured when rate limited
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(60);

/// Comments fetched per voting thread
const COMMENT_LIMIT: u32 = 500;

#[derive(Clone)]
struct Session {
    token: String,
    user_agent: String,
}

/// Reddit adapter for the platform port
pub struct RedditClient {
    http: Client,
    auth_url: String,
    api_url: String,
    session: Mutex<Option<Session>>,
}

impl RedditClient {
    pub fn new() -> Result<Self> {
        Self::with_urls(AUTH_URL, API_URL)
    }

    /// Client against other endpoints (e.g. a local test server)
    pub fn with_urls(auth_url: impl Into<String>, api_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            auth_url: auth_url.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            session: Mutex::new(None),
        })
    }

    fn session(&self) -> Result<Session> {
        self.session
            .lock()
            .ok()
            .and_then(|s| s.clone())
            .ok_or(RedditError::NotAuthenticated)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let session = self.session()?;
        let request = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(&session.token)
            .header(reqwest::header::USER_AGENT, &session.user_agent)
            .query(query);
        self.send(request).await
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        let session = self.session()?;
        let request = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(&session.token)
            .header(reqwest::header::USER_AGENT, &session.user_agent)
            .form(form);
        let value = self.send(request).await?;
        listing::check_api_errors(&value)?;
        Ok(value)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let retry = request.try_clone();
        let mut response = request.send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS
            && let Some(retry) = retry
        {
            let wait = rate_limit_reset(&response).min(MAX_RATE_LIMIT_WAIT);
            warn!("Rate limited by Reddit, retrying in {}s", wait.as_secs());
            tokio::time::sleep(wait).await;
            response = retry.send().await?;
        }

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RedditError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn rate_limit_reset(response: &reqwest::Response) -> Duration {
    response
        .headers()
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map(|secs| Duration::from_secs_f64(secs.max(1.0)))
        .unwrap_or(Duration::from_secs(1))
}

fn fullname(kind: &str, id: &str) -> String {
    if id.contains('_') {
        id.to_string()
    } else {
        format!("{kind}_{id}")
    }
}

#[async_trait]
impl PlatformClient for RedditClient {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> std::result::Result<(), PlatformError> {
        let response = self
            .http
            .post(&self.auth_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header(reqwest::header::USER_AGENT, &credentials.user_agent)
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(RedditError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(RedditError::from)?;
        if !status.is_success() {
            return Err(RedditError::Auth(format!("HTTP {}: {}", status.as_u16(), body)).into());
        }
        let value: Value = serde_json::from_str(&body).map_err(RedditError::from)?;
        let token = listing::parse_token(&value)?;

        if let Ok(mut session) = self.session.lock() {
            *session = Some(Session {
                token,
                user_agent: credentials.user_agent.clone(),
            });
        }
        info!("Authenticated as /u/{}", credentials.username);
        Ok(())
    }

    async fn create_thread(
        &self,
        destination: &str,
        title: &str,
        body: &str,
    ) -> std::result::Result<ThreadHandle, PlatformError> {
        let value = self
            .post(
                "/api/submit",
                &[
                    ("api_type", "json"),
                    ("kind", "self"),
                    ("sr", destination),
                    ("title", title),
                    ("text", body),
                    ("resubmit", "true"),
                ],
            )
            .await?;
        let handle = listing::parse_submit(&value)?;
        debug!("Submitted thread {} to /r/{}", handle.id, destination);
        Ok(handle)
    }

    async fn set_pinned(
        &self,
        thread: &ThreadHandle,
        pinned: bool,
    ) -> std::result::Result<(), PlatformError> {
        let id = fullname("t3", &thread.id);
        self.post(
            "/api/set_subreddit_sticky",
            &[
                ("api_type", "json"),
                ("id", id.as_str()),
                ("state", if pinned { "true" } else { "false" }),
            ],
        )
        .await?;
        Ok(())
    }

    async fn set_approval_ranked_ordering(
        &self,
        thread: &ThreadHandle,
        enabled: bool,
    ) -> std::result::Result<(), PlatformError> {
        let id = fullname("t3", &thread.id);
        self.post(
            "/api/set_contest_mode",
            &[
                ("api_type", "json"),
                ("id", id.as_str()),
                ("state", if enabled { "true" } else { "false" }),
            ],
        )
        .await?;
        Ok(())
    }

    async fn get_thread_comments(
        &self,
        thread_id: &str,
    ) -> std::result::Result<Vec<PlatformComment>, PlatformError> {
        let id = thread_id.trim_start_matches("t3_");
        let limit = COMMENT_LIMIT.to_string();
        let value = self
            .get(
                &format!("/comments/{id}"),
                &[
                    ("depth", "1"),
                    ("limit", limit.as_str()),
                    ("sort", "old"),
                    ("raw_json", "1"),
                ],
            )
            .await?;
        let comments = listing::parse_comments(&value)?;
        debug!("Fetched {} comment(s) from {}", comments.len(), id);
        Ok(comments)
    }

    async fn reply_to_comment(
        &self,
        comment_id: &str,
        body: &str,
    ) -> std::result::Result<(), PlatformError> {
        let thing_id = fullname("t1", comment_id);
        self.post(
            "/api/comment",
            &[("api_type", "json"), ("thing_id", thing_id.as_str()), ("text", body)],
        )
        .await?;
        Ok(())
    }

    async fn get_unread_messages(&self) -> std::result::Result<Vec<InboxMessage>, PlatformError> {
        let value = self
            .get("/message/unread", &[("limit", "100"), ("raw_json", "1")])
            .await?;
        Ok(listing::parse_inbox(&value)?)
    }

    async fn mark_message_read(&self, message_id: &str) -> std::result::Result<(), PlatformError> {
        let id = fullname("t4", message_id);
        self.post("/api/read_message", &[("id", id.as_str())]).await?;
        Ok(())
    }

    async fn send_direct_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> std::result::Result<(), PlatformError> {
        self.post(
            "/api/compose",
            &[
                ("api_type", "json"),
                ("to", recipient),
                ("subject", subject),
                ("text", body),
            ],
        )
        .await?;
        Ok(())
    }

    async fn edit_page(
        &self,
        destination: &str,
        page: &str,
        content: &str,
    ) -> std::result::Result<(), PlatformError> {
        self.post(
            &format!("/r/{destination}/api/wiki/edit"),
            &[
                ("page", page),
                ("content", content),
                ("reason", "paperbot: new discussion"),
            ],
        )
        .await?;
        Ok(())
    }

    async fn get_page(
        &self,
        destination: &str,
        page: &str,
    ) -> std::result::Result<Option<String>, PlatformError> {
        match self
            .get(&format!("/r/{destination}/wiki/{page}"), &[("raw_json", "1")])
            .await
        {
            Ok(value) => Ok(Some(listing::parse_wiki_page(&value)?)),
            Err(RedditError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullname() {
        assert_eq!(fullname("t3", "1abcd"), "t3_1abcd");
        assert_eq!(fullname("t4", "t4_m1"), "t4_m1");
    }

    #[tokio::test]
    async fn test_calls_require_authentication() {
        let client =
            RedditClient::with_urls("http://127.0.0.1:9/token", "http://127.0.0.1:9").unwrap();
        let err = client.get_unread_messages().await.unwrap_err();
        assert!(matches!(err, PlatformError::NotAuthenticated));
    }
}
