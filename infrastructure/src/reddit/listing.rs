//! Parsing of Reddit API responses
//!
//! Pure functions from response JSON to domain values, kept apart from the
//! HTTP client so they can be tested against captured payloads.

use super::error::{RedditError, Result};
use chrono::DateTime;
use paperbot_domain::{InboxMessage, PlatformComment, ThreadHandle};
use serde::Deserialize;
use serde_json::Value;

/// Host prepended to the relative permalinks Reddit returns
pub const WEB_HOST: &str = "https://www.reddit.com";

#[derive(Deserialize)]
struct Thing {
    kind: String,
    data: Value,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Thing>,
}

#[derive(Deserialize)]
struct RawComment {
    id: String,
    author: Option<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    permalink: String,
    created_utc: f64,
}

#[derive(Deserialize)]
struct RawMessage {
    name: String,
    author: Option<String>,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    body: String,
}

/// Access token from a password-grant response
pub fn parse_token(value: &Value) -> Result<String> {
    if let Some(error) = value.get("error") {
        return Err(RedditError::Auth(error.to_string()));
    }
    value["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| RedditError::Auth("response has no access_token".to_string()))
}

/// Fail on the `json.errors` array `api_type=json` endpoints return
pub fn check_api_errors(value: &Value) -> Result<()> {
    match value["json"]["errors"].as_array() {
        Some(errors) if !errors.is_empty() => {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| match e.as_array() {
                    Some(parts) => parts
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(": "),
                    None => e.to_string(),
                })
                .collect();
            Err(RedditError::Api(messages.join("; ")))
        }
        _ => Ok(()),
    }
}

/// Thread created by `/api/submit`
pub fn parse_submit(value: &Value) -> Result<ThreadHandle> {
    check_api_errors(value)?;
    let data = &value["json"]["data"];
    let id = data["id"]
        .as_str()
        .ok_or_else(|| RedditError::Parse("submit response has no id".to_string()))?;
    let permalink = data["url"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{WEB_HOST}/comments/{id}"));
    Ok(ThreadHandle::new(id, permalink))
}

/// Top-level comments from a `/comments/{id}` response.
///
/// The response is a pair of listings, the submission and its comments.
/// "Load more" stubs are skipped; `[deleted]` authors become `None`.
pub fn parse_comments(value: &Value) -> Result<Vec<PlatformComment>> {
    let listing = value
        .as_array()
        .and_then(|pair| pair.get(1))
        .ok_or_else(|| RedditError::Parse("expected [submission, comments] pair".to_string()))?;
    let listing: Listing = serde_json::from_value(listing.clone())?;

    listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == "t1")
        .map(|thing| -> Result<PlatformComment> {
            let raw: RawComment = serde_json::from_value(thing.data)?;
            let created = DateTime::from_timestamp(raw.created_utc as i64, 0).ok_or_else(|| {
                RedditError::Parse(format!("invalid created_utc on comment {}", raw.id))
            })?;
            Ok(PlatformComment {
                author: raw.author.filter(|a| a != "[deleted]" && !a.is_empty()),
                permalink: absolute(&raw.permalink),
                id: raw.id,
                body: raw.body,
                score: raw.score,
                created,
            })
        })
        .collect()
}

/// Unread private messages; the id is the fullname `read_message` expects
pub fn parse_inbox(value: &Value) -> Result<Vec<InboxMessage>> {
    let listing: Listing = serde_json::from_value(value.clone())?;
    listing
        .data
        .children
        .into_iter()
        .map(|thing| -> Result<InboxMessage> {
            let raw: RawMessage = serde_json::from_value(thing.data)?;
            Ok(InboxMessage {
                id: raw.name,
                sender: raw.author.filter(|a| a != "[deleted]" && !a.is_empty()),
                subject: raw.subject,
                body: raw.body,
            })
        })
        .collect()
}

/// Markdown content of a wiki page
pub fn parse_wiki_page(value: &Value) -> Result<String> {
    value["data"]["content_md"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| RedditError::Parse("wiki response has no content_md".to_string()))
}

fn absolute(permalink: &str) -> String {
    if permalink.starts_with('/') {
        format!("{WEB_HOST}{permalink}")
    } else {
        permalink.to_string()
    }
}
