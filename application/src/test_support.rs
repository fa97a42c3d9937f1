//! Test doubles for the application ports

use crate::ports::event_logger::{RoundEvent, RoundEventLogger};
use crate::ports::platform::{Credentials, PlatformClient, PlatformError};
use crate::ports::record_store::{Collection, RecordStore, StoreError};
use async_trait::async_trait;
use chrono::DateTime;
use paperbot_domain::{InboxMessage, PlatformComment, ThreadHandle};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

/// Every call the code under test made, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateThread { title: String, body: String },
    SetPinned { thread_id: String, pinned: bool },
    SetOrdering { thread_id: String, enabled: bool },
    GetComments { thread_id: String },
    Reply { comment_id: String, body: String },
    MarkRead { message_id: String },
    DirectMessage { recipient: String, subject: String, body: String },
    EditPage { page: String, content: String },
}

#[derive(Default)]
pub struct MockPlatform {
    pub comments: Mutex<HashMap<String, Vec<PlatformComment>>>,
    pub inbox: Mutex<Vec<InboxMessage>>,
    pub pages: Mutex<HashMap<String, String>>,
    pub fail_comments: Mutex<bool>,
    pub fail_create: Mutex<bool>,
    pub fail_inbox: Mutex<bool>,
    pub fail_replies: Mutex<bool>,
    pub failing_recipients: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
    threads_created: Mutex<u32>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(self, thread_id: &str, comments: Vec<PlatformComment>) -> Self {
        self.comments
            .lock()
            .unwrap()
            .insert(thread_id.to_string(), comments);
        self
    }

    pub fn with_inbox(self, messages: Vec<InboxMessage>) -> Self {
        *self.inbox.lock().unwrap() = messages;
        self
    }

    pub fn failing_comments(self) -> Self {
        *self.fail_comments.lock().unwrap() = true;
        self
    }

    pub fn failing_create(self) -> Self {
        *self.fail_create.lock().unwrap() = true;
        self
    }

    pub fn failing_replies(self) -> Self {
        *self.fail_replies.lock().unwrap() = true;
        self
    }

    pub fn failing_recipient(self, recipient: &str) -> Self {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(recipient.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_threads(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateThread { title, body } => Some((title, body)),
                _ => None,
            })
            .collect()
    }

    pub fn direct_messages(&self) -> Vec<(String, String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::DirectMessage {
                    recipient,
                    subject,
                    body,
                } => Some((recipient, subject, body)),
                _ => None,
            })
            .collect()
    }

    pub fn replies(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Reply { comment_id, body } => Some((comment_id, body)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<(), PlatformError> {
        Ok(())
    }

    async fn create_thread(
        &self,
        _destination: &str,
        title: &str,
        body: &str,
    ) -> Result<ThreadHandle, PlatformError> {
        self.record(Call::CreateThread {
            title: title.to_string(),
            body: body.to_string(),
        });
        if *self.fail_create.lock().unwrap() {
            return Err(PlatformError::RequestFailed("submit rejected".to_string()));
        }
        let mut count = self.threads_created.lock().unwrap();
        *count += 1;
        Ok(ThreadHandle::new(
            format!("t{count}"),
            format!("https://reddit.com/r/cspapers/comments/t{count}"),
        ))
    }

    async fn set_pinned(&self, thread: &ThreadHandle, pinned: bool) -> Result<(), PlatformError> {
        self.record(Call::SetPinned {
            thread_id: thread.id.clone(),
            pinned,
        });
        Ok(())
    }

    async fn set_approval_ranked_ordering(
        &self,
        thread: &ThreadHandle,
        enabled: bool,
    ) -> Result<(), PlatformError> {
        self.record(Call::SetOrdering {
            thread_id: thread.id.clone(),
            enabled,
        });
        Ok(())
    }

    async fn get_thread_comments(
        &self,
        thread_id: &str,
    ) -> Result<Vec<PlatformComment>, PlatformError> {
        self.record(Call::GetComments {
            thread_id: thread_id.to_string(),
        });
        if *self.fail_comments.lock().unwrap() {
            return Err(PlatformError::Timeout);
        }
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(thread_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn reply_to_comment(&self, comment_id: &str, body: &str) -> Result<(), PlatformError> {
        self.record(Call::Reply {
            comment_id: comment_id.to_string(),
            body: body.to_string(),
        });
        if *self.fail_replies.lock().unwrap() {
            return Err(PlatformError::RequestFailed("comment rejected".to_string()));
        }
        Ok(())
    }

    async fn get_unread_messages(&self) -> Result<Vec<InboxMessage>, PlatformError> {
        if *self.fail_inbox.lock().unwrap() {
            return Err(PlatformError::Timeout);
        }
        Ok(self.inbox.lock().unwrap().clone())
    }

    async fn mark_message_read(&self, message_id: &str) -> Result<(), PlatformError> {
        self.record(Call::MarkRead {
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    async fn send_direct_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), PlatformError> {
        self.record(Call::DirectMessage {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        if self.failing_recipients.lock().unwrap().contains(recipient) {
            return Err(PlatformError::NotFound(format!("user {recipient}")));
        }
        Ok(())
    }

    async fn edit_page(
        &self,
        _destination: &str,
        page: &str,
        content: &str,
    ) -> Result<(), PlatformError> {
        self.record(Call::EditPage {
            page: page.to_string(),
            content: content.to_string(),
        });
        self.pages
            .lock()
            .unwrap()
            .insert(page.to_string(), content.to_string());
        Ok(())
    }

    async fn get_page(
        &self,
        _destination: &str,
        page: &str,
    ) -> Result<Option<String>, PlatformError> {
        Ok(self.pages.lock().unwrap().get(page).cloned())
    }
}

/// In-memory record store
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<(&'static str, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&(collection.as_str(), key.to_string()))
            .cloned())
    }

    fn put(&self, collection: Collection, key: &str, record: Value) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert((collection.as_str(), key.to_string()), record);
        Ok(())
    }

    fn keys(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .keys()
            .filter(|(c, _)| *c == collection.as_str())
            .map(|(_, key)| key.clone())
            .collect())
    }

    fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Event logger that keeps event types in memory
#[derive(Default)]
pub struct RecordingEventLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingEventLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl RoundEventLogger for RecordingEventLogger {
    fn log(&self, event: RoundEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}

/// A comment posted `offset` seconds after a fixed base time
pub fn comment(
    id: &str,
    author: Option<&str>,
    score: i64,
    offset: i64,
    body: &str,
) -> PlatformComment {
    PlatformComment {
        id: id.to_string(),
        author: author.map(str::to_string),
        body: body.to_string(),
        score,
        permalink: format!("https://reddit.com/r/cspapers/comments/t1/_/{id}"),
        created: DateTime::from_timestamp(1_760_000_000 + offset, 0).unwrap(),
    }
}

/// A well-formed nomination body for `title`
pub fn nomination_body(title: &str) -> String {
    format!(
        "**Title:** {title}\n**Authors:** Dummy Author Sr., Dummy Author Jr.\n\
         **Link:** https://link.to/{}.pdf\n**Abstract:** Short abstract of {title}",
        title.to_lowercase().replace(' ', "-")
    )
}

pub fn message(id: &str, sender: Option<&str>, subject: &str, body: &str) -> InboxMessage {
    InboxMessage {
        id: id.to_string(),
        sender: sender.map(str::to_string),
        subject: subject.to_string(),
        body: body.to_string(),
    }
}
