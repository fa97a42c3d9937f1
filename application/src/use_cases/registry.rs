//! Paper registry
//!
//! Deduplicates nominations by normalized title and keeps the `authors` and
//! `users` collections in step with the papers they reference.

use crate::ports::record_store::{
    Collection, RecordStore, StoreError, get_record, put_record,
};
use paperbot_domain::{
    Author, Candidate, DomainError, Nomination, NormalizedTitle, Paper, Submitter,
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Paper not found: {0}")]
    NotFound(String),
}

/// What an upsert did to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// First nomination of this title
    Created(Paper),
    /// Re-nomination; `counted` is false when this comment was seen before
    Updated { paper: Paper, counted: bool },
    /// The paper was already discussed; `first_seen` is true until the
    /// comment has been acknowledged with [`PaperRegistry::acknowledge`]
    AlreadyDiscussed { paper: Paper, first_seen: bool },
}

impl UpsertOutcome {
    pub fn paper(&self) -> &Paper {
        match self {
            UpsertOutcome::Created(paper)
            | UpsertOutcome::Updated { paper, .. }
            | UpsertOutcome::AlreadyDiscussed { paper, .. } => paper,
        }
    }
}

/// Registry over a [`RecordStore`]
pub struct PaperRegistry<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> PaperRegistry<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    pub fn find_by_title(&self, title: &str) -> Result<Option<Paper>, RegistryError> {
        let key = NormalizedTitle::new(title)?;
        Ok(get_record(self.store, Collection::Papers, key.as_str())?)
    }

    pub fn find_author(&self, name: &str) -> Result<Option<Author>, RegistryError> {
        let key = Author::new(name).key();
        Ok(get_record(self.store, Collection::Authors, &key)?)
    }

    pub fn find_submitter(&self, name: &str) -> Result<Option<Submitter>, RegistryError> {
        Ok(get_record(self.store, Collection::Users, name)?)
    }

    /// Insert a first-time nomination or merge a repeated one.
    ///
    /// A paper that was already discussed is left untouched; the caller
    /// acknowledges the comment once the nominator has been answered.
    pub fn upsert(
        &self,
        candidate: Candidate,
        nomination: &Nomination,
    ) -> Result<UpsertOutcome, RegistryError> {
        let key = candidate.key().ok_or(DomainError::EmptyTitle)?;

        let Some(mut paper) = get_record::<Paper>(self.store, Collection::Papers, key.as_str())?
        else {
            let paper = Paper::from_nomination(candidate, nomination);
            put_record(self.store, Collection::Papers, key.as_str(), &paper)?;
            self.record_contributors(&paper, &nomination.submitter)?;
            debug!("Registered new paper '{}'", paper.title);
            return Ok(UpsertOutcome::Created(paper));
        };

        match paper.record_nomination(nomination) {
            Ok(counted) => {
                put_record(self.store, Collection::Papers, key.as_str(), &paper)?;
                if counted {
                    self.record_contributors(&paper, &nomination.submitter)?;
                }
                debug!(
                    "Merged nomination {} into '{}' (counted: {})",
                    nomination.comment_id, paper.title, counted
                );
                Ok(UpsertOutcome::Updated { paper, counted })
            }
            Err(e) if e.is_already_discussed() => {
                let first_seen = !paper.has_counted(&nomination.comment_id);
                Ok(UpsertOutcome::AlreadyDiscussed { paper, first_seen })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remember that the nominator of `comment_id` was answered.
    ///
    /// Returns `false` when the comment was already acknowledged.
    pub fn acknowledge(&self, title: &str, comment_id: &str) -> Result<bool, RegistryError> {
        let key = NormalizedTitle::new(title)?;
        let mut paper: Paper = get_record(self.store, Collection::Papers, key.as_str())?
            .ok_or_else(|| RegistryError::NotFound(title.to_string()))?;

        let first_seen = paper.acknowledge(comment_id);
        if first_seen {
            put_record(self.store, Collection::Papers, key.as_str(), &paper)?;
        }
        Ok(first_seen)
    }

    /// Attach the discussion thread to a paper and credit its last submitter
    pub fn mark_discussed(
        &self,
        title: &str,
        discussion_ref: &str,
    ) -> Result<Paper, RegistryError> {
        let key = NormalizedTitle::new(title)?;
        let mut paper: Paper = get_record(self.store, Collection::Papers, key.as_str())?
            .ok_or_else(|| RegistryError::NotFound(title.to_string()))?;

        paper.mark_discussed(discussion_ref)?;
        put_record(self.store, Collection::Papers, key.as_str(), &paper)?;

        let mut submitter = self
            .find_submitter(&paper.last_submitter)?
            .unwrap_or_else(|| Submitter::new(paper.last_submitter.as_str()));
        submitter.record_discussed(&paper.title);
        put_record(self.store, Collection::Users, &submitter.name, &submitter)?;

        Ok(paper)
    }

    fn record_contributors(&self, paper: &Paper, submitter: &str) -> Result<(), RegistryError> {
        for name in &paper.authors {
            let mut author = self.find_author(name)?.unwrap_or_else(|| Author::new(name.as_str()));
            if author.add_paper(&paper.title) {
                put_record(self.store, Collection::Authors, &author.key(), &author)?;
            }
        }

        let mut user = self
            .find_submitter(submitter)?
            .unwrap_or_else(|| Submitter::new(submitter));
        user.record_submission();
        put_record(self.store, Collection::Users, submitter, &user)?;
        Ok(())
    }
}
