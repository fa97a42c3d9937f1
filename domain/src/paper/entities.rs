//! Persisted registry records

use super::title::{NormalizedTitle, normalize_title};
use crate::core::error::DomainError;
use crate::nomination::candidate::Candidate;
use serde::{Deserialize, Serialize};

/// The platform context of one nominating comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nomination {
    /// Platform id of the comment; the dedup key for counting
    pub comment_id: String,
    /// Username of the comment author
    pub submitter: String,
    /// Approval score of the comment at fetch time
    pub karma: i64,
    /// Permalink of the comment
    pub permalink: String,
    /// Round the comment was posted in
    pub round: u32,
}

/// A proposed work, deduplicated by normalized title
///
/// # Example
///
/// ```
/// use paperbot_domain::{Candidate, Nomination, Paper};
///
/// let candidate = Candidate::new(
///     "Dummy paper 01",
///     vec!["Dummy Author Sr.".to_string()],
///     "https://link.to/a/dummy/paper.pdf",
///     "Very short abstract",
/// );
/// let nomination = Nomination {
///     comment_id: "c1".to_string(),
///     submitter: "alice".to_string(),
///     karma: 4,
///     permalink: "/r/cspapers/comments/t1/_/c1".to_string(),
///     round: 1,
/// };
/// let paper = Paper::from_nomination(candidate, &nomination);
/// assert_eq!(paper.proposal_count, 1);
/// assert!(!paper.is_discussed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub authors: Vec<String>,
    pub link: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub proposal_count: u32,
    /// Unique usernames, in the order they first nominated
    pub submitters: Vec<String>,
    pub discussion_ref: Option<String>,
    pub karma: i64,
    pub last_submitter: String,
    pub last_submission_link: String,
    /// Comment ids already counted (or acknowledged, once discussed)
    #[serde(default)]
    pub nomination_ids: Vec<String>,
    /// Round of the most recent nomination
    #[serde(default)]
    pub round: u32,
}

impl Paper {
    /// Promote a first-time nomination to a paper
    pub fn from_nomination(candidate: Candidate, nomination: &Nomination) -> Self {
        Self {
            title: candidate.title.trim().to_string(),
            authors: candidate.authors,
            link: candidate.link,
            abstract_text: candidate.abstract_text,
            proposal_count: 1,
            submitters: vec![nomination.submitter.clone()],
            discussion_ref: None,
            karma: nomination.karma,
            last_submitter: nomination.submitter.clone(),
            last_submission_link: nomination.permalink.clone(),
            nomination_ids: vec![nomination.comment_id.clone()],
            round: nomination.round,
        }
    }

    /// Registry key of this paper
    pub fn key(&self) -> Result<NormalizedTitle, DomainError> {
        NormalizedTitle::new(&self.title)
    }

    pub fn is_discussed(&self) -> bool {
        self.discussion_ref.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// Whether this comment was already counted for the paper
    pub fn has_counted(&self, comment_id: &str) -> bool {
        self.nomination_ids.iter().any(|id| id == comment_id)
    }

    /// Merge a re-nomination into this paper.
    ///
    /// Returns `Ok(true)` when the comment was counted for the first time.
    /// Karma and the last-submitter fields always take the new comment's
    /// values. Fails with [`DomainError::AlreadyDiscussed`] without touching
    /// anything when the paper already has a discussion.
    pub fn record_nomination(&mut self, nomination: &Nomination) -> Result<bool, DomainError> {
        if let Some(discussion_ref) = self.discussion_ref.as_ref().filter(|r| !r.is_empty()) {
            return Err(DomainError::AlreadyDiscussed {
                title: self.title.clone(),
                discussion_ref: discussion_ref.clone(),
            });
        }

        let counted = !self.has_counted(&nomination.comment_id);
        if counted {
            self.proposal_count += 1;
            self.nomination_ids.push(nomination.comment_id.clone());
        }
        if !self.submitters.contains(&nomination.submitter) {
            self.submitters.push(nomination.submitter.clone());
        }
        self.karma = nomination.karma;
        self.last_submitter = nomination.submitter.clone();
        self.last_submission_link = nomination.permalink.clone();
        self.round = nomination.round;
        Ok(counted)
    }

    /// Remember a comment that re-nominated an already discussed paper.
    ///
    /// Returns `true` the first time a comment is seen, so the nominator is
    /// answered once even if the same thread is ranked again.
    pub fn acknowledge(&mut self, comment_id: &str) -> bool {
        if self.has_counted(comment_id) {
            return false;
        }
        self.nomination_ids.push(comment_id.to_string());
        true
    }

    /// Attach the discussion thread; a paper is discussed at most once
    pub fn mark_discussed(&mut self, discussion_ref: impl Into<String>) -> Result<(), DomainError> {
        if let Some(existing) = self.discussion_ref.as_ref().filter(|r| !r.is_empty()) {
            return Err(DomainError::AlreadyDiscussed {
                title: self.title.clone(),
                discussion_ref: existing.clone(),
            });
        }
        self.discussion_ref = Some(discussion_ref.into());
        Ok(())
    }
}

/// An author appearing on one or more nominated papers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    /// Titles this author appears on, unique, in nomination order
    pub papers: Vec<String>,
    pub homepage: Option<String>,
    pub cv: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            papers: Vec::new(),
            homepage: None,
            cv: None,
        }
    }

    /// Registry key of this author
    pub fn key(&self) -> String {
        normalize_title(&self.name)
    }

    /// Add a title; returns `false` if it was already listed
    pub fn add_paper(&mut self, title: &str) -> bool {
        let key = normalize_title(title);
        if self.papers.iter().any(|p| normalize_title(p) == key) {
            return false;
        }
        self.papers.push(title.to_string());
        true
    }
}

/// A community member who nominated papers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    pub name: String,
    /// Distinct nominating comments
    pub submissions: u32,
    /// Titles of this member's nominations that were picked for discussion
    pub discussed_submissions: Vec<String>,
}

impl Submitter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            submissions: 0,
            discussed_submissions: Vec::new(),
        }
    }

    pub fn record_submission(&mut self) {
        self.submissions += 1;
    }

    pub fn record_discussed(&mut self, title: &str) {
        if !self.discussed_submissions.iter().any(|t| t == title) {
            self.discussed_submissions.push(title.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str) -> Candidate {
        Candidate::new(
            title,
            vec!["Dummy Author Sr.".to_string(), "Dummy Author Jr.".to_string()],
            "https://link.to/a/dummy/paper.pdf",
            "Very short and undescriptive abstract",
        )
    }

    fn nomination(comment_id: &str, submitter: &str, karma: i64) -> Nomination {
        Nomination {
            comment_id: comment_id.to_string(),
            submitter: submitter.to_string(),
            karma,
            permalink: format!("/r/cspapers/comments/t1/_/{comment_id}"),
            round: 3,
        }
    }

    #[test]
    fn test_new_paper_fields() {
        let paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 5));
        assert_eq!(paper.proposal_count, 1);
        assert_eq!(paper.submitters, vec!["alice"]);
        assert_eq!(paper.karma, 5);
        assert_eq!(paper.last_submitter, "alice");
        assert_eq!(paper.last_submission_link, "/r/cspapers/comments/t1/_/c1");
        assert_eq!(paper.discussion_ref, None);
        assert_eq!(paper.round, 3);
    }

    #[test]
    fn test_two_users_renominate() {
        let mut paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 5));
        assert!(paper.record_nomination(&nomination("c2", "bob", 3)).unwrap());

        assert_eq!(paper.proposal_count, 2);
        assert_eq!(paper.submitters, vec!["alice", "bob"]);
    }

    #[test]
    fn test_same_user_twice_keeps_one_submitter() {
        let mut paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 5));
        paper.record_nomination(&nomination("c2", "alice", 8)).unwrap();

        assert_eq!(paper.proposal_count, 2);
        assert_eq!(paper.submitters.len(), 1);
    }

    #[test]
    fn test_most_recent_wins_even_if_lower() {
        let mut paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 9));
        paper.record_nomination(&nomination("c2", "bob", -2)).unwrap();

        assert_eq!(paper.karma, -2);
        assert_eq!(paper.last_submitter, "bob");
        assert_eq!(paper.last_submission_link, "/r/cspapers/comments/t1/_/c2");
    }

    #[test]
    fn test_same_comment_not_counted_twice() {
        let mut paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 5));
        assert!(!paper.record_nomination(&nomination("c1", "alice", 6)).unwrap());

        assert_eq!(paper.proposal_count, 1);
        assert_eq!(paper.karma, 6);
    }

    #[test]
    fn test_discussed_paper_rejects_renomination() {
        let mut paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 5));
        paper.mark_discussed("/r/cspapers/comments/d1").unwrap();
        let before = paper.clone();

        let err = paper.record_nomination(&nomination("c9", "bob", 1)).unwrap_err();
        assert!(err.is_already_discussed());
        assert_eq!(paper, before);
    }

    #[test]
    fn test_discussion_ref_is_immutable() {
        let mut paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 5));
        paper.mark_discussed("/r/cspapers/comments/d1").unwrap();
        assert!(paper.mark_discussed("/r/cspapers/comments/d2").is_err());
        assert_eq!(paper.discussion_ref.as_deref(), Some("/r/cspapers/comments/d1"));
    }

    #[test]
    fn test_acknowledge_once() {
        let mut paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 5));
        assert!(paper.acknowledge("c7"));
        assert!(!paper.acknowledge("c7"));
    }

    #[test]
    fn test_abstract_serialized_under_its_name() {
        let paper =
            Paper::from_nomination(candidate("Dummy paper 01"), &nomination("c1", "alice", 5));
        let value = serde_json::to_value(&paper).unwrap();
        assert!(value.get("abstract").is_some());
        assert!(value.get("abstract_text").is_none());
    }

    #[test]
    fn test_author_add_paper_dedups_by_title() {
        let mut author = Author::new("Paul Paper-Leecher");
        assert!(author.add_paper("Dummy paper 01"));
        assert!(!author.add_paper("dummy  PAPER 01"));
        assert_eq!(author.papers.len(), 1);
        assert_eq!(author.key(), "paul paper-leecher");
    }

    #[test]
    fn test_submitter_records() {
        let mut user = Submitter::new("cspaperbot");
        user.record_submission();
        user.record_discussed("Dummy paper 01");
        user.record_discussed("Dummy paper 01");
        assert_eq!(user.submissions, 1);
        assert_eq!(user.discussed_submissions, vec!["Dummy paper 01"]);
    }
}
