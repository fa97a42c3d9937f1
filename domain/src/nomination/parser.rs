//! Nomination text parsing.
//!
//! Members nominate papers by replying to the voting thread with a loosely
//! templated comment:
//!
//! ```text
//! **Title:** Attention Is All You Need
//! **Authors:** Ashish Vaswani, Noam Shazeer and Niki Parmar
//! **Link:** https://arxiv.org/abs/1706.03762
//! **Abstract:** The dominant sequence transduction models are based on ...
//! ```
//!
//! Label punctuation is free-form (colons, asterisks, dashes, spacing), but
//! all four fields must be present, in that order, for the nomination to be
//! accepted. Partial submissions are never filled in with defaults.
//!
//! | Input | Result |
//! |-------|--------|
//! | withdrawal or deletion marker | `Ok(Rejected(..))` |
//! | no `Title` line | `Ok(Rejected(NoTitle))` |
//! | `Title` but a later field missing | `Err(MissingField(..))` |
//! | all four fields | `Ok(Accepted(candidate))` |

use super::candidate::Candidate;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;

/// One labeled field of the nomination template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NominationField {
    Title,
    Authors,
    Link,
    Abstract,
}

impl NominationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NominationField::Title => "Title",
            NominationField::Authors => "Authors",
            NominationField::Link => "Link",
            NominationField::Abstract => "Abstract",
        }
    }
}

impl std::fmt::Display for NominationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a comment is not a nomination. Expected, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The nominator withdrew the submission
    Withdrawn,
    /// The comment was deleted or removed
    Deleted,
    /// No `Title` field; the comment is ordinary discussion
    NoTitle,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::Withdrawn => f.write_str("withdrawn"),
            RejectionReason::Deleted => f.write_str("deleted"),
            RejectionReason::NoTitle => f.write_str("no title"),
        }
    }
}

/// Outcome of parsing one comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Accepted(Candidate),
    Rejected(RejectionReason),
}

impl ParseOutcome {
    pub fn candidate(self) -> Option<Candidate> {
        match self {
            ParseOutcome::Accepted(candidate) => Some(candidate),
            ParseOutcome::Rejected(_) => None,
        }
    }
}

/// A comment that looks like a nomination but is incomplete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Nomination has a title but no usable {0} field")]
    MissingField(NominationField),
}

/// Strategy for turning comment text into a candidate
pub trait NominationParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<ParseOutcome, ParseError>;
}

static WITHDRAWN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)\[\s*withdrawn\s*\]|^[^\S\n]*[*_~]*withdrawn[*_~.!]*[^\S\n]*$")
        .expect("withdrawal pattern is valid")
});

static DELETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*(?:deleted|removed)\s*\]").expect("deletion pattern is valid")
});

static TITLE: LazyLock<Regex> = LazyLock::new(|| field_regex("title"));
static AUTHORS: LazyLock<Regex> = LazyLock::new(|| field_regex("authors?"));
static LINK: LazyLock<Regex> = LazyLock::new(|| field_regex("links?|url"));
static ABSTRACT: LazyLock<Regex> = LazyLock::new(|| field_regex("abstract"));

static URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>()\[\]"']+"#).expect("uri pattern is valid")
});

static AUTHOR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),|\band\b").expect("author separator pattern is valid"));

/// A labeled line: optional markdown decoration, the label, optional
/// separator punctuation, then the value up to the end of the line.
fn field_regex(label: &str) -> Regex {
    let pattern = format!(
        r"(?im)^[^\S\n]*[*_#>+~\[\-]*[^\S\n]*(?:{label})\b[*_\]]*[^\S\n]*[=:\-–—.|]*[*_]*[^\S\n]*(?P<value>[^\n]*)$"
    );
    Regex::new(&pattern).expect("field pattern is valid")
}

/// Strip markdown emphasis and whitespace around a captured value
fn clean_value(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '*' || c == '_').trim()
}

/// Regex-based parser for the nomination template
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexNominationParser;

impl RegexNominationParser {
    pub fn new() -> Self {
        Self
    }

    /// Find `field` at or after byte offset `from`.
    ///
    /// Returns the cleaned value and the offset where the match ends.
    fn field<'t>(field: NominationField, text: &'t str, from: usize) -> Option<(&'t str, usize)> {
        let regex = match field {
            NominationField::Title => &*TITLE,
            NominationField::Authors => &*AUTHORS,
            NominationField::Link => &*LINK,
            NominationField::Abstract => &*ABSTRACT,
        };
        let captures: Captures<'t> = regex.captures_at(text, from)?;
        let whole = captures.get(0)?;
        let value = clean_value(captures.name("value")?.as_str());
        Some((value, whole.end()))
    }

    /// Split an author list on commas and the word "and"
    pub fn split_authors(field: &str) -> Vec<String> {
        AUTHOR_SEPARATOR
            .split(field)
            .map(|name| clean_value(name).to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// First http(s) URI in the text, without trailing sentence punctuation
    pub fn extract_link(field: &str) -> Option<String> {
        URI.find(field).map(|m| {
            m.as_str()
                .trim_end_matches(['.', ',', ';', ':', '!', '?', '*'])
                .to_string()
        })
    }
}

impl NominationParser for RegexNominationParser {
    fn parse(&self, text: &str) -> Result<ParseOutcome, ParseError> {
        if WITHDRAWN.is_match(text) {
            return Ok(ParseOutcome::Rejected(RejectionReason::Withdrawn));
        }
        if DELETED.is_match(text) {
            return Ok(ParseOutcome::Rejected(RejectionReason::Deleted));
        }

        let Some((title, offset)) = Self::field(NominationField::Title, text, 0)
            .filter(|(title, _)| !title.is_empty())
        else {
            return Ok(ParseOutcome::Rejected(RejectionReason::NoTitle));
        };

        let (authors, offset) = Self::field(NominationField::Authors, text, offset)
            .map(|(value, end)| (Self::split_authors(value), end))
            .filter(|(authors, _)| !authors.is_empty())
            .ok_or(ParseError::MissingField(NominationField::Authors))?;

        let (link, offset) = Self::field(NominationField::Link, text, offset)
            .and_then(|(value, end)| Self::extract_link(value).map(|link| (link, end)))
            .ok_or(ParseError::MissingField(NominationField::Link))?;

        let (abstract_text, _) = Self::field(NominationField::Abstract, text, offset)
            .filter(|(value, _)| !value.is_empty())
            .ok_or(ParseError::MissingField(NominationField::Abstract))?;

        Ok(ParseOutcome::Accepted(Candidate::new(
            title,
            authors,
            link,
            abstract_text,
        )))
    }
}
