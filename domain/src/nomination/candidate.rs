//! Candidate value object

use crate::paper::title::NormalizedTitle;
use serde::{Deserialize, Serialize};

/// A single parsed nomination (transient, never persisted as-is)
///
/// Produced by the parser with every field present and non-empty; the
/// registry either merges it into an existing [`Paper`](crate::Paper) or
/// promotes it to a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub authors: Vec<String>,
    pub link: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl Candidate {
    pub fn new(
        title: impl Into<String>,
        authors: Vec<String>,
        link: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors,
            link: link.into(),
            abstract_text: abstract_text.into(),
        }
    }

    /// Registry key of the nominated paper
    pub fn key(&self) -> Option<NormalizedTitle> {
        NormalizedTitle::new(&self.title).ok()
    }
}
