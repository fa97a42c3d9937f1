//! Ranking order

use crate::paper::entities::Paper;
use crate::platform::PlatformComment;
use std::cmp::Reverse;

/// One paper in a round's ranking, with the comment that last nominated it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedNomination {
    pub paper: Paper,
    pub comment: PlatformComment,
    /// Position of `comment` in the fetched thread, the final tie-break
    pub fetch_index: usize,
}

impl RankedNomination {
    pub fn score(&self) -> i64 {
        self.comment.score
    }

    pub fn submitter(&self) -> &str {
        self.comment.author.as_deref().unwrap_or(&self.paper.last_submitter)
    }
}

/// Sort by descending score; ties go to the earlier comment, then to the
/// earlier fetch position.
///
/// # Examples
///
/// ```
/// # use paperbot_domain::{Candidate, Nomination, Paper, PlatformComment, RankedNomination, rank_order};
/// # fn entry(i: usize, score: i64) -> RankedNomination {
/// #     let comment = PlatformComment {
/// #         id: format!("c{i}"),
/// #         author: Some(format!("user{i}")),
/// #         body: String::new(),
/// #         score,
/// #         permalink: String::new(),
/// #         created: chrono::DateTime::from_timestamp(1_700_000_000 + i as i64, 0).unwrap(),
/// #     };
/// #     let nomination = Nomination {
/// #         comment_id: comment.id.clone(),
/// #         submitter: format!("user{i}"),
/// #         karma: score,
/// #         permalink: String::new(),
/// #         round: 1,
/// #     };
/// #     let candidate = Candidate::new(format!("Paper {i}"), vec!["A".into()], "https://x.org", "D");
/// #     RankedNomination { paper: Paper::from_nomination(candidate, &nomination), comment, fetch_index: i }
/// # }
/// let mut ranked = vec![entry(0, 5), entry(1, 9), entry(2, 2)];
/// rank_order(&mut ranked);
/// let scores: Vec<i64> = ranked.iter().map(|r| r.score()).collect();
/// assert_eq!(scores, vec![9, 5, 2]);
/// ```
pub fn rank_order(entries: &mut [RankedNomination]) {
    entries.sort_by_key(|entry| (Reverse(entry.score()), entry.comment.created, entry.fetch_index));
}
