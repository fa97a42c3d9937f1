//! Rank nominations use case
//!
//! Turns the comments of a voting thread into a ranked list of papers:
//!
//! 1. Drop comments from deleted accounts
//! 2. Parse the rest, oldest first, and merge them into the registry
//! 3. Reply once to nominations of papers that were already discussed
//! 4. Keep one entry per paper and order by score
//!
//! Running it twice over the same comments yields the same ranking and
//! counts nothing twice.

use crate::ports::event_logger::{RoundEvent, RoundEventLogger};
use crate::ports::platform::PlatformClient;
use crate::ports::record_store::RecordStore;
use crate::use_cases::registry::{PaperRegistry, RegistryError, UpsertOutcome};
use paperbot_domain::{
    MessageTemplate, Nomination, NominationParser, ParseOutcome, PlatformComment,
    RankedNomination, rank_order,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Counters for one ranking pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingStats {
    pub comments: usize,
    pub without_author: usize,
    pub rejected: usize,
    pub failed: usize,
    pub already_discussed: usize,
    pub replies_sent: usize,
}

/// Result of ranking a voting thread
#[derive(Debug, Clone, Default)]
pub struct RankingOutcome {
    /// Distinct papers, best first
    pub ranked: Vec<RankedNomination>,
    pub stats: RankingStats,
}

impl RankingOutcome {
    /// The top entry, if any nomination was valid
    pub fn winner(&self) -> Option<&RankedNomination> {
        self.ranked.first()
    }
}

pub struct RankNominationsUseCase<P: PlatformClient> {
    platform: Arc<P>,
    store: Arc<dyn RecordStore>,
    parser: Arc<dyn NominationParser>,
    event_logger: Arc<dyn RoundEventLogger>,
}

impl<P: PlatformClient> RankNominationsUseCase<P> {
    pub fn new(
        platform: Arc<P>,
        store: Arc<dyn RecordStore>,
        parser: Arc<dyn NominationParser>,
        event_logger: Arc<dyn RoundEventLogger>,
    ) -> Self {
        Self {
            platform,
            store,
            parser,
            event_logger,
        }
    }

    /// Rank `comments` (in fetch order) as nominations for `round`.
    ///
    /// Only store failures are errors; malformed nominations are logged and
    /// skipped.
    pub async fn rank(
        &self,
        comments: &[PlatformComment],
        round: u32,
    ) -> Result<RankingOutcome, RegistryError> {
        let registry = PaperRegistry::new(self.store.as_ref());
        let mut stats = RankingStats {
            comments: comments.len(),
            ..Default::default()
        };

        let mut chronological: Vec<(usize, &PlatformComment)> = comments
            .iter()
            .enumerate()
            .filter(|(_, comment)| {
                let keep = comment.has_author();
                if !keep {
                    stats.without_author += 1;
                }
                keep
            })
            .collect();
        chronological.sort_by_key(|(index, comment)| (comment.created, *index));

        let mut entries: Vec<RankedNomination> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (fetch_index, comment) in chronological {
            let submitter = comment.author.clone().unwrap_or_default();

            let candidate = match self.parser.parse(&comment.body) {
                Ok(ParseOutcome::Accepted(candidate)) => candidate,
                Ok(ParseOutcome::Rejected(reason)) => {
                    info!("Skipping comment {} by {}: {}", comment.id, submitter, reason);
                    stats.rejected += 1;
                    continue;
                }
                Err(e) => {
                    error!("Invalid nomination in comment {} by {}: {}", comment.id, submitter, e);
                    self.event_logger.log(RoundEvent::new(
                        "nomination_failed",
                        json!({
                            "comment_id": comment.id,
                            "submitter": submitter,
                            "error": e.to_string(),
                        }),
                    ));
                    stats.failed += 1;
                    continue;
                }
            };

            let nomination = Nomination {
                comment_id: comment.id.clone(),
                submitter: submitter.clone(),
                karma: comment.score,
                permalink: comment.permalink.clone(),
                round,
            };

            let paper = match registry.upsert(candidate, &nomination) {
                Ok(UpsertOutcome::Created(paper)) | Ok(UpsertOutcome::Updated { paper, .. }) => {
                    paper
                }
                Ok(UpsertOutcome::AlreadyDiscussed { paper, first_seen }) => {
                    stats.already_discussed += 1;
                    if first_seen
                        && self
                            .reply_already_discussed(comment, &paper.title, &paper.discussion_ref)
                            .await
                    {
                        registry.acknowledge(&paper.title, &comment.id)?;
                        stats.replies_sent += 1;
                    }
                    continue;
                }
                Err(RegistryError::Domain(e)) => {
                    error!("Rejected nomination in comment {}: {}", comment.id, e);
                    stats.failed += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let key = paper.key()?.to_string();
            let entry = RankedNomination {
                paper,
                comment: comment.clone(),
                fetch_index,
            };
            match positions.get(&key) {
                Some(&position) => entries[position] = entry,
                None => {
                    positions.insert(key, entries.len());
                    entries.push(entry);
                }
            }
        }

        rank_order(&mut entries);
        debug!(
            "Ranked {} paper(s) from {} comment(s)",
            entries.len(),
            stats.comments
        );

        Ok(RankingOutcome {
            ranked: entries,
            stats,
        })
    }

    async fn reply_already_discussed(
        &self,
        comment: &PlatformComment,
        title: &str,
        discussion_ref: &Option<String>,
    ) -> bool {
        let discussion_ref = discussion_ref.as_deref().unwrap_or_default();
        let body = MessageTemplate::already_discussed_reply(title, discussion_ref);

        self.event_logger.log(RoundEvent::new(
            "already_discussed",
            json!({
                "comment_id": comment.id,
                "title": title,
                "discussion_ref": discussion_ref,
            }),
        ));

        match self.platform.reply_to_comment(&comment.id, &body).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to reply to comment {}, retrying on the next ranking: {}",
                    comment.id, e
                );
                false
            }
        }
    }
}
