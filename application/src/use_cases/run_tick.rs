//! Run tick use case
//!
//! One invocation of the bot: handle the inbox, then make at most one round
//! transition.
//!
//! ```text
//!            voting due                     discussion due
//! Idle ───────────────────▶ VotingOpen ─────────────────────▶ DiscussionOpen
//!                               ▲                                  │
//!                               └────────── voting due ────────────┘
//! ```
//!
//! A voting thread is always ranked before the next one is opened. A failed
//! transition leaves its date where it was, so the next tick retries it. Pinning, comment ordering, the archive page and
//! notifications are best effort and only logged when they fail.

use crate::config::RoundSettings;
use crate::ports::event_logger::{NoRoundEventLogger, RoundEvent, RoundEventLogger};
use crate::ports::platform::{PlatformClient, PlatformError};
use crate::ports::record_store::RecordStore;
use crate::use_cases::notifications::{DeliveryReport, NotifySubscribersUseCase};
use crate::use_cases::process_inbox::{InboxSummary, ProcessInboxUseCase};
use crate::use_cases::rank_nominations::RankNominationsUseCase;
use crate::use_cases::registry::{PaperRegistry, RegistryError};
use chrono::NaiveDate;
use paperbot_domain::{
    MessageTemplate, NominationParser, Paper, RegexNominationParser, RoundKind, RoundPhase,
    RoundState, ThreadHandle, TickDecision, advance_past, decide, ranking_table,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Why a transition was abandoned
#[derive(Error, Debug)]
pub enum TickError {
    #[error("Failed to {step}: {source}")]
    Platform {
        step: &'static str,
        source: PlatformError,
    },

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("No valid nominations in voting thread {0}")]
    NoNominations(String),
}

impl TickError {
    fn platform(step: &'static str) -> impl FnOnce(PlatformError) -> Self {
        move |source| TickError::Platform { step, source }
    }
}

/// What the tick's transition did
#[derive(Debug)]
pub enum TickOutcome {
    /// Nothing was due
    Idle,
    VotingOpened {
        thread: ThreadHandle,
        round: u32,
        notified: DeliveryReport,
    },
    DiscussionOpened {
        thread: ThreadHandle,
        round: u32,
        winner: Paper,
        winner_submitter: String,
        ranked: usize,
        notified: DeliveryReport,
    },
    /// Discussion was due but no voting thread was open
    DiscussionSkipped,
    /// The transition failed and will be retried on the next tick
    Aborted {
        decision: TickDecision,
        error: TickError,
    },
}

/// Everything one tick did
#[derive(Debug)]
pub struct TickReport {
    pub today: NaiveDate,
    pub decision: TickDecision,
    /// `None` when the inbox could not be fetched
    pub inbox: Option<InboxSummary>,
    pub outcome: TickOutcome,
}

impl TickReport {
    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, TickOutcome::Aborted { .. })
    }
}

/// Use case for one scheduler tick
pub struct RunTickUseCase<P: PlatformClient + 'static> {
    platform: Arc<P>,
    store: Arc<dyn RecordStore>,
    settings: RoundSettings,
    parser: Arc<dyn NominationParser>,
    event_logger: Arc<dyn RoundEventLogger>,
}

impl<P: PlatformClient + 'static> RunTickUseCase<P> {
    pub fn new(platform: Arc<P>, store: Arc<dyn RecordStore>, settings: RoundSettings) -> Self {
        Self {
            platform,
            store,
            settings,
            parser: Arc::new(RegexNominationParser),
            event_logger: Arc::new(NoRoundEventLogger),
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn NominationParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_event_logger(mut self, event_logger: Arc<dyn RoundEventLogger>) -> Self {
        self.event_logger = event_logger;
        self
    }

    /// Run the tick for `today`, mutating `state` in place.
    ///
    /// Never fails: errors end up in the report and the caller persists the
    /// state either way.
    pub async fn execute(&self, today: NaiveDate, state: &mut RoundState) -> TickReport {
        let inbox = ProcessInboxUseCase::new(self.platform.clone(), self.event_logger.clone());
        let inbox = match inbox
            .execute(state, self.settings.maintainer.as_deref())
            .await
        {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Failed to read inbox: {}", e);
                None
            }
        };

        let decision = decide(today, state);
        info!(
            "Tick {} (phase {}, round {}): {:?}",
            today, state.phase, state.paper_round, decision
        );

        let result = match decision {
            TickDecision::OpenVoting => self.open_voting(today, state).await,
            TickDecision::OpenDiscussion => self.open_discussion(today, state).await,
            TickDecision::Idle => Ok(TickOutcome::Idle),
        };

        let outcome = result.unwrap_or_else(|error| {
            error!("Aborted {:?}: {}", decision, error);
            self.event_logger.log(RoundEvent::new(
                "transition_aborted",
                json!({
                    "decision": format!("{decision:?}"),
                    "error": error.to_string(),
                }),
            ));
            TickOutcome::Aborted { decision, error }
        });

        TickReport {
            today,
            decision,
            inbox,
            outcome,
        }
    }

    async fn open_voting(
        &self,
        today: NaiveDate,
        state: &mut RoundState,
    ) -> Result<TickOutcome, TickError> {
        let round = state.paper_round + 1;
        let round_str = round.to_string();
        let date_str = today.to_string();
        let closes_str = state.next_discussion_date.to_string();
        let title = MessageTemplate::thread_title(
            &self.settings.voting_title,
            &[("round", round_str.as_str()), ("date", date_str.as_str())],
        );
        let body = MessageTemplate::render(
            &self.settings.voting_body,
            &[("round", round_str.as_str()), ("closes", closes_str.as_str())],
        );

        let thread = self
            .platform
            .create_thread(&self.settings.destination, &title, &body)
            .await
            .map_err(TickError::platform("create voting thread"))?;
        info!("Opened voting thread {} for round {}", thread.permalink, round);

        if state.moderator_mode {
            self.moderate(&thread, true).await;
        }

        state.current_voting_thread = Some(thread.clone());
        state.next_voting_date =
            advance_past(state.next_voting_date, today, self.settings.interval);
        state.phase = RoundPhase::VotingOpen;

        self.event_logger.log(RoundEvent::new(
            "voting_opened",
            json!({
                "round": round,
                "thread_id": thread.id,
                "permalink": thread.permalink,
                "next_voting_date": state.next_voting_date.to_string(),
            }),
        ));

        let notified = NotifySubscribersUseCase::new(self.platform.clone())
            .notify(
                RoundKind::Voting,
                &state.voting_subscribers,
                &title,
                &thread.permalink,
            )
            .await;

        Ok(TickOutcome::VotingOpened {
            thread,
            round,
            notified,
        })
    }

    async fn open_discussion(
        &self,
        today: NaiveDate,
        state: &mut RoundState,
    ) -> Result<TickOutcome, TickError> {
        let Some(voting_thread) = state.current_voting_thread.clone() else {
            warn!("Discussion due on {} but no voting thread is open", today);
            state.next_discussion_date =
                advance_past(state.next_discussion_date, today, self.settings.interval);
            self.event_logger.log(RoundEvent::new(
                "discussion_skipped",
                json!({ "next_discussion_date": state.next_discussion_date.to_string() }),
            ));
            return Ok(TickOutcome::DiscussionSkipped);
        };
        let round = state.paper_round + 1;

        let comments = self
            .platform
            .get_thread_comments(&voting_thread.id)
            .await
            .map_err(TickError::platform("fetch voting comments"))?;

        let ranking = RankNominationsUseCase::new(
            self.platform.clone(),
            self.store.clone(),
            self.parser.clone(),
            self.event_logger.clone(),
        )
        .rank(&comments, round)
        .await?;

        let Some(winner) = ranking.winner() else {
            return Err(TickError::NoNominations(voting_thread.permalink));
        };
        let winner_submitter = winner.submitter().to_string();

        let round_str = round.to_string();
        let title = MessageTemplate::thread_title(
            &self.settings.discussion_title,
            &[
                ("title", winner.paper.title.as_str()),
                ("round", round_str.as_str()),
            ],
        );
        let body = MessageTemplate::discussion_body(
            round,
            &winner_submitter,
            &winner.comment.body,
            &ranking_table(&ranking.ranked),
        );

        let thread = self
            .platform
            .create_thread(&self.settings.destination, &title, &body)
            .await
            .map_err(TickError::platform("create discussion thread"))?;
        info!(
            "Opened discussion thread {} for '{}'",
            thread.permalink, winner.paper.title
        );

        let winner = match PaperRegistry::new(self.store.as_ref())
            .mark_discussed(&winner.paper.title, &thread.permalink)
        {
            Ok(paper) => paper,
            Err(e) => {
                error!("Failed to mark '{}' as discussed: {}", winner.paper.title, e);
                winner.paper.clone()
            }
        };

        // Voting stays pinned and ranked until the discussion thread exists
        if state.moderator_mode {
            self.moderate(&voting_thread, false).await;
            if let Err(e) = self.platform.set_pinned(&thread, true).await {
                warn!("Failed to pin discussion thread {}: {}", thread.id, e);
            }
        }

        if let Some(page) = &self.settings.archive_page
            && let Err(e) = self.append_archive(page, round, &winner, &thread).await
        {
            warn!("Failed to update archive page '{}': {}", page, e);
        }

        state.next_discussion_date =
            advance_past(state.next_discussion_date, today, self.settings.interval);
        state.paper_round = round;
        state.phase = RoundPhase::DiscussionOpen;
        state.current_voting_thread = None;
        state.current_discussion_thread = Some(thread.clone());

        self.event_logger.log(RoundEvent::new(
            "discussion_opened",
            json!({
                "round": round,
                "title": winner.title,
                "submitter": winner_submitter,
                "ranked": ranking.ranked.len(),
                "stats": {
                    "comments": ranking.stats.comments,
                    "rejected": ranking.stats.rejected,
                    "failed": ranking.stats.failed,
                    "already_discussed": ranking.stats.already_discussed,
                },
                "permalink": thread.permalink,
                "next_discussion_date": state.next_discussion_date.to_string(),
            }),
        ));

        let notified = NotifySubscribersUseCase::new(self.platform.clone())
            .notify(
                RoundKind::Discussion,
                &state.discussion_subscribers,
                &title,
                &thread.permalink,
            )
            .await;

        Ok(TickOutcome::DiscussionOpened {
            thread,
            round,
            winner,
            winner_submitter,
            ranked: ranking.ranked.len(),
            notified,
        })
    }

    /// Pin and switch to ranked ordering, or undo both
    async fn moderate(&self, thread: &ThreadHandle, open: bool) {
        if let Err(e) = self.platform.set_pinned(thread, open).await {
            warn!("Failed to set pinned={} on {}: {}", open, thread.id, e);
        }
        if let Err(e) = self.platform.set_approval_ranked_ordering(thread, open).await {
            warn!("Failed to set ranked ordering={} on {}: {}", open, thread.id, e);
        }
    }

    async fn append_archive(
        &self,
        page: &str,
        round: u32,
        paper: &Paper,
        thread: &ThreadHandle,
    ) -> Result<(), PlatformError> {
        let destination = &self.settings.destination;
        let mut content = self
            .platform
            .get_page(destination, page)
            .await?
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| MessageTemplate::archive_header().to_string());
        if !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&MessageTemplate::archive_row(
            round,
            &paper.title,
            &paper.link,
            &thread.permalink,
        ));
        self.platform.edit_page(destination, page, &content).await
    }
}
