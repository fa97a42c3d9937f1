//! Tick decision and date arithmetic
//!
//! The state machine is a pure function of `(today, RoundState)`. It never
//! loops or sleeps; an external scheduler runs the bot once per day and each
//! run makes at most one transition.

use super::state::RoundState;
use crate::core::error::DomainError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Time between two rounds of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RoundInterval(u64);

impl RoundInterval {
    pub const TWO_WEEKS: RoundInterval = RoundInterval(14);

    pub fn days(days: i64) -> Result<Self, DomainError> {
        u64::try_from(days)
            .ok()
            .filter(|d| *d >= 1)
            .map(Self)
            .ok_or(DomainError::InvalidInterval(days))
    }

    pub fn as_days(&self) -> u64 {
        self.0
    }
}

impl Default for RoundInterval {
    fn default() -> Self {
        Self::TWO_WEEKS
    }
}

impl TryFrom<i64> for RoundInterval {
    type Error = DomainError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        Self::days(days)
    }
}

impl From<RoundInterval> for i64 {
    fn from(interval: RoundInterval) -> Self {
        interval.0 as i64
    }
}

/// What one tick should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    OpenVoting,
    OpenDiscussion,
    Idle,
}

/// Pick the transition for today.
///
/// A date counts as due on or after its day, so a tick that was skipped or
/// failed is picked up by the next one. Voting wins when both are due; the
/// discussion then follows on the next tick.
///
/// A new voting thread never replaces one that has not been ranked: while a
/// voting round is in progress, a due voting date waits for the discussion.
///
/// # Examples
///
/// ```
/// use paperbot_domain::{RoundState, TickDecision, decide};
///
/// let state = RoundState::new("2026-10-19".parse().unwrap(), "2026-11-02".parse().unwrap());
/// assert_eq!(decide("2026-10-18".parse().unwrap(), &state), TickDecision::Idle);
/// assert_eq!(decide("2026-10-19".parse().unwrap(), &state), TickDecision::OpenVoting);
/// ```
pub fn decide(today: NaiveDate, state: &RoundState) -> TickDecision {
    let voting_due = today >= state.next_voting_date;
    if voting_due && !state.voting_in_progress() {
        TickDecision::OpenVoting
    } else if today >= state.next_discussion_date {
        TickDecision::OpenDiscussion
    } else {
        TickDecision::Idle
    }
}

/// Advance `date` by whole intervals until it lies after `today`.
///
/// On time this is a single step; after missed ticks it skips the rounds
/// that can no longer happen instead of opening one per tick.
pub fn advance_past(date: NaiveDate, today: NaiveDate, interval: RoundInterval) -> NaiveDate {
    let step = Days::new(interval.as_days());
    let mut next = date + step;
    while next <= today {
        next = next + step;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ThreadHandle;
    use crate::round::state::RoundPhase;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn state() -> RoundState {
        RoundState::new(date("2026-10-19"), date("2026-11-02"))
    }

    #[test]
    fn test_idle_before_any_date() {
        assert_eq!(decide(date("2026-10-01"), &state()), TickDecision::Idle);
    }

    #[test]
    fn test_voting_due_today() {
        assert_eq!(decide(date("2026-10-19"), &state()), TickDecision::OpenVoting);
    }

    #[test]
    fn test_discussion_due_today() {
        let mut state = state();
        state.next_voting_date = date("2026-11-16");
        assert_eq!(decide(date("2026-11-02"), &state), TickDecision::OpenDiscussion);
    }

    #[test]
    fn test_voting_takes_priority() {
        let mut state = state();
        state.next_discussion_date = date("2026-10-19");
        assert_eq!(decide(date("2026-10-19"), &state), TickDecision::OpenVoting);
    }

    #[test]
    fn test_open_voting_round_is_closed_first() {
        let mut state = state();
        state.next_voting_date = date("2026-11-02");
        state.phase = RoundPhase::VotingOpen;
        state.current_voting_thread = Some(ThreadHandle::new("v1", "https://r/v1"));

        assert_eq!(decide(date("2026-11-02"), &state), TickDecision::OpenDiscussion);
        // Voting overdue but discussion not yet due: wait
        state.next_discussion_date = date("2026-11-05");
        assert_eq!(decide(date("2026-11-03"), &state), TickDecision::Idle);
    }

    #[test]
    fn test_overdue_discussion_still_fires() {
        let mut state = state();
        state.next_voting_date = date("2026-11-16");
        assert_eq!(decide(date("2026-11-04"), &state), TickDecision::OpenDiscussion);
    }

    #[test]
    fn test_advance_one_interval() {
        let next = advance_past(date("2026-10-19"), date("2026-10-19"), RoundInterval::TWO_WEEKS);
        assert_eq!(next, date("2026-11-02"));
    }

    #[test]
    fn test_advance_skips_missed_rounds() {
        let next = advance_past(date("2026-10-19"), date("2026-11-20"), RoundInterval::TWO_WEEKS);
        assert_eq!(next, date("2026-11-30"));
    }

    #[test]
    fn test_interval_must_be_positive() {
        assert_eq!(RoundInterval::days(0), Err(DomainError::InvalidInterval(0)));
        assert_eq!(RoundInterval::days(-3), Err(DomainError::InvalidInterval(-3)));
        assert_eq!(RoundInterval::days(7).unwrap().as_days(), 7);
        assert_eq!(RoundInterval::default(), RoundInterval::TWO_WEEKS);
    }
}
