//! Console output formatter for tick reports

use colored::Colorize;
use paperbot_application::{DeliveryReport, InboxSummary, TickOutcome, TickReport};
use paperbot_domain::TickDecision;

/// Formats [`TickReport`]s for console display
pub struct TickReportFormatter;

impl TickReportFormatter {
    /// Format the complete tick report
    pub fn format(report: &TickReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("paperbot tick {}", report.today)));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Decision:".cyan().bold(),
            Self::decision_label(report.decision)
        ));

        output.push_str(&Self::section_header("Inbox"));
        match &report.inbox {
            Some(summary) => output.push_str(&Self::inbox(summary)),
            None => output.push_str(&format!("{}\n", "Inbox could not be read".yellow())),
        }

        output.push_str(&Self::section_header("Transition"));
        output.push_str(&Self::outcome(&report.outcome));

        output.push_str(&Self::footer());
        output
    }

    /// One line, for cron mail
    pub fn format_summary(report: &TickReport) -> String {
        let outcome = match &report.outcome {
            TickOutcome::Idle => "idle".to_string(),
            TickOutcome::VotingOpened { thread, round, .. } => {
                format!("voting round {round} opened: {}", thread.permalink)
            }
            TickOutcome::DiscussionOpened {
                thread,
                round,
                winner,
                ..
            } => format!(
                "discussion round {round} opened for \"{}\": {}",
                winner.title, thread.permalink
            ),
            TickOutcome::DiscussionSkipped => "discussion skipped, no voting thread".to_string(),
            TickOutcome::Aborted { error, .. } => format!("aborted: {error}"),
        };
        format!("{} {}", report.today, outcome)
    }

    fn decision_label(decision: TickDecision) -> &'static str {
        match decision {
            TickDecision::OpenVoting => "open voting",
            TickDecision::OpenDiscussion => "open discussion",
            TickDecision::Idle => "nothing due",
        }
    }

    fn inbox(summary: &InboxSummary) -> String {
        let mut output = format!(
            "{} message(s), {} subscription change(s), {} forwarded\n",
            summary.processed, summary.subscription_changes, summary.forwarded
        );
        if summary.delivery_failures > 0 {
            output.push_str(&format!(
                "{}\n",
                format!("{} reply(ies) could not be delivered", summary.delivery_failures).yellow()
            ));
        }
        output
    }

    fn outcome(outcome: &TickOutcome) -> String {
        match outcome {
            TickOutcome::Idle => format!("{}\n", "Nothing to do today".dimmed()),
            TickOutcome::VotingOpened {
                thread,
                round,
                notified,
            } => format!(
                "{}\n{} {}\n{}",
                format!("Voting round {round} opened").green().bold(),
                "Thread:".cyan().bold(),
                thread.permalink,
                Self::notified(notified)
            ),
            TickOutcome::DiscussionOpened {
                thread,
                round,
                winner,
                winner_submitter,
                ranked,
                notified,
            } => format!(
                "{}\n{} {} (/u/{}, {} karma)\n{} {} nomination(s)\n{} {}\n{}",
                format!("Discussion round {round} opened").green().bold(),
                "Winner:".cyan().bold(),
                winner.title,
                winner_submitter,
                winner.karma,
                "Ranked:".cyan().bold(),
                ranked,
                "Thread:".cyan().bold(),
                thread.permalink,
                Self::notified(notified)
            ),
            TickOutcome::DiscussionSkipped => format!(
                "{}\n",
                "Discussion skipped: no voting thread was open".yellow()
            ),
            TickOutcome::Aborted { decision, error } => format!(
                "{}\n{} {}\n{}\n",
                format!("Could not {}", Self::decision_label(*decision)).red().bold(),
                "Error:".red(),
                error,
                "Dates were left unchanged; the next tick retries".dimmed()
            ),
        }
    }

    fn notified(report: &DeliveryReport) -> String {
        let mut output = format!(
            "{} {} subscriber(s)\n",
            "Notified:".cyan().bold(),
            report.delivered.len()
        );
        if !report.failed.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Not delivered:".yellow().bold(),
                report.failed.join(", ")
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperbot_application::TickError;
    use paperbot_domain::{Paper, ThreadHandle};

    fn date(s: &str) -> chrono::NaiveDate {
        s.parse().unwrap()
    }

    fn tick_report(decision: TickDecision, outcome: TickOutcome) -> TickReport {
        colored::control::set_override(false);
        TickReport {
            today: date("2026-11-02"),
            decision,
            inbox: Some(InboxSummary {
                processed: 2,
                subscription_changes: 1,
                forwarded: 1,
                delivery_failures: 0,
            }),
            outcome,
        }
    }

    fn paper() -> Paper {
        Paper {
            title: "Dummy paper 01".to_string(),
            authors: vec!["Dummy Author Sr.".to_string()],
            link: "https://link.to/dummy-paper-01.pdf".to_string(),
            abstract_text: "Short abstract".to_string(),
            proposal_count: 1,
            submitters: vec!["alice".to_string()],
            discussion_ref: Some("https://reddit.com/r/cspapers/comments/t2".to_string()),
            karma: 12,
            last_submitter: "alice".to_string(),
            last_submission_link: "https://reddit.com/r/cspapers/comments/t1/_/c1".to_string(),
            nomination_ids: vec!["c1".to_string()],
            round: 3,
        }
    }

    #[test]
    fn test_format_discussion_opened() {
        let report = tick_report(
            TickDecision::OpenDiscussion,
            TickOutcome::DiscussionOpened {
                thread: ThreadHandle::new("t2", "https://reddit.com/r/cspapers/comments/t2"),
                round: 3,
                winner: paper(),
                winner_submitter: "alice".to_string(),
                ranked: 4,
                notified: DeliveryReport {
                    delivered: vec!["bob".to_string()],
                    failed: vec!["carol".to_string()],
                },
            },
        );

        let output = TickReportFormatter::format(&report);
        assert!(output.contains("Decision: open discussion"));
        assert!(output.contains("2 message(s), 1 subscription change(s), 1 forwarded"));
        assert!(output.contains("Discussion round 3 opened"));
        assert!(output.contains("Dummy paper 01 (/u/alice, 12 karma)"));
        assert!(output.contains("Not delivered: carol"));
    }

    #[test]
    fn test_format_aborted() {
        let report = tick_report(
            TickDecision::OpenDiscussion,
            TickOutcome::Aborted {
                decision: TickDecision::OpenDiscussion,
                error: TickError::NoNominations(
                    "https://reddit.com/r/cspapers/comments/t1".to_string(),
                ),
            },
        );

        let output = TickReportFormatter::format(&report);
        assert!(output.contains("Could not open discussion"));
        assert!(output.contains("No valid nominations"));
        assert!(report.is_aborted());
    }

    #[test]
    fn test_format_summary() {
        let report = tick_report(
            TickDecision::OpenVoting,
            TickOutcome::VotingOpened {
                thread: ThreadHandle::new("t1", "https://reddit.com/r/cspapers/comments/t1"),
                round: 3,
                notified: DeliveryReport::default(),
            },
        );
        assert_eq!(
            TickReportFormatter::format_summary(&report),
            "2026-11-02 voting round 3 opened: https://reddit.com/r/cspapers/comments/t1"
        );

        let idle = tick_report(TickDecision::Idle, TickOutcome::Idle);
        assert_eq!(TickReportFormatter::format_summary(&idle), "2026-11-02 idle");
    }
}
