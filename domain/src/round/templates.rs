//! Message templates for threads, replies and private messages

use crate::core::string::{collapse_whitespace, escape_table_cell, truncate};
use crate::subscription::RoundKind;

/// Longest thread title the platform accepts
pub const MAX_TITLE_LEN: usize = 300;

/// Longest private message subject the platform accepts
pub const MAX_SUBJECT_LEN: usize = 100;

/// Templates for everything the bot posts
pub struct MessageTemplate;

impl MessageTemplate {
    /// Default voting thread title; `{round}` and `{date}` are substituted
    pub const DEFAULT_VOTING_TITLE: &'static str = "Paper voting round {round} ({date})";

    /// Default voting thread body; `{round}` and `{closes}` are substituted
    pub const DEFAULT_VOTING_BODY: &'static str = r#"Nominate a paper for round {round} by replying to this thread.
Use one reply per paper, with every field on its own line:

    **Title:** The title of the paper
    **Authors:** First Author, Second Author and Third Author
    **Link:** https://link.to/the/paper.pdf
    **Abstract:** The abstract, on a single line

Upvote the nominations you would like to discuss. Voting closes on {closes}.
Edit your reply to contain `[withdrawn]` to take a nomination back."#;

    /// Default discussion thread title; `{title}` and `{round}` are substituted
    pub const DEFAULT_DISCUSSION_TITLE: &'static str = "[Discussion] {title}";

    /// Substitute `{name}` placeholders; unknown placeholders are left as-is
    pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
        vars.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }

    /// Render a thread title, bounded to the platform's limit
    pub fn thread_title(template: &str, vars: &[(&str, &str)]) -> String {
        truncate(&collapse_whitespace(&Self::render(template, vars)), MAX_TITLE_LEN)
    }

    /// Body of the discussion thread for the winning nomination
    pub fn discussion_body(
        round: u32,
        winner_author: &str,
        winner_body: &str,
        ranking_table: &str,
    ) -> String {
        let quoted: String = winner_body
            .lines()
            .map(|line| format!("> {line}\n"))
            .collect();

        format!(
            r#"This is the discussion thread for round {round}. The winning nomination was submitted by /u/{winner_author}:

{quoted}
Final ranking of the voting round:

{ranking_table}"#
        )
    }

    /// Reply to a nomination of a paper that was already discussed
    pub fn already_discussed_reply(title: &str, discussion_ref: &str) -> String {
        format!(
            r#"Thanks for the nomination! "{title}" was already discussed here: {discussion_ref}

Feel free to continue the conversation in that thread."#
        )
    }

    /// Confirmation sent after a subscription change: `(subject, body)`
    pub fn subscription_confirmation(subscribed: &[RoundKind]) -> (String, String) {
        let body = if subscribed.is_empty() {
            "You are not subscribed to any notifications.".to_string()
        } else {
            let kinds: Vec<&str> = subscribed.iter().map(RoundKind::as_str).collect();
            format!(
                "You are subscribed to notifications for: {}.\n\n\
                 Send `unsubscribe {}` to stop them.",
                kinds.join(", "),
                kinds.join(" ")
            )
        };
        ("Subscription updated".to_string(), body)
    }

    /// Notification that a new thread opened: `(subject, body)`
    pub fn round_notification(kind: RoundKind, title: &str, link: &str) -> (String, String) {
        let subject = match kind {
            RoundKind::Voting => format!("Voting is open: {title}"),
            RoundKind::Discussion => format!("Discussion is open: {title}"),
        };
        let body = format!(
            "{title}\n\n{link}\n\nReply `unsubscribe {kind}` to stop these messages."
        );
        (truncate(&subject, MAX_SUBJECT_LEN), body)
    }

    /// A message the bot could not handle, forwarded to its maintainer
    pub fn forwarded_message(sender: &str, subject: &str, body: &str) -> (String, String) {
        let subject = truncate(&format!("Fwd from /u/{sender}: {subject}"), MAX_SUBJECT_LEN);
        let quoted: String = body.lines().map(|line| format!("> {line}\n")).collect();
        (subject, quoted)
    }

    /// Header of the discussion archive page
    pub fn archive_header() -> &'static str {
        "| Round | Paper | Discussion |\n|------:|-------|------------|\n"
    }

    /// One archive row per discussed paper
    pub fn archive_row(round: u32, title: &str, paper_link: &str, discussion_link: &str) -> String {
        format!(
            "| {round} | [{}]({paper_link}) | [thread]({discussion_link}) |\n",
            escape_table_cell(title).replace('[', "\\[").replace(']', "\\]")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_placeholders() {
        let title = MessageTemplate::render(
            MessageTemplate::DEFAULT_VOTING_TITLE,
            &[("round", "7"), ("date", "2026-10-19")],
        );
        assert_eq!(title, "Paper voting round 7 (2026-10-19)");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(MessageTemplate::render("{a} {b}", &[("a", "x")]), "x {b}");
    }

    #[test]
    fn test_thread_title_is_bounded() {
        let long = "x".repeat(400);
        let title = MessageTemplate::thread_title("[Discussion] {title}", &[("title", &long)]);
        assert_eq!(title.len(), MAX_TITLE_LEN);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_discussion_body_quotes_winner() {
        let body = MessageTemplate::discussion_body(3, "alice", "Title: A\nAuthors: B", "| table |");
        assert!(body.contains("round 3"));
        assert!(body.contains("/u/alice"));
        assert!(body.contains("> Title: A\n> Authors: B\n"));
        assert!(body.ends_with("| table |"));
    }

    #[test]
    fn test_subscription_confirmation_lists_kinds() {
        let (_, body) =
            MessageTemplate::subscription_confirmation(&[RoundKind::Voting, RoundKind::Discussion]);
        assert!(body.contains("voting, discussion"));

        let (_, body) = MessageTemplate::subscription_confirmation(&[]);
        assert!(body.contains("not subscribed"));
    }

    #[test]
    fn test_notification_subject_is_bounded() {
        let (subject, body) =
            MessageTemplate::round_notification(RoundKind::Voting, &"y".repeat(200), "https://x");
        assert!(subject.len() <= MAX_SUBJECT_LEN);
        assert!(body.contains("unsubscribe voting"));
    }

    #[test]
    fn test_archive_row() {
        let row = MessageTemplate::archive_row(2, "Dummy paper 01", "https://x.org", "https://r/d1");
        assert_eq!(row, "| 2 | [Dummy paper 01](https://x.org) | [thread](https://r/d1) |\n");
    }
}
