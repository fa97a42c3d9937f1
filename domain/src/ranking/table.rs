//! Markdown ranking table

use super::order::RankedNomination;
use crate::core::string::escape_table_cell;

/// Render the ranking as a markdown table.
///
/// Columns: score, submitter, title linked to the paper, and a link to the
/// nominating comment. An empty ranking renders just the header.
pub fn ranking_table(entries: &[RankedNomination]) -> String {
    let mut table = String::from("| Karma | Submitter | Paper | Link |\n");
    table.push_str("|------:|-----------|-------|------|\n");

    for entry in entries {
        table.push_str(&format!(
            "| {} | /u/{} | [{}]({}) | [link]({}) |\n",
            entry.score(),
            escape_table_cell(entry.submitter()),
            escape_link_text(&entry.paper.title),
            entry.paper.link,
            entry.comment.permalink,
        ));
    }

    table
}

fn escape_link_text(s: &str) -> String {
    escape_table_cell(s).replace('[', "\\[").replace(']', "\\]")
}
