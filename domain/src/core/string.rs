//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries. Platform titles and message subjects have
/// hard byte limits, so everything composed for them goes through here.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Collapse every whitespace run (including line breaks) into one space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape characters that would break a markdown table cell.
pub fn escape_table_cell(s: &str) -> String {
    collapse_whitespace(s).replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Gödel, Escher", 30), "Gödel, Escher");
        // 'ö' spans bytes 1..3, so a cut at byte 2 backs off to byte 1
        assert_eq!(truncate("Gödel, Escher, Bach", 5), "G...");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  Attention \n is   all\tyou need "),
            "Attention is all you need"
        );
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_escape_table_cell() {
        assert_eq!(escape_table_cell("a | b"), "a \\| b");
        assert_eq!(escape_table_cell("line\nbreak"), "line break");
    }
}
