//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for log lines, appending
/// `…` when anything was cut.
///
/// Counts characters rather than bytes so mixed CJK/ASCII questions are
/// previewed evenly.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…", &s[..cut]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_is_unchanged() {
        assert_eq!(preview("login", 10), "login");
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        assert_eq!(preview("請問加班費怎麼算？", 4), "請問加班…");
    }

    #[test]
    fn preview_exact_length_has_no_ellipsis() {
        assert_eq!(preview("abcd", 4), "abcd");
    }

    #[test]
    fn preview_empty() {
        assert_eq!(preview("", 3), "");
    }
}
