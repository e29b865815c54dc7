//! Text normalization before chunking

use regex::Regex;
use std::sync::LazyLock;

/// Anything outside CJK ideographs, ASCII alphanumerics, whitespace and
/// common CJK/ASCII punctuation.
static DISALLOWED: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"[^\x{4e00}-\x{9fa5}a-zA-Z0-9\s,.?!:：；、()\[\]「」『』。，！？]").ok()
});

/// Whitespace runs that contain a blank line
static PARAGRAPH_BREAK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[ \t\r\f\v]*\n[ \t\r\f\v]*\n\s*").ok());

/// Whitespace runs that contain exactly one line break
static LINE_BREAK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[ \t\r\f\v]*\n[ \t\r\f\v]*").ok());

static HORIZONTAL_SPACE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[ \t\r\f\v\u{3000}]+").ok());

/// Patterns are constant; `test_patterns_compile` guards the `None` arm.
fn replace(re: &LazyLock<Option<Regex>>, text: &str, with: &str) -> String {
    match re.as_ref() {
        Some(re) => re.replace_all(text, with).into_owned(),
        None => text.to_string(),
    }
}

/// Strip disallowed characters and collapse whitespace.
///
/// Paragraph breaks become `\n\n`, single line breaks `\n` and other
/// whitespace runs a single space, so the splitter can still cut on
/// paragraph and line boundaries.
pub fn clean_text(text: &str) -> String {
    let text = replace(&DISALLOWED, text, "");
    let text = replace(&PARAGRAPH_BREAK, &text, "\u{0}");
    let text = replace(&LINE_BREAK, &text, "\n");
    let text = replace(&HORIZONTAL_SPACE, &text, " ");
    text.replace('\u{0}', "\n\n").trim().to_string()
}
