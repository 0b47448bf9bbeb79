//! Text normalization helpers shared by the classifier, segmenter and
//! output code.

use textwrap::{fill, Options};
use unicode_normalization::UnicodeNormalization;

/// Collapse every run of whitespace into a single space and trim.
///
/// # Examples
/// ```
/// use katiba_parser::text::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  We the\n people  "), "We the people");
/// ```
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a chapter, part or article title.
///
/// Collapses whitespace, trims, and strips the trailing period. Trailing
/// periods and whitespace are stripped until none remain so that the
/// function is idempotent (`"Title. ."` and `"Title."` both become
/// `"Title"`).
///
/// # Examples
/// ```
/// use katiba_parser::text::normalize_title;
///
/// assert_eq!(normalize_title("Right   to life."), "Right to life");
/// assert_eq!(normalize_title(normalize_title(" Right to life. ").as_str()), "Right to life");
/// ```
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let collapsed = collapse_whitespace(title);
    collapsed
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Append `text` to `buffer`, separated by a single space.
pub fn append_text(buffer: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !buffer.trim().is_empty() {
        buffer.push(' ');
    }
    buffer.push_str(text);
}

/// Normalize raw extracted text to NFC.
///
/// PDF text extraction frequently yields decomposed accents; composing them
/// keeps searches and comparisons stable.
#[must_use]
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect()
}

/// Take at most `max_chars` characters of `text`.
///
/// Returns the preview and whether anything was cut off.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> (String, bool) {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    (head, chars.next().is_some())
}

/// Wrap text for terminal output with a hanging indent.
#[must_use]
pub fn wrap_indented(text: &str, width: usize, indent: &str) -> String {
    let options = Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);
    fill(text, &options)
}
