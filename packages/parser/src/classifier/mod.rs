//! Line classifier.
//!
//! Decides, from the shape of one trimmed line alone, what structural event
//! the line represents. The patterns are evaluated in a fixed order and the
//! first match wins; a line that matches nothing is a continuation, so
//! classification never fails.

mod numerals;

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::text::normalize_title;

pub use numerals::{chapter_word_value, ordinal_word_value, resolve_chapter_number, roman_value};

/// Structural meaning of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// "CHAPTER FOUR - THE BILL OF RIGHTS".
    ChapterStart {
        /// Text on the same line before the word CHAPTER.
        lead: String,
        /// Numeral token as written, e.g. "FOUR".
        number_token: String,
        /// Normalized title.
        title: String,
    },

    /// "PART 2 - RIGHTS AND FUNDAMENTAL FREEDOMS".
    PartStart { number: u32, title: String },

    /// "26. Right to life".
    ArticleStart { number: u32, title: String },

    /// "(1) Every person has the right to life."
    ClauseStart { number: String, remainder: String },

    /// "(a) subject to law".
    SubClauseStart { label: String, remainder: String },

    /// "(ii) by a court".
    MiniClauseStart { numeral: String, remainder: String },

    /// Anything else.
    Continuation { text: String },
}

/// A pattern and the constructor applied to its captures.
///
/// A constructor may decline a match (returning `None`), in which case the
/// next rule is tried.
struct Rule {
    name: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>) -> Option<LineKind>,
}

impl Rule {
    #[allow(clippy::expect_used)] // Static patterns that are guaranteed to be valid
    fn new(
        name: &'static str,
        pattern: &str,
        build: fn(&Captures<'_>) -> Option<LineKind>,
    ) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid regex"),
            build,
        }
    }
}

/// Capture group as an owned string, empty when absent.
fn group(caps: &Captures<'_>, i: usize) -> String {
    caps.get(i).map(|m| m.as_str().trim().to_string()).unwrap_or_default()
}

fn build_chapter(caps: &Captures<'_>) -> Option<LineKind> {
    Some(LineKind::ChapterStart {
        lead: group(caps, 1),
        number_token: group(caps, 2),
        title: normalize_title(&group(caps, 3)),
    })
}

fn build_part(caps: &Captures<'_>) -> Option<LineKind> {
    Some(LineKind::PartStart {
        number: group(caps, 1).parse().ok()?,
        title: normalize_title(&group(caps, 2)),
    })
}

fn build_article(caps: &Captures<'_>) -> Option<LineKind> {
    // Digit runs that overflow are not article numbers
    Some(LineKind::ArticleStart {
        number: group(caps, 1).parse().ok()?,
        title: normalize_title(&group(caps, 2)),
    })
}

fn build_clause(caps: &Captures<'_>) -> Option<LineKind> {
    Some(LineKind::ClauseStart {
        number: group(caps, 1),
        remainder: group(caps, 2),
    })
}

fn build_sub_clause(caps: &Captures<'_>) -> Option<LineKind> {
    Some(LineKind::SubClauseStart {
        label: group(caps, 1),
        remainder: group(caps, 2),
    })
}

fn build_mini_clause(caps: &Captures<'_>) -> Option<LineKind> {
    let numeral = group(caps, 1);
    roman_value(&numeral)?;
    Some(LineKind::MiniClauseStart {
        numeral,
        remainder: group(caps, 2),
    })
}

/// Classification rules in priority order.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "chapter",
            r"(?i)^(.*?)\bCHAPTER\s+(\w+)\s*[-–—]\s*(.+)$",
            build_chapter,
        ),
        Rule::new(
            "part",
            r"(?i)^PART\s+([0-9]+)\s*[-–—]\s*(.+)$",
            build_part,
        ),
        // The uppercase letter separates headings from "26. the ..." running text
        Rule::new("article", r"^([0-9]+)\.\s+([A-Z].*)$", build_article),
        Rule::new("clause", r"^\(([0-9]+)\)\s*(.*)$", build_clause),
        Rule::new("sub_clause", r"^\(([a-z])\)\s*(.*)$", build_sub_clause),
        Rule::new(
            "mini_clause",
            r"^\(([ivxlc]{2,})\)\s*(.*)$",
            build_mini_clause,
        ),
    ]
});

/// Classify one line.
///
/// The line is trimmed first. Blank lines are expected to be filtered by the
/// caller; if one slips through it classifies as an empty continuation.
///
/// # Examples
/// ```
/// use katiba_parser::classifier::{classify, LineKind};
///
/// assert_eq!(
///     classify("(1) All sovereign power belongs to the people."),
///     LineKind::ClauseStart {
///         number: "1".to_string(),
///         remainder: "All sovereign power belongs to the people.".to_string(),
///     }
/// );
/// ```
#[must_use]
pub fn classify(line: &str) -> LineKind {
    let line = line.trim();

    for rule in RULES.iter() {
        let Some(caps) = rule.pattern.captures(line) else {
            continue;
        };
        if let Some(kind) = (rule.build)(&caps) {
            tracing::trace!(rule = rule.name, line = %line, "classified line");
            return kind;
        }
    }

    LineKind::Continuation {
        text: line.to_string(),
    }
}
