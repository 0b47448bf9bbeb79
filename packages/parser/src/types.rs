//! Core data types for the parsed document.
//!
//! The hierarchy is preamble → chapters → (parts) → articles → clauses →
//! sub-clauses → mini-clauses. Every entity is owned by its parent's
//! sequence; nothing is shared or cross-referenced.

use serde::{Deserialize, Serialize};

/// A complete parsed constitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Text between the preamble and first chapter markers.
    #[serde(default)]
    pub preamble: String,

    /// Chapters in order of appearance.
    pub chapters: Vec<Chapter>,

    /// Schedules following the body, when schedule splitting is enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedules: Vec<Schedule>,
}

impl Document {
    /// Create a document without schedules.
    #[must_use]
    pub fn new(preamble: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self {
            preamble: preamble.into(),
            chapters,
            schedules: Vec::new(),
        }
    }

    /// Attach schedules.
    #[must_use]
    pub fn with_schedules(mut self, schedules: Vec<Schedule>) -> Self {
        self.schedules = schedules;
        self
    }
}

/// A chapter, e.g. "CHAPTER FOUR - THE BILL OF RIGHTS".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter number, from the heading word or the chapter's position.
    pub number: u32,

    /// Normalized chapter title.
    pub title: String,

    /// Text before the first article or part.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub intro: String,

    /// Articles directly under the chapter (not inside a part).
    #[serde(default)]
    pub articles: Vec<Article>,

    /// Parts subdividing the chapter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
}

impl Chapter {
    /// Create an empty chapter.
    #[must_use]
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            intro: String::new(),
            articles: Vec::new(),
            parts: Vec::new(),
        }
    }

    /// Iterate over every article in the chapter, including those in parts,
    /// in document order.
    pub fn all_articles(&self) -> impl Iterator<Item = &Article> {
        self.articles
            .iter()
            .chain(self.parts.iter().flat_map(|p| p.articles.iter()))
    }
}

/// A part within a chapter, e.g. "PART 2 - RIGHTS AND FUNDAMENTAL FREEDOMS".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Part number.
    pub number: u32,

    /// Normalized part title.
    pub title: String,

    /// Text before the first article of the part.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub intro: String,

    /// Articles in the part.
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Part {
    /// Create an empty part.
    #[must_use]
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            intro: String::new(),
            articles: Vec::new(),
        }
    }
}

/// A numbered article, e.g. "26. Right to life".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article number.
    pub number: u32,

    /// Normalized article title.
    pub title: String,

    /// Clauses; never empty for a segmented article.
    pub clauses: Vec<Clause>,
}

/// A clause, e.g. "(1) Every person has the right to life."
///
/// Synthetic clauses have an empty `number`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    /// Clause number without parentheses, or empty.
    pub number: String,

    /// Clause text.
    pub text: String,

    /// Lettered sub-clauses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_clauses: Vec<SubClause>,
}

impl Clause {
    /// Create a clause without sub-clauses.
    #[must_use]
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
            sub_clauses: Vec::new(),
        }
    }

    /// Whether the clause was fabricated to hold unnumbered body text.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.number.is_empty()
    }
}

/// A lettered sub-clause, e.g. "(a) subject to law".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubClause {
    /// Single lowercase letter, or empty when synthesized.
    pub label: String,

    /// Sub-clause text.
    pub text: String,

    /// Roman-numeral mini-clauses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mini_clauses: Vec<MiniClause>,
}

impl SubClause {
    /// Create a sub-clause without mini-clauses.
    #[must_use]
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            mini_clauses: Vec::new(),
        }
    }
}

/// A roman-numeral mini-clause, e.g. "(ii) by a court".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniClause {
    /// Lowercase roman numeral as written.
    pub numeral: String,

    /// Value of the numeral.
    pub number: u32,

    /// Mini-clause text.
    pub text: String,
}

/// A schedule after the body, e.g. "FIRST SCHEDULE / Article 6 (1) / COUNTIES".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Number from the ordinal heading word.
    pub number: u32,

    /// Normalized title (first line after the heading).
    #[serde(default)]
    pub title: String,

    /// Article reference such as "Article 6 (1)".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference: String,

    /// Text before the first item.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// Numbered or lettered entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ScheduleItem>,
}

impl Schedule {
    /// Create an empty schedule.
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self {
            number,
            title: String::new(),
            reference: String::new(),
            text: String::new(),
            items: Vec::new(),
        }
    }
}

/// One entry of a schedule, e.g. "1. Mombasa" or "(a) The National Flag".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Number or letter as written, without punctuation.
    pub label: String,

    /// Entry text, continuation lines joined.
    pub text: String,
}
