//! Per-chapter segmentation state.
//!
//! The state is a plain value threaded through a fold over the classified
//! lines of one chapter body: `lines.fold(ChapterState::new(..), apply)`.
//! Each boundary event flushes the deepest open entity into its parent
//! before opening the next one.

use crate::classifier::{roman_value, LineKind};
use crate::text::append_text;
use crate::types::{Article, Chapter, Clause, MiniClause, Part, SubClause};

/// An article that is still receiving lines.
#[derive(Debug)]
struct OpenArticle {
    number: u32,
    title: String,
    /// Text seen before any clause opened.
    body: String,
    clauses: Vec<Clause>,
    /// Clause receiving lines; its last sub-clause (and that sub-clause's
    /// last mini-clause) are the deeper open entities.
    open_clause: Option<Clause>,
}

impl OpenArticle {
    fn new(number: u32, title: String) -> Self {
        Self {
            number,
            title,
            body: String::new(),
            clauses: Vec::new(),
            open_clause: None,
        }
    }

    /// Move the open clause into the closed clauses.
    ///
    /// A clause with neither text nor sub-clauses is a bare marker and is not
    /// emitted.
    fn flush_clause(&mut self) {
        let Some(mut clause) = self.open_clause.take() else {
            return;
        };
        clause.text = clause.text.trim().to_string();
        if clause.text.is_empty() && clause.sub_clauses.is_empty() {
            tracing::debug!(
                article = self.number,
                clause = %clause.number,
                "Empty clause marker, nothing to emit"
            );
            return;
        }
        self.clauses.push(clause);
    }

    /// Emit the accumulated body text as a synthetic clause, if any.
    fn flush_body(&mut self) {
        if self.body.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.body);
        self.clauses.push(Clause::new("", text.trim()));
    }

    /// Open clause, synthesizing an unnumbered one from the body if needed.
    fn clause_mut(&mut self) -> &mut Clause {
        if self.open_clause.is_none() {
            tracing::debug!(
                article = self.number,
                "Sub-clause without an open clause, synthesizing one"
            );
            let text = std::mem::take(&mut self.body).trim().to_string();
            self.open_clause = Some(Clause::new("", text));
        }
        self.open_clause.get_or_insert_with(Clause::default)
    }

    fn open_clause(&mut self, number: String, remainder: String) {
        self.flush_clause();
        self.flush_body();
        self.open_clause = Some(Clause::new(number, remainder));
    }

    fn open_sub_clause(&mut self, label: String, remainder: String) {
        self.clause_mut()
            .sub_clauses
            .push(SubClause::new(label, remainder));
    }

    fn open_mini_clause(&mut self, numeral: String, remainder: String) {
        let number = roman_value(&numeral).unwrap_or_default();
        let clause = self.clause_mut();
        if clause.sub_clauses.is_empty() {
            clause.sub_clauses.push(SubClause::default());
        }
        if let Some(sub) = clause.sub_clauses.last_mut() {
            sub.mini_clauses.push(MiniClause {
                numeral,
                number,
                text: remainder,
            });
        }
    }

    /// Whether a single-letter label belongs to a mini-clause list rather
    /// than starting a new sub-clause.
    ///
    /// `(i)` opens a mini-clause list unless it follows `(h)`. With no open
    /// sub-clause the list goes under an empty-labelled one, the same as an
    /// orphan `(ii)`. Later single letters (`v`, `x`, ...) only count when
    /// they are the next numeral.
    fn continues_mini_clauses(&self, label: &str) -> bool {
        let Some(value) = roman_value(label) else {
            return false;
        };
        let sub = self
            .open_clause
            .as_ref()
            .and_then(|c| c.sub_clauses.last());
        match sub {
            None => value == 1,
            Some(sub) => match sub.mini_clauses.last() {
                Some(last) => value == last.number + 1,
                None => value == 1 && sub.label != "h",
            },
        }
    }

    /// Append text to the deepest open entity.
    fn append(&mut self, text: &str) {
        let Some(clause) = self.open_clause.as_mut() else {
            append_text(&mut self.body, text);
            return;
        };
        let Some(sub) = clause.sub_clauses.last_mut() else {
            append_text(&mut clause.text, text);
            return;
        };
        match sub.mini_clauses.last_mut() {
            Some(mini) => append_text(&mut mini.text, text),
            None => append_text(&mut sub.text, text),
        }
    }

    fn finish(mut self) -> Article {
        self.flush_clause();
        if self.clauses.is_empty() {
            // Every article carries at least one clause, even an empty one
            let text = self.body.trim().to_string();
            self.clauses.push(Clause::new("", text));
        } else {
            self.flush_body();
        }
        Article {
            number: self.number,
            title: self.title,
            clauses: self.clauses,
        }
    }
}

/// Segmentation state for one chapter body.
#[derive(Debug)]
pub(crate) struct ChapterState {
    chapter: Chapter,
    open_part: Option<Part>,
    open_article: Option<OpenArticle>,
}

impl ChapterState {
    /// Start segmenting the body of `chapter`.
    pub(crate) fn new(chapter: Chapter) -> Self {
        Self {
            chapter,
            open_part: None,
            open_article: None,
        }
    }

    /// Apply one classified line. `raw` is the trimmed source line.
    pub(crate) fn apply(mut self, raw: &str, kind: LineKind) -> Self {
        match kind {
            LineKind::ArticleStart { number, title } => {
                self.close_article();
                self.open_article = Some(OpenArticle::new(number, title));
            }
            LineKind::PartStart { number, title } => {
                self.close_article();
                self.close_part();
                self.open_part = Some(Part::new(number, title));
            }
            LineKind::ClauseStart { number, remainder } => match self.open_article.as_mut() {
                Some(article) => article.open_clause(number, remainder),
                None => self.append_intro(raw),
            },
            LineKind::SubClauseStart { label, remainder } => match self.open_article.as_mut() {
                Some(article) if article.continues_mini_clauses(&label) => {
                    article.open_mini_clause(label, remainder);
                }
                Some(article) => article.open_sub_clause(label, remainder),
                None => self.append_intro(raw),
            },
            LineKind::MiniClauseStart { numeral, remainder } => match self.open_article.as_mut() {
                Some(article) => article.open_mini_clause(numeral, remainder),
                None => self.append_intro(raw),
            },
            LineKind::Continuation { text } => match self.open_article.as_mut() {
                Some(article) => article.append(&text),
                None => self.append_intro(&text),
            },
            // Chapter bodies are cut at chapter headings, so this only happens
            // when a caller feeds an unpartitioned body
            LineKind::ChapterStart { .. } => match self.open_article.as_mut() {
                Some(article) => article.append(raw),
                None => self.append_intro(raw),
            },
        }
        self
    }

    /// Close everything still open and return the chapter.
    pub(crate) fn finish(mut self) -> Chapter {
        self.close_article();
        self.close_part();
        self.chapter
    }

    fn append_intro(&mut self, text: &str) {
        match self.open_part.as_mut() {
            Some(part) => append_text(&mut part.intro, text),
            None => append_text(&mut self.chapter.intro, text),
        }
    }

    fn close_article(&mut self) {
        let Some(open) = self.open_article.take() else {
            return;
        };
        let article = open.finish();
        tracing::trace!(
            chapter = self.chapter.number,
            article = article.number,
            clauses = article.clauses.len(),
            "Closed article"
        );
        match self.open_part.as_mut() {
            Some(part) => part.articles.push(article),
            None => self.chapter.articles.push(article),
        }
    }

    fn close_part(&mut self) {
        if let Some(part) = self.open_part.take() {
            self.chapter.parts.push(part);
        }
    }
}
