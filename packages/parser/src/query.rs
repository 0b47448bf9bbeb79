//! Read-only queries over a parsed [`Document`].
//!
//! These are the lookups the presentation layer performs: by chapter, article
//! or schedule number, free-text search, counts, and a condensed summary used
//! as context for assistants.

use std::fmt;

use serde::Serialize;

use crate::config::{SUMMARY_CLAUSE_CHARS, SUMMARY_PREAMBLE_CHARS, SUMMARY_TITLE};
use crate::error::{ParserError, Result};
use crate::text::preview;
use crate::types::{Article, Chapter, Document, Schedule};

/// An article matched by [`Document::search`], with its chapter.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub chapter: &'a Chapter,
    pub article: &'a Article,
}

/// Entity counts for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub chapters: usize,
    pub parts: usize,
    pub articles: usize,
    pub clauses: usize,
    pub sub_clauses: usize,
    pub mini_clauses: usize,
    pub schedules: usize,
}

/// Condensed outline of a document: preamble preview, every chapter with its
/// articles and a preview of each article's first clause, then the schedule
/// titles.
#[derive(Debug, Clone, Copy)]
pub struct ContextSummary<'a> {
    document: &'a Document,
}

impl fmt::Display for ContextSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = self.document;
        writeln!(f, "{SUMMARY_TITLE}")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f)?;

        if !document.preamble.trim().is_empty() {
            let (head, truncated) = preview(&document.preamble, SUMMARY_PREAMBLE_CHARS);
            writeln!(f, "PREAMBLE:")?;
            writeln!(f, "{head}")?;
            if truncated {
                writeln!(f, "...")?;
            }
            writeln!(f)?;
        }

        for chapter in &document.chapters {
            writeln!(f, "CHAPTER {}: {}", chapter.number, chapter.title)?;
            for article in chapter.all_articles() {
                writeln!(f, "  Article {}: {}", article.number, article.title)?;
                if let Some(clause) = article.clauses.first() {
                    let (head, truncated) = preview(&clause.text, SUMMARY_CLAUSE_CHARS);
                    let ellipsis = if truncated { "..." } else { "" };
                    writeln!(f, "    {head}{ellipsis}")?;
                }
            }
            writeln!(f)?;
        }

        if !document.schedules.is_empty() {
            writeln!(f, "SCHEDULES:")?;
            for schedule in &document.schedules {
                writeln!(f, "  Schedule {}: {}", schedule.number, schedule.title)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Document {
    /// Find a chapter by number.
    #[must_use]
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }

    /// Find a chapter by number, failing with [`ParserError::ChapterNotFound`].
    pub fn require_chapter(&self, number: u32) -> Result<&Chapter> {
        self.chapter(number)
            .ok_or(ParserError::ChapterNotFound(number))
    }

    /// Iterate over every article with its chapter, in document order.
    pub fn articles(&self) -> impl Iterator<Item = (&Chapter, &Article)> {
        self.chapters
            .iter()
            .flat_map(|chapter| chapter.all_articles().map(move |article| (chapter, article)))
    }

    /// Find an article by number (first occurrence).
    #[must_use]
    pub fn article(&self, number: u32) -> Option<&Article> {
        self.articles()
            .find(|(_, article)| article.number == number)
            .map(|(_, article)| article)
    }

    /// Find an article by number, failing with [`ParserError::ArticleNotFound`].
    pub fn require_article(&self, number: u32) -> Result<&Article> {
        self.article(number)
            .ok_or(ParserError::ArticleNotFound(number))
    }

    /// Find the chapter containing an article.
    #[must_use]
    pub fn chapter_for_article(&self, number: u32) -> Option<&Chapter> {
        self.articles()
            .find(|(_, article)| article.number == number)
            .map(|(chapter, _)| chapter)
    }

    /// Find a schedule by number.
    #[must_use]
    pub fn schedule(&self, number: u32) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.number == number)
    }

    /// Find a schedule by number, failing with [`ParserError::ScheduleNotFound`].
    pub fn require_schedule(&self, number: u32) -> Result<&Schedule> {
        self.schedule(number)
            .ok_or(ParserError::ScheduleNotFound(number))
    }

    /// Case-insensitive search over article titles and all clause,
    /// sub-clause and mini-clause text.
    ///
    /// A blank query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.articles()
            .filter(|(_, article)| article_matches(article, &query))
            .map(|(chapter, article)| SearchHit { chapter, article })
            .collect()
    }

    /// Count entities at every level.
    #[must_use]
    pub fn statistics(&self) -> DocumentStats {
        let mut stats = DocumentStats {
            chapters: self.chapters.len(),
            parts: self.chapters.iter().map(|c| c.parts.len()).sum(),
            schedules: self.schedules.len(),
            ..DocumentStats::default()
        };

        for (_, article) in self.articles() {
            stats.articles += 1;
            stats.clauses += article.clauses.len();
            for clause in &article.clauses {
                stats.sub_clauses += clause.sub_clauses.len();
                stats.mini_clauses += clause
                    .sub_clauses
                    .iter()
                    .map(|s| s.mini_clauses.len())
                    .sum::<usize>();
            }
        }

        stats
    }

    /// Outline of the document for display.
    #[must_use]
    pub fn summary(&self) -> ContextSummary<'_> {
        ContextSummary { document: self }
    }

    /// [`Document::summary`] rendered to a string.
    #[must_use]
    pub fn context_summary(&self) -> String {
        self.summary().to_string()
    }
}

fn article_matches(article: &Article, query: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(query);

    contains(&article.title)
        || article.clauses.iter().any(|clause| {
            contains(&clause.text)
                || clause.sub_clauses.iter().any(|sub| {
                    contains(&sub.text) || sub.mini_clauses.iter().any(|m| contains(&m.text))
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Clause, MiniClause, Part, SubClause};

    fn article(number: u32, title: &str, text: &str) -> Article {
        Article {
            number,
            title: title.to_string(),
            clauses: vec![Clause::new("1", text)],
        }
    }

    fn sample() -> Document {
        let mut sovereignty = Chapter::new(1, "SOVEREIGNTY OF THE PEOPLE");
        sovereignty.articles.push(article(
            1,
            "Sovereignty of the people",
            "All sovereign power belongs to the people of Kenya.",
        ));

        let mut rights = Chapter::new(4, "THE BILL OF RIGHTS");
        rights
            .articles
            .push(article(19, "Rights and fundamental freedoms", "The Bill of Rights is integral."));
        let mut part = Part::new(2, "RIGHTS AND FUNDAMENTAL FREEDOMS");
        let mut life = article(26, "Right to life", "Every person has the right to life.");
        let mut sub = SubClause::new("a", "subject to law");
        sub.mini_clauses.push(MiniClause {
            numeral: "i".to_string(),
            number: 1,
            text: "by a competent Court".to_string(),
        });
        life.clauses[0].sub_clauses.push(sub);
        part.articles.push(life);
        rights.parts.push(part);

        let mut counties = Schedule::new(1);
        counties.title = "COUNTIES".to_string();

        Document::new("We, the people of Kenya", vec![sovereignty, rights])
            .with_schedules(vec![counties])
    }

    #[test]
    fn test_chapter_lookup() {
        let doc = sample();
        assert_eq!(doc.chapter(4).unwrap().title, "THE BILL OF RIGHTS");
        assert!(doc.chapter(2).is_none());
        assert!(matches!(
            doc.require_chapter(2),
            Err(ParserError::ChapterNotFound(2))
        ));
    }

    #[test]
    fn test_article_lookup_includes_parts() {
        let doc = sample();
        assert_eq!(doc.article(26).unwrap().title, "Right to life");
        assert_eq!(doc.chapter_for_article(26).unwrap().number, 4);
        assert_eq!(doc.chapter_for_article(1).unwrap().number, 1);
        assert!(doc.article(999).is_none());
        assert!(matches!(
            doc.require_article(999),
            Err(ParserError::ArticleNotFound(999))
        ));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let doc = sample();
        let hits = doc.search("SOVEREIGN POWER");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].article.number, 1);
        assert_eq!(hits[0].chapter.number, 1);
    }

    #[test]
    fn test_search_reaches_nested_text() {
        let doc = sample();
        let hits = doc.search("competent court");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].article.number, 26);
    }

    #[test]
    fn test_search_blank_query() {
        assert!(sample().search("   ").is_empty());
    }

    #[test]
    fn test_search_preserves_order() {
        let doc = sample();
        let numbers: Vec<u32> = doc.search("right").iter().map(|h| h.article.number).collect();
        assert_eq!(numbers, vec![19, 26]);
    }

    #[test]
    fn test_statistics() {
        let stats = sample().statistics();
        assert_eq!(
            stats,
            DocumentStats {
                chapters: 2,
                parts: 1,
                articles: 3,
                clauses: 3,
                sub_clauses: 1,
                mini_clauses: 1,
                schedules: 1,
            }
        );
    }

    #[test]
    fn test_context_summary() {
        let summary = sample().context_summary();
        assert!(summary.starts_with("CONSTITUTION OF KENYA, 2010\n"));
        assert!(summary.contains("PREAMBLE:\nWe, the people of Kenya\n"));
        assert!(summary.contains("CHAPTER 4: THE BILL OF RIGHTS"));
        assert!(summary.contains("  Article 26: Right to life"));
        assert!(summary.contains("    Every person has the right to life.\n"));
        assert!(summary.ends_with("SCHEDULES:\n  Schedule 1: COUNTIES\n\n"));
    }

    #[test]
    fn test_schedule_lookup() {
        let doc = sample();
        assert_eq!(doc.schedule(1).unwrap().title, "COUNTIES");
        assert!(matches!(
            doc.require_schedule(2),
            Err(ParserError::ScheduleNotFound(2))
        ));
    }

    #[test]
    fn test_context_summary_truncates_long_clauses() {
        let long = "x".repeat(SUMMARY_CLAUSE_CHARS + 10);
        let mut chapter = Chapter::new(1, "T");
        chapter.articles.push(article(1, "A", &long));
        let summary = Document::new("", vec![chapter]).context_summary();
        assert!(summary.contains(&format!("    {}...", "x".repeat(SUMMARY_CLAUSE_CHARS))));
        assert!(!summary.contains("PREAMBLE:"));
    }
}
