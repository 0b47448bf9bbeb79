//! Hierarchical segmenter.
//!
//! Two passes over the prepared lines: the first cuts the input into chapter
//! bodies at chapter headings, the second folds each body into articles,
//! clauses, sub-clauses and mini-clauses. Chapter bodies are disjoint, so the
//! second pass may run per chapter in parallel; the result keeps discovery
//! order either way. Lines after the stop marker are split into schedules.

mod partition;
mod schedules;
mod state;

use rayon::prelude::*;

use crate::config::ParseOptions;
use crate::types::{Chapter, Document};

pub use partition::{
    extract_preamble, partition_chapters, prepare_lines, ChapterSpan, ClassifiedLine,
    PreparedLines,
};
pub use schedules::split_schedules;
use state::ChapterState;

/// Segment raw constitution text into a [`Document`].
///
/// Never fails: input without any chapter heading yields a document with an
/// empty chapter list (and whatever preamble could be found).
///
/// # Examples
/// ```
/// use katiba_parser::config::ParseOptions;
/// use katiba_parser::segmenter::segment;
///
/// let text = "PREAMBLE\nWe the people...\nCHAPTER ONE - SOVEREIGNTY\n\
///             1. Sovereignty of the people\n(1) All power belongs to the people.";
/// let doc = segment(text, &ParseOptions::new());
/// assert_eq!(doc.preamble, "We the people...");
/// assert_eq!(doc.chapters[0].articles[0].clauses[0].number, "1");
/// ```
#[must_use]
pub fn segment(text: &str, options: &ParseOptions) -> Document {
    let PreparedLines {
        body: lines,
        trailer,
    } = prepare_lines(text, options);
    let preamble = extract_preamble(&lines.join("\n"));
    let spans = partition_chapters(&lines);
    let schedules = split_schedules(&trailer);

    let chapters: Vec<Chapter> = if options.parallel {
        spans.into_par_iter().map(segment_chapter).collect()
    } else {
        spans.into_iter().map(segment_chapter).collect()
    };

    if chapters.is_empty() {
        tracing::warn!(
            lines = lines.len(),
            "No chapter headings detected, document has no chapters"
        );
    } else {
        tracing::info!(
            chapters = chapters.len(),
            articles = chapters.iter().map(|c| c.all_articles().count()).sum::<usize>(),
            schedules = schedules.len(),
            "Segmented document"
        );
    }

    Document::new(preamble, chapters).with_schedules(schedules)
}

/// Run the inner pass over one chapter body.
#[must_use]
pub fn segment_chapter(span: ChapterSpan) -> Chapter {
    let ChapterSpan { chapter, body } = span;
    let chapter = body
        .into_iter()
        .fold(ChapterState::new(chapter), |state, line| {
            state.apply(&line.text, line.kind)
        })
        .finish();

    tracing::debug!(
        chapter = chapter.number,
        title = %chapter.title,
        articles = chapter.articles.len(),
        parts = chapter.parts.len(),
        "Segmented chapter"
    );
    chapter
}
