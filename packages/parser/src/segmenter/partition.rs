//! First pass: input preparation, preamble extraction and chapter spans.

use crate::classifier::{classify, resolve_chapter_number, LineKind};
use crate::config::{ParseOptions, CHAPTER_MARKER, PREAMBLE_MARKER};
use crate::text::{collapse_whitespace, normalize_unicode};
use crate::types::Chapter;

/// A classified, trimmed, non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Trimmed source text.
    pub text: String,

    /// Structural meaning of the line.
    pub kind: LineKind,
}

/// A chapter heading together with the lines of its body.
#[derive(Debug, Clone)]
pub struct ChapterSpan {
    /// Chapter with number and title resolved, but no content yet.
    pub chapter: Chapter,

    /// Lines from after the heading up to the next heading.
    pub body: Vec<ClassifiedLine>,
}

/// Prepared input, split at the stop marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedLines {
    /// Lines of the preamble and chapters.
    pub body: Vec<String>,

    /// Lines after the stop marker; empty when no marker is set or found.
    pub trailer: Vec<String>,
}

/// Prepare raw text for segmentation.
///
/// Normalizes to NFC, trims every line, drops blank lines and lines matching
/// the page-header pattern, and splits at the stop marker. Text sharing a
/// line with the marker, after it, starts the trailer.
#[must_use]
pub fn prepare_lines(text: &str, options: &ParseOptions) -> PreparedLines {
    let text = normalize_unicode(text);
    let mut prepared = PreparedLines::default();
    let mut in_trailer = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = &options.page_header {
            if header.is_match(line) {
                continue;
            }
        }
        if in_trailer {
            prepared.trailer.push(line.to_string());
            continue;
        }
        if let Some(marker) = options.stop_marker.as_ref().and_then(|re| re.find(line)) {
            tracing::debug!(line = %line, "Stop marker reached");
            in_trailer = true;
            let rest = line[marker.end()..].trim();
            if !rest.is_empty() {
                prepared.trailer.push(rest.to_string());
            }
            continue;
        }
        prepared.body.push(line.to_string());
    }

    prepared
}

/// Extract the preamble from the text between the `PREAMBLE` marker and the
/// first `CHAPTER` marker after it, with whitespace collapsed.
///
/// Both markers match in any ASCII case, like chapter headings do. Returns an
/// empty string when either marker is missing.
///
/// # Examples
/// ```
/// use katiba_parser::segmenter::extract_preamble;
///
/// let text = "PREAMBLE\nWe, the people of Kenya\nCHAPTER ONE - SOVEREIGNTY";
/// assert_eq!(extract_preamble(text), "We, the people of Kenya");
/// assert_eq!(extract_preamble("no markers here"), "");
/// ```
#[must_use]
pub fn extract_preamble(text: &str) -> String {
    // ASCII lowercasing keeps byte offsets, so positions map back onto `text`
    let folded = text.to_ascii_lowercase();
    let Some(start) = folded.find(&PREAMBLE_MARKER.to_ascii_lowercase()) else {
        return String::new();
    };
    let start = start + PREAMBLE_MARKER.len();
    let Some(end) = folded[start..].find(&CHAPTER_MARKER.to_ascii_lowercase()) else {
        return String::new();
    };
    collapse_whitespace(&text[start..start + end])
}

/// Split the classified lines into chapter spans.
///
/// Lines before the first chapter heading are not part of any chapter (they
/// hold the title page and preamble). Text sharing a line with a chapter
/// heading but preceding it is kept at the end of the previous chapter.
#[must_use]
pub fn partition_chapters(lines: &[String]) -> Vec<ChapterSpan> {
    let mut spans: Vec<ChapterSpan> = Vec::new();

    for line in lines {
        let kind = classify(line);
        match kind {
            LineKind::ChapterStart {
                lead,
                number_token,
                title,
            } => {
                if !lead.is_empty() {
                    if let Some(previous) = spans.last_mut() {
                        previous.body.push(ClassifiedLine {
                            kind: LineKind::Continuation { text: lead.clone() },
                            text: lead,
                        });
                    }
                }
                let number = resolve_chapter_number(&number_token, spans.len());
                tracing::debug!(chapter = number, title = %title, "Found chapter heading");
                spans.push(ChapterSpan {
                    chapter: Chapter::new(number, title),
                    body: Vec::new(),
                });
            }
            kind => {
                if let Some(current) = spans.last_mut() {
                    current.body.push(ClassifiedLine {
                        text: line.clone(),
                        kind,
                    });
                }
            }
        }
    }

    spans
}
