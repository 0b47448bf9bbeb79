//! End-to-end tests for the segmentation pipeline.
//!
//! Runs the parser over an excerpt of the Constitution of Kenya, 2010 that
//! covers every structural level: preamble, chapters, parts, articles,
//! clauses, sub-clauses and mini-clauses, plus running page headers and the
//! schedules that follow the body.

use std::fs;
use std::path::{Path, PathBuf};

use katiba_parser::config::{DEFAULT_PAGE_HEADER_PATTERN, DEFAULT_STOP_MARKER_PATTERN};
use katiba_parser::text::normalize_title;
use katiba_parser::types::{Article, Document, ScheduleItem};
use katiba_parser::yaml::{generate_yaml, parse_yaml};
use katiba_parser::{
    classify, load_document, parse_file, save_document, segment, DocumentFormat, LineKind,
    ParseOptions,
};
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("constitution_sample.txt")
}

/// Load fixture file content.
fn load_fixture() -> String {
    let path = fixture_path();
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Options used by the published parse: headers stripped, schedules split off.
fn full_options() -> ParseOptions {
    ParseOptions::new()
        .with_page_header(DEFAULT_PAGE_HEADER_PATTERN)
        .unwrap()
        .with_stop_marker(DEFAULT_STOP_MARKER_PATTERN)
        .unwrap()
}

fn article<'a>(doc: &'a Document, number: u32) -> &'a Article {
    doc.article(number)
        .unwrap_or_else(|| panic!("Article {number} not found"))
}

/// Every piece of text held anywhere in the document, one entry per field.
fn collect_text(doc: &Document) -> Vec<String> {
    let mut out = vec![doc.preamble.clone()];
    for chapter in &doc.chapters {
        out.push(chapter.title.clone());
        out.push(chapter.intro.clone());
        for part in &chapter.parts {
            out.push(part.title.clone());
            out.push(part.intro.clone());
        }
        for article in chapter.all_articles() {
            out.push(article.title.clone());
            for clause in &article.clauses {
                out.push(clause.text.clone());
                for sub in &clause.sub_clauses {
                    out.push(sub.text.clone());
                    out.extend(sub.mini_clauses.iter().map(|m| m.text.clone()));
                }
            }
        }
    }
    out
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn test_preamble() {
    let doc = segment(&load_fixture(), &full_options());
    assert_eq!(
        doc.preamble,
        "We, the people of Kenya— ACKNOWLEDGING the supremacy of the Almighty God of all \
         creation: ADOPT, ENACT and give this Constitution to ourselves and to our future \
         generations. GOD BLESS KENYA"
    );
}

#[test]
fn test_chapters_in_order() {
    let doc = segment(&load_fixture(), &full_options());

    let chapters: Vec<(u32, &str)> = doc
        .chapters
        .iter()
        .map(|c| (c.number, c.title.as_str()))
        .collect();
    assert_eq!(
        chapters,
        vec![
            (1, "SOVEREIGNTY OF THE PEOPLE AND SUPREMACY OF THIS CONSTITUTION"),
            (2, "THE REPUBLIC"),
            (4, "THE BILL OF RIGHTS"),
            (8, "THE LEGISLATURE"),
        ]
    );
}

#[test]
fn test_articles_in_order() {
    let doc = segment(&load_fixture(), &full_options());

    let numbers: Vec<u32> = doc.articles().map(|(_, a)| a.number).collect();
    assert_eq!(numbers, vec![1, 2, 4, 5, 19, 26, 50, 93, 99]);

    assert_eq!(article(&doc, 1).title, "Sovereignty of the people");
    assert_eq!(article(&doc, 26).title, "Right to life");
}

#[test]
fn test_parts_hold_their_articles() {
    let doc = segment(&load_fixture(), &full_options());

    let rights = doc.chapter(4).unwrap();
    assert!(rights.articles.is_empty());
    assert_eq!(rights.parts.len(), 2);
    assert_eq!(rights.parts[0].number, 1);
    assert_eq!(
        rights.parts[0].title,
        "GENERAL PROVISIONS RELATING TO THE BILL OF RIGHTS"
    );
    let part_two: Vec<u32> = rights.parts[1].articles.iter().map(|a| a.number).collect();
    assert_eq!(part_two, vec![26, 50]);

    assert_eq!(doc.chapter_for_article(50).unwrap().number, 4);
}

#[test]
fn test_wrapped_clause_lines_are_joined() {
    let doc = segment(&load_fixture(), &full_options());

    let sovereignty = article(&doc, 1);
    assert_eq!(sovereignty.clauses.len(), 2);
    assert_eq!(
        sovereignty.clauses[0].text,
        "All sovereign power belongs to the people of Kenya and shall be exercised only in \
         accordance with this Constitution."
    );
}

#[test]
fn test_article_without_clauses_gets_synthetic_clause() {
    let doc = segment(&load_fixture(), &full_options());

    let declaration = article(&doc, 4);
    assert_eq!(declaration.clauses.len(), 1);
    assert_eq!(declaration.clauses[0].number, "");
    assert_eq!(declaration.clauses[0].text, "Kenya is a sovereign Republic.");

    let territory = article(&doc, 5);
    assert_eq!(territory.clauses.len(), 1);
    assert!(territory.clauses[0].is_synthetic());
    assert!(territory.clauses[0]
        .text
        .ends_with("effective date, and any additional territory and territorial waters as defined by an Act of Parliament."));
}

#[test]
fn test_sub_clauses() {
    let doc = segment(&load_fixture(), &full_options());

    let life = article(&doc, 26);
    let numbers: Vec<&str> = life.clauses.iter().map(|c| c.number.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2", "3", "4"]);

    let abortion = &life.clauses[3];
    assert_eq!(abortion.text, "Abortion is not permitted unless—");
    let labels: Vec<&str> = abortion.sub_clauses.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b"]);
    assert_eq!(
        abortion.sub_clauses[1].text,
        "the life or health of the mother is in danger."
    );
}

#[test]
fn test_letter_i_after_h_is_a_sub_clause() {
    let doc = segment(&load_fixture(), &full_options());

    let hearing = &article(&doc, 50).clauses[0];
    assert_eq!(hearing.number, "2");
    let labels: Vec<&str> = hearing.sub_clauses.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "h", "i", "j"]);
    assert!(hearing.sub_clauses.iter().all(|s| s.mini_clauses.is_empty()));
}

#[test]
fn test_mini_clauses() {
    let doc = segment(&load_fixture(), &full_options());

    let clause = &article(&doc, 99).clauses[0];
    assert_eq!(clause.number, "3");
    assert_eq!(clause.sub_clauses.len(), 1);

    let minis: Vec<(&str, u32)> = clause.sub_clauses[0]
        .mini_clauses
        .iter()
        .map(|m| (m.numeral.as_str(), m.number))
        .collect();
    assert_eq!(minis, vec![("i", 1), ("ii", 2), ("iii", 3)]);
    assert_eq!(
        clause.sub_clauses[0].mini_clauses[2].text,
        "the judgment has been confirmed."
    );
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_page_headers_kept_without_stripping() {
    let doc = segment(&load_fixture(), &ParseOptions::new());
    assert_eq!(
        article(&doc, 2).clauses[0].text,
        "This Constitution is the supreme law of the Republic. Constitution of Kenya, 2010 12"
    );

    let stripped = segment(&load_fixture(), &full_options());
    assert_eq!(
        article(&stripped, 2).clauses[0].text,
        "This Constitution is the supreme law of the Republic."
    );
}

#[test]
fn test_schedules_parsed_without_stop_marker() {
    let doc = segment(&load_fixture(), &ParseOptions::new());

    // The schedule heading runs into the last mini-clause and the county list
    // reads as articles
    let legislature = doc.chapter(8).unwrap();
    let numbers: Vec<u32> = legislature.parts[0].articles.iter().map(|a| a.number).collect();
    assert_eq!(numbers, vec![93, 99, 1, 2, 3]);
    assert!(doc.schedules.is_empty());

    let stopped = segment(&load_fixture(), &full_options());
    let numbers: Vec<u32> = stopped.chapter(8).unwrap().parts[0]
        .articles
        .iter()
        .map(|a| a.number)
        .collect();
    assert_eq!(numbers, vec![93, 99]);
    assert!(!collect_text(&stopped).iter().any(|t| t.contains("SCHEDULE")));
    assert_eq!(stopped.schedules.len(), 2);
}

#[test]
fn test_schedules_after_stop_marker() {
    let doc = segment(&load_fixture(), &full_options());
    let item = |label: &str, text: &str| ScheduleItem {
        label: label.to_string(),
        text: text.to_string(),
    };

    let counties = doc.schedule(1).unwrap();
    assert_eq!(counties.title, "COUNTIES");
    assert_eq!(counties.reference, "Article 6 (1)");
    assert_eq!(
        counties.items,
        vec![item("1", "Mombasa."), item("2", "Kwale."), item("3", "Kilifi.")]
    );

    let symbols = doc.schedule(2).unwrap();
    assert_eq!(symbols.title, "NATIONAL SYMBOLS");
    assert_eq!(symbols.reference, "Article 9 (2)");
    assert_eq!(
        symbols.items,
        vec![item("a", "The National Flag"), item("b", "The National Anthem")]
    );

    assert!(doc.schedule(3).is_none());
}

#[test]
fn test_parallel_matches_sequential() {
    let text = load_fixture();
    let sequential = segment(&text, &full_options());
    let parallel = segment(&text, &full_options().with_parallel(true));
    assert_eq!(parallel, sequential);
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_no_text_lost() {
    let text = load_fixture();
    let doc = segment(&text, &ParseOptions::new());
    let held = collect_text(&doc);
    let contains = |needle: &str| held.iter().any(|t| t.contains(needle));

    // Everything after the first chapter heading must survive somewhere
    let body = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .skip_while(|l| !matches!(classify(l), LineKind::ChapterStart { .. }));

    for line in body {
        let needle = match classify(line) {
            LineKind::ChapterStart { title, .. }
            | LineKind::PartStart { title, .. }
            | LineKind::ArticleStart { title, .. } => normalize_title(&title),
            LineKind::ClauseStart { remainder, .. }
            | LineKind::SubClauseStart { remainder, .. }
            | LineKind::MiniClauseStart { remainder, .. } => remainder,
            LineKind::Continuation { text } => text,
        };
        assert!(contains(&needle), "Lost line: {line}");
    }
}

#[test]
fn test_every_article_has_a_clause() {
    let doc = segment(&load_fixture(), &ParseOptions::new());
    for (chapter, article) in doc.articles() {
        assert!(
            !article.clauses.is_empty(),
            "Article {} in chapter {} has no clauses",
            article.number,
            chapter.number
        );
    }
}

#[test]
fn test_titles_are_normalized() {
    let doc = segment(&load_fixture(), &full_options());
    for (_, article) in doc.articles() {
        assert_eq!(normalize_title(&article.title), article.title);
        assert!(!article.title.ends_with('.'));
    }
}

#[test]
fn test_statistics() {
    let stats = segment(&load_fixture(), &full_options()).statistics();
    assert_eq!(stats.chapters, 4);
    assert_eq!(stats.parts, 3);
    assert_eq!(stats.articles, 9);
    assert_eq!(stats.clauses, 14);
    assert_eq!(stats.sub_clauses, 7);
    assert_eq!(stats.mini_clauses, 3);
    assert_eq!(stats.schedules, 2);
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn test_parse_file_and_yaml_round_trip() {
    let doc = parse_file(&fixture_path(), &full_options()).unwrap();

    let yaml = generate_yaml(&doc).unwrap();
    assert!(yaml.starts_with("---\n"));
    assert!(yaml.contains("subClauses:"));
    assert!(yaml.contains("miniClauses:"));
    assert!(yaml.contains("schedules:"));

    assert_eq!(parse_yaml(&yaml).unwrap(), doc);
}

#[test]
fn test_saved_documents_load_back() {
    let doc = parse_file(&fixture_path(), &full_options()).unwrap();
    let temp_dir = tempfile::tempdir().unwrap();

    for (name, format) in [
        ("constitution.yaml", DocumentFormat::Yaml),
        ("constitution.json", DocumentFormat::Json),
    ] {
        let path = temp_dir.path().join(name);
        save_document(&doc, &path, format).unwrap();
        assert_eq!(load_document(&path).unwrap(), doc);
    }
}

#[test]
fn test_search_over_parsed_document() {
    let doc = segment(&load_fixture(), &full_options());

    let hits: Vec<u32> = doc.search("PARLIAMENT").iter().map(|h| h.article.number).collect();
    assert_eq!(hits, vec![5, 93, 99]);

    let summary = doc.context_summary();
    assert!(summary.contains("CHAPTER 8: THE LEGISLATURE"));
    assert!(summary.contains("  Article 99: Qualifications for election as member of Parliament"));
    assert!(summary.contains("  Schedule 2: NATIONAL SYMBOLS"));
}
