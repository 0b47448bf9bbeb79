//! Katiba parser - Segment linearized constitution text into a hierarchy.
//!
//! This crate takes the flat text extracted from a constitution (or any
//! similarly structured legal instrument) and turns it into a navigable
//! document: preamble, chapters, parts, articles, clauses, sub-clauses and
//! mini-clauses, with any schedules after the body kept separately. The
//! result serializes to YAML or JSON.
//!
//! # Example
//!
//! ```
//! use katiba_parser::{segment, ParseOptions};
//!
//! let text = "PREAMBLE\nWe the people...\n\
//!             CHAPTER ONE - SOVEREIGNTY\n\
//!             1. Sovereignty of the people\n\
//!             (1) All power belongs to the people.";
//! let document = segment(text, &ParseOptions::new());
//!
//! assert_eq!(document.chapters[0].number, 1);
//! assert_eq!(document.article(1).unwrap().title, "Sovereignty of the people");
//! ```
//!
//! # Architecture
//!
//! - [`classifier`]: Stateless line classification
//! - [`segmenter`]: Chapter partitioning and the per-chapter fold
//! - [`types`]: Document data model
//! - [`query`]: Lookups, search, statistics and summaries
//! - [`text`]: Title and whitespace normalization
//! - [`config`]: Constants and parse options
//! - [`error`]: Error types and Result alias
//! - [`yaml`], [`output`]: Serialization and file IO
//! - [`parser`]: File-to-file parsing service
//! - [`cli`]: Command-line interface

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod query;
pub mod segmenter;
pub mod text;
pub mod types;
pub mod yaml;

// Re-export main functions
pub use parser::{parse_file, parse_to_file};
pub use segmenter::segment;

// Re-export commonly used items
pub use classifier::{classify, LineKind};
pub use config::ParseOptions;
pub use error::{ParserError, Result};
pub use output::{load_document, save_document, DocumentFormat};
pub use query::{ContextSummary, DocumentStats, SearchHit};
pub use segmenter::split_schedules;
pub use text::normalize_title;
pub use types::{
    Article, Chapter, Clause, Document, MiniClause, Part, Schedule, ScheduleItem, SubClause,
};
