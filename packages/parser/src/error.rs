//! Error types for the parser.
//!
//! Segmentation itself never fails: every line has a defined transition.
//! Errors come from the edges (reading input, writing output, user-supplied
//! patterns and lookups).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Input text file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// A user-supplied line pattern is not a valid regex.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Output format could not be determined or is not supported.
    #[error("Unsupported document format: '{0}'. Expected yaml, yml or json")]
    UnsupportedFormat(String),

    /// No chapter with the requested number.
    #[error("Chapter {0} not found")]
    ChapterNotFound(u32),

    /// No article with the requested number.
    #[error("Article {0} not found")]
    ArticleNotFound(u32),

    /// No schedule with the requested number.
    #[error("Schedule {0} not found")]
    ScheduleNotFound(u32),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;
