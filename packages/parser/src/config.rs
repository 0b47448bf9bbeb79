//! Configuration constants and parse options.

use regex::Regex;

use crate::error::{ParserError, Result};

/// Default input path, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "docs/constitution_raw_text.txt";

/// Default output path, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "constitution.yaml";

/// Marker that opens the preamble.
pub const PREAMBLE_MARKER: &str = "PREAMBLE";

/// Marker that closes the preamble (the first chapter heading).
pub const CHAPTER_MARKER: &str = "CHAPTER";

/// Running header printed on every page of the Kenyan constitution.
pub const DEFAULT_PAGE_HEADER_PATTERN: &str = r"(?i)^Constitution of Kenya,\s*2010\s*\d*$";

/// Start of the schedules. Lines after it are split into schedules, not chapters.
pub const DEFAULT_STOP_MARKER_PATTERN: &str = r"(?i)^SCHEDULES\b";

/// Title printed at the top of the context summary.
pub const SUMMARY_TITLE: &str = "CONSTITUTION OF KENYA, 2010";

/// Number of preamble characters included in the context summary.
pub const SUMMARY_PREAMBLE_CHARS: usize = 500;

/// Number of clause characters included per article in the context summary.
pub const SUMMARY_CLAUSE_CHARS: usize = 200;

/// Text wrap width for terminal output.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Options controlling how raw text is prepared and segmented.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Lines matching this pattern are removed before segmentation.
    pub page_header: Option<Regex>,

    /// The body ends at the first line matching this pattern; what follows
    /// is parsed as schedules.
    pub stop_marker: Option<Regex>,

    /// Segment chapter bodies in parallel.
    pub parallel: bool,
}

impl ParseOptions {
    /// Create options with everything switched off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip lines matching `pattern`.
    pub fn with_page_header(mut self, pattern: &str) -> Result<Self> {
        self.page_header = Some(compile_pattern(pattern)?);
        Ok(self)
    }

    /// End the body at the first line matching `pattern`.
    pub fn with_stop_marker(mut self, pattern: &str) -> Result<Self> {
        self.stop_marker = Some(compile_pattern(pattern)?);
        Ok(self)
    }

    /// Set whether chapter bodies are segmented in parallel.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Compile a user-supplied line pattern.
///
/// # Examples
/// ```
/// use katiba_parser::config::compile_pattern;
///
/// assert!(compile_pattern(r"^Page \d+$").is_ok());
/// assert!(compile_pattern("(").is_err());
/// ```
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ParserError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_off() {
        let options = ParseOptions::new();
        assert!(options.page_header.is_none());
        assert!(options.stop_marker.is_none());
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_page_header_pattern() {
        let options = ParseOptions::new()
            .with_page_header(DEFAULT_PAGE_HEADER_PATTERN)
            .unwrap();
        let re = options.page_header.unwrap();
        assert!(re.is_match("Constitution of Kenya, 2010"));
        assert!(re.is_match("Constitution of Kenya, 2010 17"));
        assert!(!re.is_match("This Constitution of Kenya, 2010 shall bind all"));
    }

    #[test]
    fn test_default_stop_marker_pattern() {
        let options = ParseOptions::new()
            .with_stop_marker(DEFAULT_STOP_MARKER_PATTERN)
            .unwrap();
        let re = options.stop_marker.unwrap();
        assert!(re.is_match("SCHEDULES"));
        assert!(re.is_match("SCHEDULES FIRST SCHEDULE"));
        assert!(!re.is_match("the Schedules to this Constitution"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = ParseOptions::new().with_page_header("[unclosed");
        assert!(matches!(result, Err(ParserError::InvalidPattern { .. })));
    }
}
