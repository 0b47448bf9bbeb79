//! Main parser service that ties reading, segmentation and output together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ParseOptions;
use crate::error::{ParserError, Result};
use crate::output::{save_document, DocumentFormat};
use crate::segmenter::segment;
use crate::types::Document;

/// Read a linearized constitution text file and segment it.
///
/// # Errors
/// [`ParserError::InputNotFound`] when the file does not exist, or an IO
/// error when it cannot be read.
pub fn parse_file(input: &Path, options: &ParseOptions) -> Result<Document> {
    if !input.is_file() {
        return Err(ParserError::InputNotFound(input.to_path_buf()));
    }

    let text = fs::read_to_string(input)?;
    tracing::info!(path = %input.display(), bytes = text.len(), "Read input text");

    Ok(segment(&text, options))
}

/// Parse `input` and write the document to `output`.
///
/// Nothing is written when the input cannot be read.
///
/// # Returns
/// The parsed document and the path written.
pub fn parse_to_file(
    input: &Path,
    output: &Path,
    format: DocumentFormat,
    options: &ParseOptions,
) -> Result<(Document, PathBuf)> {
    let document = parse_file(input, options)?;
    let path = save_document(&document, output, format)?;
    Ok((document, path))
}
