//! Serializing documents to disk and reading them back.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ParserError, Result};
use crate::types::Document;
use crate::yaml::{generate_yaml, parse_yaml};

/// Serialization format for a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentFormat {
    /// yamllint-friendly YAML.
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension (`yaml`, `yml`, `json`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ParserError::UnsupportedFormat(extension)),
        }
    }

    /// Serialize a document in this format.
    pub fn render(self, document: &Document) -> Result<String> {
        match self {
            Self::Yaml => generate_yaml(document),
            Self::Json => {
                let mut json = serde_json::to_string_pretty(document)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Deserialize a document in this format.
    pub fn parse(self, content: &str) -> Result<Document> {
        match self {
            Self::Yaml => parse_yaml(content),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// Save a document to `path`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then
/// renames, so a failed run never leaves a partial file behind. Parent
/// directories are created as needed.
///
/// # Returns
/// The path written.
pub fn save_document(document: &Document, path: &Path, format: DocumentFormat) -> Result<PathBuf> {
    // Render before touching the filesystem
    let content = format.render(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Saved document");

    Ok(path.to_path_buf())
}

/// Load a document saved with [`save_document`], choosing the format from
/// the file extension.
pub fn load_document(path: &Path) -> Result<Document> {
    let format = DocumentFormat::from_path(path)?;
    if !path.exists() {
        return Err(ParserError::InputNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    format.parse(&content)
}
