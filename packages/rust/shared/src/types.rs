//! Core domain types for a single cleaning run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DocsplitError, Result};

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one pipeline run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// SourceFormat
// ---------------------------------------------------------------------------

/// Source format of an input document, chosen from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Plain,
    Markdown,
    Docx,
    Pdf,
}

impl SourceFormat {
    /// Pick the format from a file name. Content is never sniffed:
    /// `.docx` and `.pdf` win, `.md`/`.markdown` are Markdown, everything
    /// else takes the plain-text path.
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("docx") => Self::Docx,
            Some("pdf") => Self::Pdf,
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::Plain,
        }
    }

    /// Short lowercase label used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Markdown => "markdown",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A raw input document. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Document {
    file_name: String,
    format: SourceFormat,
    bytes: Vec<u8>,
}

impl Document {
    /// Wrap raw bytes, dispatching the format from `file_name`.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let format = SourceFormat::from_file_name(&file_name);
        Self {
            file_name,
            format,
            bytes,
        }
    }

    /// Read a document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| DocsplitError::io(path, e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

/// A contiguous slice of the cleaned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// 1-based ordinal establishing output order.
    pub index: usize,
    /// The chunk text, exactly as sliced from the cleaned text.
    pub text: String,
}

impl Chunk {
    /// Encoded UTF-8 size in bytes.
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Length in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

// ---------------------------------------------------------------------------
// PageFailure
// ---------------------------------------------------------------------------

/// A PDF page that yielded no text. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    /// 1-based page number.
    pub page: u32,
    /// Extraction error message.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// A serialized, downloadable output.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Encoded artifact contents.
    pub bytes: Vec<u8>,
    /// Suggested file name (e.g. `cleaned_output.zip`).
    pub file_name: String,
    /// MIME type label for the format.
    pub mime_type: &'static str,
}
