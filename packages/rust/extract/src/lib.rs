//! Per-format text extraction.
//!
//! Each source format has an [`Extractor`] implementation that turns raw
//! document bytes into an ordered line sequence. The [`ExtractorRegistry`]
//! routes a [`Document`] to its extractor by the format chosen from the file
//! name; content is never sniffed.

mod decode;
mod docx;
mod pdf;
mod text;

use tracing::{debug, instrument};

use docsplit_shared::{Document, DocsplitError, PageFailure, Result, SourceFormat, TextEncoding};

pub use decode::decode_text;
pub use docx::DocxExtractor;
pub use pdf::{PdfExtractor, join_pages};
pub use text::TextExtractor;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Text extracted from a document, ready for line-ordered cleaning.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Lines in document order, terminators preserved.
    pub lines: Vec<String>,
    /// Encoding that decoded the bytes (plain text and Markdown only).
    pub encoding: Option<TextEncoding>,
    /// PDF pages that yielded no text.
    pub page_failures: Vec<PageFailure>,
}

/// Trait for format-specific text extraction.
pub trait Extractor: Send + Sync {
    /// Whether this extractor handles `format`.
    fn supports(&self, format: SourceFormat) -> bool;

    /// Extract lines from raw bytes. `encodings` is the decoding fallback
    /// chain for text formats; binary formats ignore it.
    fn extract(&self, bytes: &[u8], encodings: &[TextEncoding]) -> Result<Extraction>;

    /// Human-readable extractor name for tracing.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds the registered extractors.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Create a registry with all built-in extractors.
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(DocxExtractor),
                Box::new(PdfExtractor),
                Box::new(TextExtractor),
            ],
        }
    }

    /// Find the extractor for `format`.
    pub fn for_format(&self, format: SourceFormat) -> Result<&dyn Extractor> {
        self.extractors
            .iter()
            .find(|e| e.supports(format))
            .map(|e| e.as_ref())
            .ok_or_else(|| DocsplitError::extraction(format.as_str(), "no extractor registered"))
    }

    /// Extract a document with the extractor matching its format.
    #[instrument(skip_all, fields(file = %doc.file_name(), format = %doc.format()))]
    pub fn extract(&self, doc: &Document, encodings: &[TextEncoding]) -> Result<Extraction> {
        let extractor = self.for_format(doc.format())?;
        let extraction = extractor.extract(doc.bytes(), encodings)?;

        debug!(
            extractor = extractor.name(),
            lines = extraction.lines.len(),
            failed_pages = extraction.page_failures.len(),
            "extraction complete"
        );

        Ok(extraction)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Split extracted text into owned, terminator-preserving lines.
fn owned_lines(text: &str) -> Vec<String> {
    docsplit_shared::split_lines(text)
        .into_iter()
        .map(str::to_owned)
        .collect()
}
