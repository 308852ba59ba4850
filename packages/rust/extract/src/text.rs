//! Plain text and Markdown extractor.

use docsplit_shared::{Result, SourceFormat, TextEncoding};

use super::{Extraction, Extractor, decode_text, owned_lines};

/// Decodes text bytes through the encoding fallback chain.
pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn supports(&self, format: SourceFormat) -> bool {
        matches!(format, SourceFormat::Plain | SourceFormat::Markdown)
    }

    fn extract(&self, bytes: &[u8], encodings: &[TextEncoding]) -> Result<Extraction> {
        let (text, encoding) = decode_text(bytes, encodings)?;

        Ok(Extraction {
            lines: owned_lines(&text),
            encoding: Some(encoding),
            page_failures: Vec::new(),
        })
    }

    fn name(&self) -> &str {
        "text"
    }
}
