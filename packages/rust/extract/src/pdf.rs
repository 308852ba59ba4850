//! PDF extractor.
//!
//! Pages are extracted one at a time so a single corrupt page only costs its
//! own text.

use tracing::warn;

use docsplit_shared::{DocsplitError, PageFailure, Result, SourceFormat, TextEncoding};

use super::{Extraction, Extractor, owned_lines};

/// Extracts per-page text in page order using `lopdf`.
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn supports(&self, format: SourceFormat) -> bool {
        format == SourceFormat::Pdf
    }

    fn extract(&self, bytes: &[u8], _encodings: &[TextEncoding]) -> Result<Extraction> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| DocsplitError::extraction("pdf", format!("failed to load PDF: {e}")))?;

        let pages = doc.get_pages();
        let (text, page_failures) = join_pages(
            pages
                .keys()
                .map(|&page| (page, doc.extract_text(&[page]).map_err(|e| e.to_string()))),
        );

        Ok(Extraction {
            lines: owned_lines(&text),
            encoding: None,
            page_failures,
        })
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

/// Concatenate per-page extraction results in page order.
///
/// Every page contributes its text followed by `\n`. A failed page counts as
/// empty text, so it still adds a blank line, and is returned as a
/// [`PageFailure`].
pub fn join_pages<I>(pages: I) -> (String, Vec<PageFailure>)
where
    I: IntoIterator<Item = (u32, std::result::Result<String, String>)>,
{
    let mut text = String::new();
    let mut failures = Vec::new();

    for (page, result) in pages {
        match result {
            Ok(page_text) => text.push_str(&page_text),
            Err(message) => {
                warn!(page, error = %message, "failed to extract page text, continuing");
                failures.push(PageFailure { page, message });
            }
        }
        text.push('\n');
    }

    (text, failures)
}
