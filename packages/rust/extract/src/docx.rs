//! DOCX extractor.

use docsplit_shared::{DocsplitError, Result, SourceFormat, TextEncoding};

use super::{Extraction, Extractor, owned_lines};

/// Extracts top-level paragraph text in document order.
///
/// Paragraphs are joined with `\n`. Run formatting, tables and images are
/// discarded; empty paragraphs become empty lines.
pub struct DocxExtractor;

impl Extractor for DocxExtractor {
    fn supports(&self, format: SourceFormat) -> bool {
        format == SourceFormat::Docx
    }

    fn extract(&self, bytes: &[u8], _encodings: &[TextEncoding]) -> Result<Extraction> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| DocsplitError::extraction("docx", format!("parse error: {e}")))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        Ok(Extraction {
            lines: owned_lines(&paragraphs.join("\n")),
            encoding: None,
            page_failures: Vec::new(),
        })
    }

    fn name(&self) -> &str {
        "docx"
    }
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut content = String::new();
    push_children_text(&paragraph.children, &mut content);
    content
}

/// Runs may sit directly in the paragraph or inside a hyperlink.
fn push_children_text(children: &[docx_rs::ParagraphChild], content: &mut String) {
    for para_child in children {
        match para_child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, content),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                push_children_text(&link.children, content);
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &docx_rs::Run, content: &mut String) {
    for run_child in &run.children {
        match run_child {
            docx_rs::RunChild::Text(text) => content.push_str(&text.text),
            docx_rs::RunChild::Tab(_) => content.push('\t'),
            docx_rs::RunChild::Break(_) => content.push('\n'),
            _ => {}
        }
    }
}
