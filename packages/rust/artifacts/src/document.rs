//! Structured DOCX serializer.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType};

use docsplit_shared::{Chunk, DocsplitError, Result, split_lines};

const HEADING_STYLE: &str = "Heading1";

/// Render chunks into one DOCX document.
///
/// With more than one chunk, each chunk gets a `Part {n}` heading and a page
/// break after it (except the last). Chunk text becomes one paragraph per
/// blank-line separated block.
pub fn render_docx(chunks: &[Chunk]) -> Result<Vec<u8>> {
    let sectioned = chunks.len() > 1;

    let mut docx = Docx::new().add_style(
        Style::new(HEADING_STYLE, StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold(),
    );

    for (position, chunk) in chunks.iter().enumerate() {
        if sectioned {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!("Part {}", chunk.index)))
                    .style(HEADING_STYLE),
            );
        }

        for paragraph in segment_paragraphs(&chunk.text) {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(paragraph)));
        }

        if sectioned && position + 1 < chunks.len() {
            docx = docx
                .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| DocsplitError::serialization("docx", e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Split text into paragraphs at blank lines, collapsing whitespace inside
/// each paragraph. Blank-only text yields no paragraphs.
pub fn segment_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in split_lines(text) {
        if line.trim().is_empty() {
            flush_paragraph(&mut current, &mut paragraphs);
        } else {
            current.push(line);
        }
    }
    flush_paragraph(&mut current, &mut paragraphs);

    paragraphs
}

fn flush_paragraph(lines: &mut Vec<&str>, paragraphs: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }
    let words: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
    paragraphs.push(words.join(" "));
    lines.clear();
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use docsplit_extract::{DocxExtractor, Extractor};
    use docsplit_shared::TextEncoding;

    use super::*;
    use pretty_assertions::assert_eq;

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("open docx");
        let mut file = archive.by_name("word/document.xml").expect("document.xml");
        let mut xml = String::new();
        file.read_to_string(&mut xml).expect("read xml");
        xml
    }

    fn chunk(index: usize, text: &str) -> Chunk {
        Chunk {
            index,
            text: text.into(),
        }
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let paragraphs = segment_paragraphs("line one\nline   two\n\n \n\nnext\tpara\n");
        assert_eq!(paragraphs, vec!["line one line two", "next para"]);
    }

    #[test]
    fn blank_text_has_no_paragraphs() {
        assert!(segment_paragraphs("").is_empty());
        assert!(segment_paragraphs("\n  \n").is_empty());
    }

    #[test]
    fn single_chunk_has_no_heading_or_break() {
        let bytes = render_docx(&[chunk(1, "Alpha\n\nBeta\n")]).expect("render");
        let xml = document_xml(&bytes);

        assert!(!xml.contains("Part 1"));
        assert!(!xml.contains(r#"w:type="page""#));

        let extraction = DocxExtractor
            .extract(&bytes, &TextEncoding::DEFAULT_CHAIN)
            .expect("read back");
        assert_eq!(extraction.lines, vec!["Alpha\n", "Beta"]);
    }

    #[test]
    fn multiple_chunks_get_headings_and_breaks_between() {
        let chunks = vec![chunk(1, "Alpha\n"), chunk(2, "Beta\n"), chunk(3, "Gamma\n")];
        let bytes = render_docx(&chunks).expect("render");
        let xml = document_xml(&bytes);

        assert_eq!(xml.matches(r#"w:type="page""#).count(), 2);
        assert_eq!(xml.matches(r#"w:val="Heading1""#).count(), 3);

        let extraction = DocxExtractor
            .extract(&bytes, &TextEncoding::DEFAULT_CHAIN)
            .expect("read back");
        let text = extraction.lines.concat();
        let order: Vec<usize> = ["Part 1", "Alpha", "Part 2", "Beta", "Part 3", "Gamma"]
            .iter()
            .map(|needle| text.find(needle).expect("text present"))
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "out of order: {text:?}");
    }

    #[test]
    fn empty_document_is_valid() {
        let bytes = render_docx(&[]).expect("render");
        let extraction = DocxExtractor
            .extract(&bytes, &TextEncoding::DEFAULT_CHAIN)
            .expect("read back");
        assert!(extraction.lines.concat().trim().is_empty());
    }
}
