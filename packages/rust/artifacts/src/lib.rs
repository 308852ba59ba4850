//! Artifact serializers for the chunk sequence.
//!
//! Renders chunks into one of three containers:
//! - ZIP with one text entry per chunk ([`render_zip`])
//! - a single DOCX with one section per chunk ([`render_docx`])
//! - a CSV table with one row per chunk ([`render_csv`])
//!
//! Every serializer keeps chunk order and accepts an empty chunk list.

mod archive;
mod document;
mod table;

use tracing::{debug, instrument};

use docsplit_shared::{Artifact, Chunk, OutputConfig, OutputFormat, Result};

pub use archive::{entry_name, render_zip};
pub use document::{render_docx, segment_paragraphs};
pub use table::render_csv;

/// Serialize `chunks` into the artifact described by `output`.
#[instrument(skip_all, fields(format = %output.format, chunks = chunks.len()))]
pub fn render(chunks: &[Chunk], output: &OutputConfig) -> Result<Artifact> {
    let bytes = match output.format {
        OutputFormat::PlainTextZip => {
            render_zip(chunks, &output.entry_prefix, &output.entry_extension)?
        }
        OutputFormat::DocxStructured => render_docx(chunks)?,
        OutputFormat::CsvTable => render_csv(chunks)?,
    };

    debug!(bytes = bytes.len(), "artifact rendered");

    Ok(Artifact {
        bytes,
        file_name: output.file_name(),
        mime_type: output.format.mime_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_chunks() -> Vec<Chunk> {
        vec![
            Chunk {
                index: 1,
                text: "first part\n".into(),
            },
            Chunk {
                index: 2,
                text: "second part\n".into(),
            },
        ]
    }

    #[test]
    fn artifact_named_after_format() {
        let chunks = sample_chunks();
        for (format, name, mime) in [
            (OutputFormat::PlainTextZip, "cleaned_output.zip", "application/zip"),
            (OutputFormat::CsvTable, "cleaned_output.csv", "text/csv"),
            (
                OutputFormat::DocxStructured,
                "cleaned_output.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
        ] {
            let output = OutputConfig {
                format,
                ..OutputConfig::default()
            };
            let artifact = render(&chunks, &output).expect("render");
            assert_eq!(artifact.file_name, name);
            assert_eq!(artifact.mime_type, mime);
            assert!(!artifact.bytes.is_empty());
        }
    }

    #[test]
    fn empty_chunk_list_renders_every_format() {
        for format in [
            OutputFormat::PlainTextZip,
            OutputFormat::CsvTable,
            OutputFormat::DocxStructured,
        ] {
            let output = OutputConfig {
                format,
                ..OutputConfig::default()
            };
            let artifact = render(&[], &output).expect("render empty");
            assert!(!artifact.bytes.is_empty(), "{format} produced no bytes");
        }
    }
}
