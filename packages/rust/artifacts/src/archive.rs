//! ZIP-of-files serializer.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use docsplit_shared::{Chunk, DocsplitError, Result};

/// Archive entry name for the chunk with 1-based `index`,
/// e.g. `cleaned_part_3.md`.
pub fn entry_name(prefix: &str, index: usize, extension: &str) -> String {
    let stem = if prefix.is_empty() {
        index.to_string()
    } else {
        format!("{prefix}_{index}")
    };

    if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    }
}

/// Write one deflated entry per chunk, in chunk order.
pub fn render_zip(chunks: &[Chunk], prefix: &str, extension: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for chunk in chunks {
        let name = entry_name(prefix, chunk.index, extension);
        zip.start_file(name, options).map_err(zip_error)?;
        zip.write_all(chunk.text.as_bytes())
            .map_err(|e| DocsplitError::serialization("zip", e.to_string()))?;
    }

    let cursor = zip.finish().map_err(zip_error)?;
    Ok(cursor.into_inner())
}

fn zip_error(e: zip::result::ZipError) -> DocsplitError {
    DocsplitError::serialization("zip", e.to_string())
}
