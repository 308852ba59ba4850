//! Chunk splitter.
//!
//! Partitions cleaned text into ordered chunks under a byte or character
//! budget. Splitting is lossless: concatenating the chunks in order always
//! gives back the input.

use tracing::debug;

use docsplit_shared::{Chunk, SplitConfig, split_lines};

/// Split `text` according to `config`. Empty input yields no chunks.
pub fn split(text: &str, config: &SplitConfig) -> Vec<Chunk> {
    let pieces = match config {
        SplitConfig::ByByteSize { max_bytes } => split_by_bytes(text, max_bytes.get()),
        SplitConfig::ByCharacterCount { chunk_size } => split_by_chars(text, chunk_size.get()),
    };

    debug!(mode = %config.mode(), chunks = pieces.len(), "split complete");

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, text)| Chunk { index: i + 1, text })
        .collect()
}

/// Pack whole lines into chunks of at most `max_bytes` UTF-8 bytes.
///
/// A line is never split. A line larger than the budget on its own gets a
/// chunk to itself.
fn split_by_bytes(text: &str, max_bytes: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in split_lines(text) {
        if !current.is_empty() && current.len() + line.len() > max_bytes {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Slice into runs of exactly `chunk_size` characters; the last may be shorter.
/// Cuts may fall mid-line or mid-word.
fn split_by_chars(text: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(text[start..offset].to_string());
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(text[start..].to_string());
    }

    chunks
}
