//! Serializable run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use docsplit_shared::{
    Chunk, DocsplitError, PageFailure, Result, RunId, SourceFormat, SplitMode, TextEncoding,
};

/// Size of one emitted chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkStats {
    pub index: usize,
    pub bytes: usize,
    pub chars: usize,
}

impl From<&Chunk> for ChunkStats {
    fn from(chunk: &Chunk) -> Self {
        Self {
            index: chunk.index,
            bytes: chunk.byte_len(),
            chars: chunk.char_len(),
        }
    }
}

/// Summary of one pipeline run, written as JSON by `docsplit clean --report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub file_name: String,
    pub source_format: SourceFormat,
    /// Encoding that decoded a plain-text or Markdown source.
    pub encoding: Option<TextEncoding>,
    /// Lines produced by extraction.
    pub lines_extracted: usize,
    /// Lines left after front matter stripping.
    pub lines_kept: usize,
    pub cleaned_bytes: usize,
    pub cleaned_chars: usize,
    /// SHA-256 of the cleaned text, lowercase hex.
    pub content_hash: String,
    pub split_mode: SplitMode,
    pub chunk_count: usize,
    pub chunks: Vec<ChunkStats>,
    pub page_failures: Vec<PageFailure>,
    pub artifact_name: String,
    pub mime_type: String,
    pub artifact_bytes: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl RunReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DocsplitError::serialization("json", e.to_string()))
    }
}

/// Lowercase hex SHA-256 digest of `text`.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hash_is_stable_hex() {
        let hash = content_hash("hello\n");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
        assert_ne!(hash, content_hash("hello"));
    }

    #[test]
    fn chunk_stats_count_bytes_and_chars() {
        let chunk = Chunk {
            index: 2,
            text: "naïve\n".into(),
        };
        assert_eq!(
            ChunkStats::from(&chunk),
            ChunkStats {
                index: 2,
                bytes: 7,
                chars: 6,
            }
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let report = RunReport {
            run_id: RunId::new(),
            file_name: "notes.md".into(),
            source_format: SourceFormat::Markdown,
            encoding: Some(TextEncoding::Utf8),
            lines_extracted: 4,
            lines_kept: 1,
            cleaned_bytes: 10,
            cleaned_chars: 10,
            content_hash: content_hash("Body text\n"),
            split_mode: SplitMode::Bytes,
            chunk_count: 1,
            chunks: vec![ChunkStats {
                index: 1,
                bytes: 10,
                chars: 10,
            }],
            page_failures: vec![],
            artifact_name: "cleaned_output.zip".into(),
            mime_type: "application/zip".into(),
            artifact_bytes: 128,
            started_at: Utc::now(),
            elapsed_ms: 3,
        };

        let json = report.to_json().expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["source_format"], "markdown");
        assert_eq!(value["split_mode"], "bytes");
        assert_eq!(value["chunks"][0]["bytes"], 10);
        assert_eq!(value["run_id"], report.run_id.to_string());

        let back: RunReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.content_hash, report.content_hash);
    }
}
