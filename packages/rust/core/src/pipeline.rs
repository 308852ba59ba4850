//! End-to-end `clean` pipeline: document → extract → clean → split → render.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument};

use docsplit_extract::ExtractorRegistry;
use docsplit_shared::{Artifact, Chunk, Document, Result, RunConfig, RunId};

use crate::report::{ChunkStats, RunReport, content_hash};
use crate::splitter;

/// Result of the `clean` pipeline.
#[derive(Debug)]
pub struct RunOutput {
    /// The serialized output, ready to write or download.
    pub artifact: Artifact,
    /// Chunks in order; concatenated they equal the cleaned text.
    pub chunks: Vec<Chunk>,
    pub report: RunReport,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, report: &RunReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _report: &RunReport) {}
}

/// Run the full `clean` pipeline on one document.
///
/// 1. Extract lines with the extractor for the document's format
/// 2. Strip front matter and normalize lines
/// 3. Split the cleaned text into chunks
/// 4. Render the chunks into the configured artifact
#[instrument(
    skip_all,
    fields(
        run_id = tracing::field::Empty,
        file = %doc.file_name(),
        format = %doc.format()
    )
)]
pub fn run(
    doc: &Document,
    config: &RunConfig,
    progress: &dyn ProgressReporter,
) -> Result<RunOutput> {
    let start = Instant::now();
    let started_at = Utc::now();
    let run_id = RunId::new();
    tracing::Span::current().record("run_id", tracing::field::display(&run_id));

    info!(%run_id, "starting clean pipeline");

    // --- Phase 1: Extract ---
    progress.phase("Extracting text");
    let extraction = ExtractorRegistry::new().extract(doc, &config.encodings)?;
    let lines_extracted = extraction.lines.len();

    // --- Phase 2: Clean ---
    progress.phase("Cleaning text");
    let cleaned = docsplit_markdown::clean(extraction.lines, &config.cleaning);

    // --- Phase 3: Split ---
    progress.phase("Splitting into chunks");
    let chunks = splitter::split(&cleaned.text, &config.split);

    // --- Phase 4: Render ---
    progress.phase("Rendering artifact");
    let artifact = docsplit_artifacts::render(&chunks, &config.output)?;

    let report = RunReport {
        run_id,
        file_name: doc.file_name().to_string(),
        source_format: doc.format(),
        encoding: extraction.encoding,
        lines_extracted,
        lines_kept: cleaned.lines_kept,
        cleaned_bytes: cleaned.text.len(),
        cleaned_chars: cleaned.text.chars().count(),
        content_hash: content_hash(&cleaned.text),
        split_mode: config.split.mode(),
        chunk_count: chunks.len(),
        chunks: chunks.iter().map(ChunkStats::from).collect(),
        page_failures: extraction.page_failures,
        artifact_name: artifact.file_name.clone(),
        mime_type: artifact.mime_type.to_string(),
        artifact_bytes: artifact.bytes.len(),
        started_at,
        elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    info!(
        chunks = report.chunk_count,
        cleaned_bytes = report.cleaned_bytes,
        failed_pages = report.page_failures.len(),
        artifact = %report.artifact_name,
        elapsed_ms = report.elapsed_ms,
        "clean pipeline complete"
    );

    progress.done(&report);

    Ok(RunOutput {
        artifact,
        chunks,
        report,
    })
}
