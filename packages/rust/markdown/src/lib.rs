//! Front matter stripping and line normalization.
//!
//! Takes the extracted line sequence, drops `---` delimited metadata blocks,
//! normalizes each remaining line, and concatenates the result into the
//! cleaned text that the splitter consumes.

mod frontmatter;
mod normalize;

use tracing::{debug, instrument};

use docsplit_shared::CleaningConfig;

pub use frontmatter::strip_frontmatter;
pub use normalize::normalize_line;

/// Result of cleaning a line sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText {
    /// Concatenated cleaned lines, terminators preserved.
    pub text: String,
    /// Lines received from extraction.
    pub lines_in: usize,
    /// Lines left after front matter stripping.
    pub lines_kept: usize,
}

/// Strip front matter, normalize every line, and concatenate.
#[instrument(skip_all, fields(lines = lines.len()))]
pub fn clean(lines: Vec<String>, config: &CleaningConfig) -> CleanedText {
    let lines_in = lines.len();
    let kept = strip_frontmatter(lines, config.strip_frontmatter);
    let lines_kept = kept.len();

    let text: String = kept
        .iter()
        .map(|line| normalize_line(line, config))
        .collect();

    debug!(
        lines_in,
        lines_kept,
        cleaned_len = text.len(),
        "cleaning complete"
    );

    CleanedText {
        text,
        lines_in,
        lines_kept,
    }
}
