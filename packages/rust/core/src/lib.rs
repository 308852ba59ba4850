//! Core pipeline orchestration for docsplit.
//!
//! This crate ties together extraction, cleaning, chunk splitting, and
//! artifact rendering into the end-to-end `clean` workflow
//! ([`pipeline::run`]), and produces the [`report::RunReport`] for each run.

pub mod pipeline;
pub mod report;
pub mod splitter;

pub use pipeline::{ProgressReporter, RunOutput, SilentProgress, run};
pub use report::{ChunkStats, RunReport};
pub use splitter::split;
