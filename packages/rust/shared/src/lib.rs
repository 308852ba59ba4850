//! Shared types, error model, and configuration for docsplit.
//!
//! This crate is the foundation depended on by all other docsplit crates.
//! It provides:
//! - [`DocsplitError`], the unified error type
//! - Domain types ([`Document`], [`SourceFormat`], [`Chunk`], [`Artifact`], [`RunId`])
//! - Configuration ([`AppConfig`], [`RunConfig`], config loading)
//! - Terminator-preserving line splitting ([`split_lines`])

pub mod config;
pub mod error;
pub mod lines;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CleaningConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_BYTES, ExtractSection,
    OutputConfig, OutputFormat, OutputSection, RunConfig, SplitConfig, SplitMode, SplitSection,
    TextEncoding, config_dir, config_file_path, init_config, init_config_in, load_config,
    load_config_from, parse_encodings,
};
pub use error::{DocsplitError, Result};
pub use lines::{split_lines, split_terminator};
pub use types::{Artifact, Chunk, Document, PageFailure, RunId, SourceFormat};
