//! docsplit CLI: clean a document and split it into downloadable chunks.
//!
//! Extracts text from Markdown, plain text, DOCX or PDF, strips front matter
//! and noise, splits the result by size, and writes a ZIP, DOCX or CSV artifact.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
