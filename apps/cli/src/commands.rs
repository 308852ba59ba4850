//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use docsplit_core::{ProgressReporter, RunOutput, RunReport};
use docsplit_shared::{
    AppConfig, Document, OutputFormat, RunConfig, SplitMode, init_config, load_config,
    load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docsplit: clean documents and split them into size-bounded chunks.
#[derive(Parser)]
#[command(
    name = "docsplit",
    version,
    about = "Clean Markdown, text, DOCX and PDF documents and split them into chunks.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Clean a document, split it, and write the artifact.
    Clean(CleanArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `docsplit clean`. Flags override the config file.
#[derive(Args, Debug)]
pub(crate) struct CleanArgs {
    /// Document to process (.md, .markdown, .txt, .docx, .pdf, ...).
    pub input: PathBuf,

    /// Directory to write the artifact into.
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Artifact format.
    #[arg(short, long)]
    pub format: Option<FormatArg>,

    /// Split by UTF-8 byte budget, keeping lines whole.
    #[arg(long, value_name = "N", allow_negative_numbers = true, conflicts_with = "by_chars")]
    pub by_bytes: Option<i64>,

    /// Split into runs of N characters.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub by_chars: Option<i64>,

    /// Extension for ZIP entries (e.g. md, txt).
    #[arg(long)]
    pub ext: Option<String>,

    /// Keep `[[...]]` references and `![[...]]` embeds.
    #[arg(long)]
    pub keep_links: bool,

    /// Remove http(s) URLs.
    #[arg(long)]
    pub strip_urls: bool,

    /// Remove email addresses.
    #[arg(long)]
    pub strip_emails: bool,

    /// Do not collapse whitespace.
    #[arg(long)]
    pub keep_whitespace: bool,

    /// Do not strip `---` front matter blocks.
    #[arg(long)]
    pub keep_frontmatter: bool,

    /// Print the JSON run report to stdout.
    #[arg(long)]
    pub report: bool,

    /// Config file to use instead of ~/.docsplit/docsplit.toml.
    #[arg(long, env = "DOCSPLIT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Artifact format as spelled on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum FormatArg {
    Zip,
    Docx,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Zip => OutputFormat::PlainTextZip,
            FormatArg::Docx => OutputFormat::DocxStructured,
            FormatArg::Csv => OutputFormat::CsvTable,
        }
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show {
        /// Config file to show instead of ~/.docsplit/docsplit.toml.
        #[arg(long, env = "DOCSPLIT_CONFIG")]
        config: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docsplit=info",
        1 => "docsplit=debug",
        _ => "docsplit=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so `--report` output stays parseable.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Clean(args) => cmd_clean(&args),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show { config } => cmd_config_show(config.as_deref()),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Load the config file named by `--config`/`DOCSPLIT_CONFIG`, or the
/// default one.
fn load_app_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn cmd_clean(args: &CleanArgs) -> Result<()> {
    let app_config = load_app_config(args.config.as_deref())?;

    info!(input = %args.input.display(), "cleaning document");

    let reporter = CliProgress::new();
    let (path, output) =
        clean_to_dir(args, &app_config, &reporter).inspect_err(|_| reporter.clear())?;
    let report = &output.report;

    println!();
    println!("  Document cleaned successfully!");
    println!("  Run:      {}", report.run_id);
    println!("  Source:   {} ({})", report.file_name, report.source_format);
    println!("  Lines:    {} kept of {}", report.lines_kept, report.lines_extracted);
    println!("  Chunks:   {} (by {})", report.chunk_count, report.split_mode);
    if !report.page_failures.is_empty() {
        println!("  Skipped:  {} unreadable PDF page(s)", report.page_failures.len());
    }
    println!("  Output:   {}", path.display());
    println!("  Time:     {}ms", report.elapsed_ms);
    println!();

    if args.report {
        println!("{}", report.to_json()?);
    }

    Ok(())
}

/// Read the input, run the pipeline, and write the artifact into `args.out`.
/// Returns the written path and the pipeline output.
fn clean_to_dir(
    args: &CleanArgs,
    app_config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> Result<(PathBuf, RunOutput)> {
    let run_config = resolve_run_config(app_config, args)?;
    let doc = Document::read(&args.input)?;

    let output = docsplit_core::run(&doc, &run_config, progress)?;
    let path = write_artifact(&args.out, &output)?;

    Ok((path, output))
}

/// Merge flag overrides into the file config and validate the result.
fn resolve_run_config(app_config: &AppConfig, args: &CleanArgs) -> Result<RunConfig> {
    let mut merged = app_config.clone();

    if let Some(format) = args.format {
        merged.output.format = format.into();
    }
    if let Some(ext) = &args.ext {
        merged.output.entry_extension = ext.clone();
    }
    if let Some(max_bytes) = args.by_bytes {
        merged.split.mode = SplitMode::Bytes;
        merged.split.max_bytes = max_bytes;
    }
    if let Some(chunk_size) = args.by_chars {
        merged.split.mode = SplitMode::Chars;
        merged.split.chunk_size = chunk_size;
    }

    let cleaning = &mut merged.cleaning;
    if args.keep_links {
        cleaning.remove_embedded_links = false;
    }
    if args.strip_urls {
        cleaning.remove_urls = true;
    }
    if args.strip_emails {
        cleaning.remove_emails = true;
    }
    if args.keep_whitespace {
        cleaning.collapse_whitespace = false;
    }
    if args.keep_frontmatter {
        cleaning.strip_frontmatter = false;
    }

    Ok(RunConfig::try_from(&merged)?)
}

fn write_artifact(out_dir: &Path, output: &RunOutput) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .wrap_err_with(|| format!("cannot create output directory {}", out_dir.display()))?;

    let path = out_dir.join(&output.artifact.file_name);
    std::fs::write(&path, &output.artifact.bytes)
        .wrap_err_with(|| format!("cannot write {}", path.display()))?;

    info!(path = %path.display(), bytes = output.artifact.bytes.len(), "artifact written");
    Ok(path)
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("valid template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _report: &RunReport) {
        self.clear();
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = load_app_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
