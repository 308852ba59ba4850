//! Application configuration for docsplit.
//!
//! User config lives at `~/.docsplit/docsplit.toml`.
//! CLI flags override config file values, which override defaults.
//! The file is deserialized into [`AppConfig`] and validated once into a
//! [`RunConfig`], which the pipeline receives by reference.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocsplitError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docsplit.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docsplit";

/// Default byte budget per chunk (2 MiB).
pub const DEFAULT_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Default character budget per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Independent cleaning toggles, applied per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Drop `![[...]]` embeds and unwrap `[[label]]` references.
    #[serde(default = "default_true")]
    pub remove_embedded_links: bool,

    /// Drop `http://` / `https://` URLs.
    #[serde(default)]
    pub remove_urls: bool,

    /// Drop email addresses.
    #[serde(default)]
    pub remove_emails: bool,

    /// Collapse whitespace runs to one space and trim.
    #[serde(default = "default_true")]
    pub collapse_whitespace: bool,

    /// Remove `---` delimited front matter blocks.
    #[serde(default = "default_true")]
    pub strip_frontmatter: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            remove_embedded_links: true,
            remove_urls: false,
            remove_emails: false,
            collapse_whitespace: true,
            strip_frontmatter: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// Chunk size policy. Exactly one mode is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitConfig {
    /// Whole lines packed into chunks of at most `max_bytes` UTF-8 bytes.
    ByByteSize { max_bytes: NonZeroUsize },
    /// Fixed-width slices of `chunk_size` characters.
    ByCharacterCount { chunk_size: NonZeroUsize },
}

impl SplitConfig {
    /// Byte-budget mode. Rejects zero and negative budgets.
    pub fn by_bytes(max_bytes: i64) -> Result<Self> {
        Ok(Self::ByByteSize {
            max_bytes: positive("max_bytes", max_bytes)?,
        })
    }

    /// Character-budget mode. Rejects zero and negative budgets.
    pub fn by_chars(chunk_size: i64) -> Result<Self> {
        Ok(Self::ByCharacterCount {
            chunk_size: positive("chunk_size", chunk_size)?,
        })
    }

    /// Short label for logs.
    pub fn mode(&self) -> SplitMode {
        match self {
            Self::ByByteSize { .. } => SplitMode::Bytes,
            Self::ByCharacterCount { .. } => SplitMode::Chars,
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::ByByteSize {
            max_bytes: NonZeroUsize::new(DEFAULT_MAX_BYTES).expect("non-zero constant"),
        }
    }
}

fn positive(field: &str, value: i64) -> Result<NonZeroUsize> {
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            DocsplitError::invalid_config(format!(
                "{field} must be a positive integer, got {value}"
            ))
        })
}

/// Split mode selector as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    Bytes,
    Chars,
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes => f.write_str("bytes"),
            Self::Chars => f.write_str("chars"),
        }
    }
}

/// `[split]` section. Budgets are signed so that negative values reach
/// validation and are reported as invalid config rather than parse errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSection {
    #[serde(default = "default_split_mode")]
    pub mode: SplitMode,

    #[serde(default = "default_max_bytes")]
    pub max_bytes: i64,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: i64,
}

impl Default for SplitSection {
    fn default() -> Self {
        Self {
            mode: default_split_mode(),
            max_bytes: default_max_bytes(),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_split_mode() -> SplitMode {
    SplitMode::Bytes
}
fn default_max_bytes() -> i64 {
    DEFAULT_MAX_BYTES as i64
}
fn default_chunk_size() -> i64 {
    DEFAULT_CHUNK_SIZE as i64
}

impl TryFrom<&SplitSection> for SplitConfig {
    type Error = DocsplitError;

    fn try_from(section: &SplitSection) -> Result<Self> {
        match section.mode {
            SplitMode::Bytes => Self::by_bytes(section.max_bytes),
            SplitMode::Chars => Self::by_chars(section.chunk_size),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Output container for the chunk sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One `.docx` with a heading and page break per chunk.
    #[serde(rename = "docx")]
    DocxStructured,
    /// A `.zip` with one text entry per chunk.
    #[serde(rename = "zip")]
    PlainTextZip,
    /// A `.csv` with one row per chunk.
    #[serde(rename = "csv")]
    CsvTable,
}

impl OutputFormat {
    /// File extension of the produced artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::DocxStructured => "docx",
            Self::PlainTextZip => "zip",
            Self::CsvTable => "csv",
        }
    }

    /// MIME type of the produced artifact.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::DocxStructured => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::PlainTextZip => "application/zip",
            Self::CsvTable => "text/csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Artifact format: `zip`, `docx`, or `csv`.
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Artifact file name without extension.
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Name prefix of each ZIP entry.
    #[serde(default = "default_entry_prefix")]
    pub entry_prefix: String,

    /// Extension of each ZIP entry.
    #[serde(default = "default_entry_extension")]
    pub entry_extension: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: default_format(),
            file_stem: default_file_stem(),
            entry_prefix: default_entry_prefix(),
            entry_extension: default_entry_extension(),
        }
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::PlainTextZip
}
fn default_file_stem() -> String {
    "cleaned_output".into()
}
fn default_entry_prefix() -> String {
    "cleaned_part".into()
}
fn default_entry_extension() -> String {
    "md".into()
}

/// Validated output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file_stem: String,
    pub entry_prefix: String,
    /// Stored without a leading dot.
    pub entry_extension: String,
}

impl OutputConfig {
    /// Suggested artifact file name, e.g. `cleaned_output.zip`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem, self.format.extension())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        // Defaults always validate.
        Self {
            format: default_format(),
            file_stem: default_file_stem(),
            entry_prefix: default_entry_prefix(),
            entry_extension: default_entry_extension(),
        }
    }
}

impl TryFrom<&OutputSection> for OutputConfig {
    type Error = DocsplitError;

    fn try_from(section: &OutputSection) -> Result<Self> {
        let file_stem = section.file_stem.trim();
        if file_stem.is_empty() || file_stem.contains(['/', '\\']) {
            return Err(DocsplitError::invalid_config(format!(
                "file_stem must be a plain non-empty file name, got {:?}",
                section.file_stem
            )));
        }

        let entry_prefix = section.entry_prefix.trim();
        if entry_prefix.contains(['/', '\\']) {
            return Err(DocsplitError::invalid_config(format!(
                "entry_prefix must not contain path separators, got {:?}",
                section.entry_prefix
            )));
        }

        let entry_extension = section.entry_extension.trim().trim_start_matches('.');
        if entry_extension.contains(['/', '\\']) {
            return Err(DocsplitError::invalid_config(format!(
                "entry_extension must not contain path separators, got {:?}",
                section.entry_extension
            )));
        }

        Ok(Self {
            format: section.format,
            file_stem: file_stem.to_string(),
            entry_prefix: entry_prefix.to_string(),
            entry_extension: entry_extension.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// A text encoding in the plain-text decoding fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "latin-1")]
    Latin1,
    #[serde(rename = "windows-1252")]
    Windows1252,
}

impl TextEncoding {
    /// The default chain: UTF-8, then Latin-1, then Windows-1252.
    pub const DEFAULT_CHAIN: [TextEncoding; 3] = [Self::Utf8, Self::Latin1, Self::Windows1252];

    /// Parse a label (case-insensitive, common aliases accepted).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Some(Self::Latin1),
            "windows-1252" | "cp1252" => Some(Self::Windows1252),
            _ => None,
        }
    }

    /// Canonical label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Windows1252 => "windows-1252",
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// `[extract]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractSection {
    /// Encodings tried in order when decoding plain text and Markdown.
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            encodings: default_encodings(),
        }
    }
}

fn default_encodings() -> Vec<String> {
    TextEncoding::DEFAULT_CHAIN
        .iter()
        .map(|e| e.label().to_string())
        .collect()
}

/// Parse and validate an encoding chain.
pub fn parse_encodings(labels: &[String]) -> Result<Vec<TextEncoding>> {
    if labels.is_empty() {
        return Err(DocsplitError::invalid_config(
            "encodings must list at least one encoding",
        ));
    }

    labels
        .iter()
        .map(|label| {
            TextEncoding::from_label(label).ok_or_else(|| {
                DocsplitError::invalid_config(format!(
                    "unknown encoding {label:?} (expected utf-8, latin-1, or windows-1252)"
                ))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Config file (matching docsplit.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub cleaning: CleaningConfig,

    #[serde(default)]
    pub split: SplitSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub extract: ExtractSection,
}

// ---------------------------------------------------------------------------
// Run config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Validated per-run configuration. Built once and passed by reference
/// through every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub cleaning: CleaningConfig,
    pub split: SplitConfig,
    pub output: OutputConfig,
    pub encodings: Vec<TextEncoding>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cleaning: CleaningConfig::default(),
            split: SplitConfig::default(),
            output: OutputConfig::default(),
            encodings: TextEncoding::DEFAULT_CHAIN.to_vec(),
        }
    }
}

impl TryFrom<&AppConfig> for RunConfig {
    type Error = DocsplitError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            cleaning: config.cleaning,
            split: SplitConfig::try_from(&config.split)?,
            output: OutputConfig::try_from(&config.output)?,
            encodings: parse_encodings(&config.extract.encodings)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docsplit/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocsplitError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docsplit/docsplit.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocsplitError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DocsplitError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

/// Write a default config file into `dir`, creating it if needed.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| DocsplitError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocsplitError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocsplitError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("remove_embedded_links = true"));
        assert!(toml_str.contains("max_bytes = 2097152"));
        assert!(toml_str.contains("format = \"zip\""));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.split.chunk_size, 1000);
        assert_eq!(parsed.output.entry_prefix, "cleaned_part");
        assert_eq!(parsed.extract.encodings, vec!["utf-8", "latin-1", "windows-1252"]);
    }

    #[test]
    fn cleaning_defaults() {
        let cleaning = CleaningConfig::default();
        assert!(cleaning.remove_embedded_links);
        assert!(cleaning.collapse_whitespace);
        assert!(cleaning.strip_frontmatter);
        assert!(!cleaning.remove_urls);
        assert!(!cleaning.remove_emails);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let toml_str = r#"
[cleaning]
remove_urls = true

[split]
mode = "chars"
chunk_size = 500

[output]
format = "csv"
"#;
        let app: AppConfig = toml::from_str(toml_str).expect("parse");
        let run = RunConfig::try_from(&app).expect("valid");

        assert!(run.cleaning.remove_urls);
        assert!(run.cleaning.remove_embedded_links);
        assert_eq!(run.split, SplitConfig::by_chars(500).unwrap());
        assert_eq!(run.output.format, OutputFormat::CsvTable);
        assert_eq!(run.output.file_name(), "cleaned_output.csv");
        assert_eq!(run.encodings, TextEncoding::DEFAULT_CHAIN.to_vec());
    }

    #[test]
    fn run_config_from_defaults_matches_default() {
        let run = RunConfig::try_from(&AppConfig::default()).expect("valid");
        assert_eq!(run, RunConfig::default());
    }

    #[test]
    fn non_positive_budgets_rejected() {
        for bad in [0, -1, -4096] {
            let err = SplitConfig::by_bytes(bad).unwrap_err();
            assert!(matches!(err, DocsplitError::InvalidConfig { .. }));
            let err = SplitConfig::by_chars(bad).unwrap_err();
            assert!(err.to_string().contains("chunk_size must be a positive integer"));
        }
    }

    #[test]
    fn negative_budget_in_file_is_invalid_config() {
        let toml_str = "[split]\nmode = \"bytes\"\nmax_bytes = -10\n";
        let app: AppConfig = toml::from_str(toml_str).expect("parse");
        let err = RunConfig::try_from(&app).unwrap_err();
        assert!(matches!(err, DocsplitError::InvalidConfig { .. }));
    }

    #[test]
    fn inactive_mode_budget_is_not_validated() {
        let section = SplitSection {
            mode: SplitMode::Bytes,
            max_bytes: 64,
            chunk_size: 0,
        };
        assert!(SplitConfig::try_from(&section).is_ok());
    }

    #[test]
    fn encoding_chain_validation() {
        let chain = parse_encodings(&["UTF8".into(), "cp1252".into()]).expect("valid");
        assert_eq!(chain, vec![TextEncoding::Utf8, TextEncoding::Windows1252]);

        assert!(parse_encodings(&[]).is_err());
        let err = parse_encodings(&["shift-jis".into()]).unwrap_err();
        assert!(err.to_string().contains("shift-jis"));
    }

    #[test]
    fn output_section_validation() {
        let mut section = OutputSection {
            entry_extension: ".txt".into(),
            ..OutputSection::default()
        };
        let output = OutputConfig::try_from(&section).expect("valid");
        assert_eq!(output.entry_extension, "txt");

        section.file_stem = "  ".into();
        assert!(OutputConfig::try_from(&section).is_err());

        section.file_stem = "../escape".into();
        assert!(OutputConfig::try_from(&section).is_err());
    }

    #[test]
    fn entry_names_cannot_carry_path_segments() {
        for ext in ["x/../../evil", "md\\..\\evil", "/md"] {
            let section = OutputSection {
                entry_extension: ext.into(),
                ..OutputSection::default()
            };
            let err = OutputConfig::try_from(&section).unwrap_err();
            assert!(matches!(err, DocsplitError::InvalidConfig { .. }), "{ext:?} accepted");
        }

        let section = OutputSection {
            entry_prefix: "dir/part".into(),
            ..OutputSection::default()
        };
        assert!(OutputConfig::try_from(&section).is_err());
    }

    #[test]
    fn mime_types_per_format() {
        assert_eq!(OutputFormat::PlainTextZip.mime_type(), "application/zip");
        assert_eq!(OutputFormat::CsvTable.mime_type(), "text/csv");
        assert!(OutputFormat::DocxStructured.mime_type().contains("wordprocessingml"));
    }

    #[test]
    fn load_and_init_config_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = init_config_in(dir.path()).expect("init");
        assert!(path.ends_with("docsplit.toml"));

        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded.output.file_stem, "cleaned_output");

        std::fs::write(&path, "[split\nbroken").expect("write");
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
