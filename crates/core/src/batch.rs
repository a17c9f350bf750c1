//! Batch orchestration: URLs in, documents, report and archive out.
//!
//! URLs are processed one at a time, in the order given. A failure on one URL
//! is recorded and the batch moves on; only environment failures (run
//! directory, report, archive) abort the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_core::{BatchConfig, BatchProcessor, FetchConfig, HttpExtractor, OutputMode, parse_url_list};
//!
//! # async fn run() -> folio_core::Result<()> {
//! let config = BatchConfig::builder()
//!     .output_root("output")
//!     .mode(OutputMode::PerArticle)
//!     .timeout(10)
//!     .build();
//! let extractor = HttpExtractor::new(config.fetch.clone())?;
//! let processor = BatchProcessor::new(extractor, config);
//!
//! let urls = parse_url_list("https://example.com/a\n\nhttps://example.com/b\n");
//! let output = processor.process(&urls).await?;
//! println!("{} of {} done", output.result.total_completed, output.result.total_submitted);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::{FolioError, Result};
use crate::archive::{ARCHIVE_FILE_NAME, write_archive};
use crate::extract::{ArticleExtractor, ExtractedArticle};
use crate::fetch::FetchConfig;
use crate::filter::filter_paragraphs;
use crate::formatters::{
    DocxConfig, DocxFormatter, Formatter, PdfConfig, PdfFormatter, REPORT_FILE_NAME, RenderDocument, convert_to_report,
};
use crate::runs::{RunId, create_run_dir, prune_runs};

/// Maximum length of a file stem derived from an article title.
const MAX_STEM_CHARS: usize = 50;

/// Stem used when a title has no usable characters.
const FALLBACK_STEM: &str = "article";

/// File stem of the single document written in combined mode.
const COMBINED_STEM: &str = "articles";

/// Splits raw form text into URLs: one per line, trimmed, blanks dropped.
///
/// Order is preserved and duplicates are kept.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split('\n').map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect()
}

/// Derives a filesystem-safe stem from an article title.
///
/// Keeps alphanumerics, spaces, `-` and `_` and truncates to 50 characters.
/// The stem never ends in whitespace, even when the cut lands on a space.
/// Returns an empty string when nothing survives.
pub fn safe_file_stem(title: &str) -> String {
    let kept: String = title.chars().filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_')).collect();
    let truncated: String = kept.trim_end().chars().take(MAX_STEM_CHARS).collect();
    truncated.trim_end().to_string()
}

/// One failed URL with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUrl {
    pub url: String,
    pub error: String,
}

impl FailedUrl {
    pub fn new(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self { url: url.into(), error: error.into() }
    }
}

/// Aggregate outcome of a batch run.
///
/// `total_submitted == successful.len() + failed.len()` and every entry of
/// `empty_content` also appears in `failed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingResult {
    pub total_submitted: usize,
    pub total_completed: usize,
    pub successful: Vec<String>,
    pub failed: Vec<FailedUrl>,
    pub empty_content: Vec<String>,
}

impl ProcessingResult {
    fn record_success(&mut self, url: &str) {
        self.successful.push(url.to_string());
        self.total_completed += 1;
    }

    fn record_failure(&mut self, url: &str, error: impl Into<String>) {
        self.failed.push(FailedUrl::new(url, error));
    }

    fn record_empty(&mut self, url: &str) {
        self.empty_content.push(url.to_string());
        self.record_failure(url, FolioError::NoContent.to_string());
    }
}

/// How generated documents are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// One DOCX and one PDF per article, named after its title.
    #[default]
    PerArticle,
    /// One `articles.docx` and `articles.pdf` holding every article.
    Combined,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-article" | "per_article" | "article" => Ok(Self::PerArticle),
            "combined" | "single" => Ok(Self::Combined),
            _ => Err(format!("Invalid mode: {}. Valid options: per-article, combined", s)),
        }
    }
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Output grouping (default: per article).
    pub mode: OutputMode,

    /// Drop boilerplate lines from article bodies (default: true).
    pub apply_filter: bool,

    /// HTTP fetch settings, including the per-URL timeout (default: 10 s).
    pub fetch: FetchConfig,

    /// Directory that receives one sub-directory per run (default: `output`).
    pub output_root: PathBuf,

    /// Number of runs to keep after this one finishes (default: keep all).
    pub retention: Option<usize>,

    /// Word output settings.
    pub docx: DocxConfig,

    /// PDF output settings.
    pub pdf: PdfConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            apply_filter: true,
            fetch: FetchConfig::default(),
            output_root: PathBuf::from("output"),
            retention: None,
            docx: DocxConfig::default(),
            pdf: PdfConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Creates a new builder for BatchConfig.
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::new()
    }
}

/// Builder for BatchConfig.
///
/// # Example
///
/// ```rust
/// use folio_core::{BatchConfig, OutputMode};
///
/// let config = BatchConfig::builder()
///     .mode(OutputMode::Combined)
///     .apply_filter(false)
///     .timeout(5)
///     .build();
/// assert_eq!(config.fetch.timeout, 5);
/// ```
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: BatchConfig::default() }
    }

    /// Sets the output grouping.
    pub fn mode(mut self, value: OutputMode) -> Self {
        self.config.mode = value;
        self
    }

    /// Sets whether boilerplate lines are filtered out.
    pub fn apply_filter(mut self, value: bool) -> Self {
        self.config.apply_filter = value;
        self
    }

    /// Sets the per-URL fetch timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.fetch.timeout = seconds;
        self
    }

    /// Sets the User-Agent sent with every request.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the root directory for run outputs.
    pub fn output_root(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.output_root = value.into();
        self
    }

    /// Keeps only the newest `value` runs after each batch.
    pub fn retention(mut self, value: Option<usize>) -> Self {
        self.config.retention = value;
        self
    }

    /// Sets Word output options.
    pub fn docx(mut self, value: DocxConfig) -> Self {
        self.config.docx = value;
        self
    }

    /// Sets PDF output options.
    pub fn pdf(mut self, value: PdfConfig) -> Self {
        self.config.pdf = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> BatchConfig {
        self.config
    }
}

impl Default for BatchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a finished run produced.
///
/// Serializes to the JSON summary handed back to callers; `archive_path`
/// together with `run_id` is the handle for fetching the archive later.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    pub run_id: RunId,
    pub run_dir: PathBuf,
    pub archive_path: PathBuf,
    pub report_path: PathBuf,
    /// Generated DOCX and PDF files, in archive order.
    pub files: Vec<PathBuf>,
    pub result: ProcessingResult,
}

impl BatchOutput {
    /// Pretty JSON summary.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs batches against an [`ArticleExtractor`].
pub struct BatchProcessor<E> {
    extractor: E,
    config: BatchConfig,
    docx: DocxFormatter,
    pdf: PdfFormatter,
}

impl<E: ArticleExtractor> BatchProcessor<E> {
    pub fn new(extractor: E, config: BatchConfig) -> Self {
        let docx = DocxFormatter::new(config.docx.clone());
        let pdf = PdfFormatter::new(config.pdf.clone());
        Self { extractor, config, docx, pdf }
    }

    /// Processes `urls` sequentially and bundles the result.
    ///
    /// # Errors
    ///
    /// Only environment failures are returned: the run directory cannot be
    /// created, or the report, combined documents or archive cannot be
    /// written. Per-URL problems end up in [`ProcessingResult::failed`].
    pub async fn process(&self, urls: &[String]) -> Result<BatchOutput> {
        let run_id = RunId::new();
        let run_dir = create_run_dir(&self.config.output_root, &run_id)?;
        tracing::info!(run = %run_id, urls = urls.len(), mode = ?self.config.mode, "starting batch");

        let mut result = ProcessingResult { total_submitted: urls.len(), ..Default::default() };
        let mut files = Vec::new();
        let mut used_stems = HashSet::new();
        let mut combined = RenderDocument::new();

        for url in urls {
            let article = match self.extractor.extract(url).await {
                Ok(article) => article,
                Err(e) => {
                    tracing::error!(%url, error = %e, "article extraction failed");
                    let message = format!("Article extraction error: {}", e);
                    if self.config.mode == OutputMode::Combined {
                        combined.push_paragraph(format!("Error processing {}: {}", url, e));
                    }
                    result.record_failure(url, message);
                    continue;
                }
            };

            if article.is_empty() {
                tracing::warn!(%url, "no content found");
                result.record_empty(url);
                continue;
            }

            let paragraphs = filter_paragraphs(&article.body, self.config.apply_filter);

            match self.config.mode {
                OutputMode::PerArticle => {
                    let stem = unique_stem(&article, &mut used_stems);
                    let doc = RenderDocument::article(&article.title, &paragraphs);
                    match self.write_documents(&run_dir, &stem, &doc) {
                        Ok(written) => {
                            files.extend(written);
                            result.record_success(url);
                            tracing::info!(%url, file = %stem, "article processed");
                        }
                        Err(e) => {
                            tracing::error!(%url, error = %e, "document generation failed");
                            result.record_failure(url, e.to_string());
                        }
                    }
                }
                OutputMode::Combined => {
                    combined.push_article(&article.title, &paragraphs);
                    combined.push_spacer();
                    result.record_success(url);
                    tracing::info!(%url, "article processed");
                }
            }
        }

        if self.config.mode == OutputMode::Combined {
            files.extend(self.write_documents(&run_dir, COMBINED_STEM, &combined)?);
        }

        let report_path = run_dir.join(REPORT_FILE_NAME);
        fs::write(&report_path, convert_to_report(&result))?;

        let archive_path = run_dir.join(ARCHIVE_FILE_NAME);
        let mut entries: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
        entries.push(&report_path);
        write_archive(&archive_path, &entries)?;

        tracing::info!(
            run = %run_id,
            completed = result.total_completed,
            failed = result.failed.len(),
            empty = result.empty_content.len(),
            "batch finished"
        );

        if let Some(keep) = self.config.retention {
            match prune_runs(&self.config.output_root, keep.max(1)) {
                Ok(removed) if removed > 0 => tracing::info!(removed, "pruned old runs"),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "failed to prune old runs"),
            }
        }

        Ok(BatchOutput { run_id, run_dir, archive_path, report_path, files, result })
    }

    /// Writes `<stem>.docx` and `<stem>.pdf`, returning both paths.
    ///
    /// Both are rendered before either is written, so a rendering failure
    /// leaves no half-finished pair behind.
    fn write_documents(&self, dir: &Path, stem: &str, doc: &RenderDocument) -> Result<Vec<PathBuf>> {
        let formatters: [&dyn Formatter; 2] = [&self.docx, &self.pdf];

        let rendered = formatters
            .iter()
            .map(|formatter| -> Result<(PathBuf, Vec<u8>)> {
                Ok((dir.join(format!("{}.{}", stem, formatter.extension())), formatter.render(doc)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut written = Vec::with_capacity(rendered.len());
        for (path, bytes) in rendered {
            fs::write(&path, bytes)?;
            tracing::debug!(file = %path.display(), "document written");
            written.push(path);
        }
        Ok(written)
    }
}

/// Picks a file stem for `article` that no earlier article in the run used.
fn unique_stem(article: &ExtractedArticle, used: &mut HashSet<String>) -> String {
    let mut base = safe_file_stem(&article.title);
    if base.is_empty() {
        base = FALLBACK_STEM.to_string();
    }

    let mut candidate = base.clone();
    let mut suffix = 2;
    while !used.insert(candidate.to_lowercase()) {
        candidate = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    candidate
}
