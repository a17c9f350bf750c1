//! Batch article processing: fetch web articles, extract their text and
//! bundle them as Word and PDF documents with a plain-text report.

pub mod archive;
pub mod batch;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod formatters;
pub mod parse;
pub mod runs;
pub mod scoring;

pub use archive::{ARCHIVE_FILE_NAME, write_archive};
pub use batch::{
    BatchConfig, BatchConfigBuilder, BatchOutput, BatchProcessor, FailedUrl, OutputMode,
    ProcessingResult, parse_url_list, safe_file_stem,
};
pub use error::{FolioError, Result};
#[cfg(feature = "fetch")]
pub use extract::HttpExtractor;
pub use extract::{ArticleExtractor, ExtractedArticle, parse_article};
pub use fetch::{DEFAULT_TIMEOUT_SECS, FetchConfig, validate_url};
#[cfg(feature = "fetch")]
pub use fetch::{build_client, fetch_url};
pub use filter::{filter_paragraphs, is_unwanted_text};
pub use formatters::{
    DocxConfig, DocxFormatter, Formatter, PdfConfig, PdfFormatter, REPORT_FILE_NAME, RenderDocument, convert_to_report,
};
pub use parse::Document;
pub use runs::{RunId, create_run_dir, locate_archive, prune_runs};
#[doc(hidden)]
pub use scoring::{ScoreConfig, base_tag_score, calculate_score, class_id_weight, link_density};
