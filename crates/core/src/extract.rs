//! Article extraction: the contract the batch pipeline depends on, plus the
//! HTTP-backed implementation.
//!
//! The pipeline only ever sees an [`ExtractedArticle`] (title and body) or an
//! error. Anything that can produce those, such as a live fetcher or a test
//! double serving fixtures, implements [`ArticleExtractor`].

use std::collections::HashSet;
use std::future::Future;

use scraper::ElementRef;
use serde::Serialize;

use crate::Result;
use crate::parse::{Document, collapse_whitespace};
use crate::scoring::{ScoreConfig, calculate_score, class_id_weight, paragraph_score};

/// Title and body text of one article.
///
/// `body` holds one paragraph per line group, separated by blank lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub body: String,
}

impl ExtractedArticle {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into() }
    }

    /// True when the body has no visible text.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Source of extracted articles, keyed by URL.
pub trait ArticleExtractor {
    /// Fetches and parses the article at `url`.
    fn extract(&self, url: &str) -> impl Future<Output = Result<ExtractedArticle>> + Send;
}

/// Containers considered as the article root.
const CANDIDATE_SELECTOR: &str = "article, main, section, div, td";

/// Block elements whose text becomes paragraphs.
const BLOCK_TAGS: [&str; 9] = ["p", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "pre"];

/// Tags whose text never belongs to the article body.
const SKIP_TAGS: [&str; 10] =
    ["script", "style", "noscript", "nav", "aside", "footer", "form", "iframe", "svg", "button"];

/// Share of a container's paragraph prose a nested candidate must carry to
/// replace it as the content root.
const DOMINANT_SHARE: f64 = 0.8;

/// Extracts the title and body text from an HTML page.
///
/// The title follows [`Document::extract_title`] and falls back to an empty
/// string. The body comes from the best-scoring container; when nothing
/// scores, the body is empty and the caller decides what "no content" means.
///
/// # Example
///
/// ```rust
/// use folio_core::parse_article;
///
/// let html = r#"<html><head><title>Hello</title></head><body><article>
///     <p>The first paragraph of the story has enough words to count.</p>
///     <p>The second paragraph continues the story, with a comma or two.</p>
/// </article></body></html>"#;
///
/// let article = parse_article(html).unwrap();
/// assert_eq!(article.title, "Hello");
/// assert!(article.body.contains("second paragraph"));
/// ```
pub fn parse_article(html: &str) -> Result<ExtractedArticle> {
    let doc = Document::parse(html);
    let title = doc.extract_title().unwrap_or_default();

    let config = ScoreConfig::default();
    let candidates: Vec<(f64, ElementRef<'_>)> = doc
        .select(CANDIDATE_SELECTOR)?
        .into_iter()
        .map(|el| (calculate_score(&el, &config), el))
        .filter(|(score, _)| *score > 0.0)
        .collect();

    let best = candidates.iter().copied().fold(None::<(f64, ElementRef<'_>)>, |best, current| match best {
        Some(b) if b.0 >= current.0 => Some(b),
        _ => Some(current),
    });

    let body = match best {
        Some(mut best) => {
            while let Some(inner) = dominant_descendant(&candidates, best.1, &config) {
                tracing::trace!(from = best.1.value().name(), to = inner.1.value().name(), "narrowing content root");
                best = inner;
            }
            let (score, root) = best;
            tracing::debug!(tag = root.value().name(), score, "selected content root");
            collect_blocks(root, &config).join("\n\n")
        }
        None => String::new(),
    };

    Ok(ExtractedArticle { title, body })
}

/// Finds the highest-scoring candidate nested in `root` that carries nearly
/// all of its paragraph prose.
///
/// A wrapper such as `<div class="content">` around an `<article>` only keeps
/// the root when it holds substantially more prose than anything inside it.
fn dominant_descendant<'a>(
    candidates: &[(f64, ElementRef<'a>)], root: ElementRef<'a>, config: &ScoreConfig,
) -> Option<(f64, ElementRef<'a>)> {
    let root_prose = paragraph_score(&root, config);

    candidates
        .iter()
        .copied()
        .filter(|(_, el)| el.id() != root.id() && el.ancestors().any(|a| a.id() == root.id()))
        .filter(|(_, el)| paragraph_score(el, config) >= root_prose * DOMINANT_SHARE)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
}

/// Collects block-level text under `root` in document order.
///
/// A block nested in another block (a `<p>` inside a `<blockquote>`) is only
/// emitted once, as part of its outermost block. Blocks inside comment,
/// sidebar or related-story containers are dropped.
fn collect_blocks(root: ElementRef<'_>, config: &ScoreConfig) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut seen = HashSet::new();

    for node in root.descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        let tag = element.value().name();
        if !BLOCK_TAGS.contains(&tag) || is_excluded(element, root, config) {
            continue;
        }

        let text = collapse_whitespace(&element.text().collect::<String>());
        if !text.is_empty() && seen.insert(text.clone()) {
            blocks.push(text);
        }
    }

    blocks
}

/// True when `element` or one of its ancestors below `root` is a skipped tag,
/// an enclosing block, or carries a negative class/id.
fn is_excluded(element: ElementRef<'_>, root: ElementRef<'_>, config: &ScoreConfig) -> bool {
    if class_id_weight(&element, config) < 0.0 {
        return true;
    }

    for ancestor in element.ancestors() {
        if ancestor.id() == root.id() {
            return false;
        }
        if let Some(parent) = ElementRef::wrap(ancestor) {
            let tag = parent.value().name();
            if SKIP_TAGS.contains(&tag) || BLOCK_TAGS.contains(&tag) || class_id_weight(&parent, config) < 0.0 {
                return true;
            }
        }
    }
    false
}

#[cfg(feature = "fetch")]
pub use http::HttpExtractor;

#[cfg(feature = "fetch")]
mod http {
    use reqwest::Client;

    use super::{ArticleExtractor, ExtractedArticle, parse_article};
    use crate::Result;
    use crate::fetch::{FetchConfig, build_client, fetch_url};

    /// Fetches pages over HTTP and extracts them with [`parse_article`].
    ///
    /// One client is shared by every request in a batch.
    pub struct HttpExtractor {
        client: Client,
        config: FetchConfig,
    }

    impl HttpExtractor {
        pub fn new(config: FetchConfig) -> Result<Self> {
            let client = build_client(&config)?;
            Ok(Self { client, config })
        }
    }

    impl ArticleExtractor for HttpExtractor {
        async fn extract(&self, url: &str) -> Result<ExtractedArticle> {
            let html = fetch_url(&self.client, url, &self.config).await?;
            parse_article(&html)
        }
    }
}
