//! HTML parsing and title resolution.
//!
//! [`Document`] wraps a `scraper::Html` tree and offers the handful of queries
//! article extraction needs: CSS selection, meta tag lookup and the title
//! fallback chain.
//!
//! # Example
//!
//! ```rust
//! use folio_core::parse::Document;
//!
//! let html = r#"<html><head><title>Test</title></head><body><h1>Heading</h1></body></html>"#;
//! let doc = Document::parse(html);
//! assert_eq!(doc.extract_title(), Some("Test".to_string()));
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{FolioError, Result};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from malformed markup, so parsing itself never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| FolioError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).collect())
    }

    /// Gets the content of the `<title>` element, trimmed.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
    }

    /// Looks up `<meta name=..>` or `<meta property=..>` content.
    pub fn get_meta_content(&self, key: &str) -> Option<String> {
        for attr in ["property", "name"] {
            let selector = format!("meta[{}=\"{}\"]", attr, key);
            if let Ok(elements) = self.select(&selector) {
                for el in elements {
                    if let Some(content) = el.value().attr("content") {
                        let content = collapse_whitespace(content);
                        if !content.is_empty() {
                            return Some(content);
                        }
                    }
                }
            }
        }
        None
    }

    /// Reads the `headline` of the first JSON-LD block that has one.
    fn json_ld_headline(&self) -> Option<String> {
        let scripts = self.select("script[type=\"application/ld+json\"]").ok()?;

        for script in scripts {
            let raw = script.text().collect::<String>();
            let Ok(value) = serde_json::from_str::<serde_json::Value>(raw.trim()) else {
                continue;
            };

            let candidates = match value {
                serde_json::Value::Array(items) => items,
                other => vec![other],
            };

            for item in candidates {
                if let Some(headline) = item.get("headline").and_then(|h| h.as_str()) {
                    let headline = collapse_whitespace(headline);
                    if !headline.is_empty() {
                        return Some(headline);
                    }
                }
            }
        }

        None
    }

    /// Extract title with priority fallback:
    /// 1. JSON-LD `headline`
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. `<title>` element
    /// 5. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(headline) = self.json_ld_headline() {
            return Some(headline);
        }

        if let Some(title) = self.get_meta_content("og:title") {
            return Some(title);
        }

        if let Some(title) = self.get_meta_content("twitter:title") {
            return Some(title);
        }

        if let Some(title) = self.title() {
            return Some(title);
        }

        if let Ok(elements) = self.select("h1")
            && let Some(first) = elements.first()
        {
            let text = collapse_whitespace(&first.text().collect::<String>());
            if !text.is_empty() {
                return Some(text);
            }
        }

        None
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
