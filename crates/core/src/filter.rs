//! Boilerplate line filtering.
//!
//! Extracted article bodies often keep newsletter prompts, social links and
//! shouted banners. [`is_unwanted_text`] decides, one line at a time, whether
//! a line is noise that should be left out of generated documents.

/// Phrases that mark a line as promotional noise (matched case-insensitively).
pub const UNWANTED_PHRASES: [&str; 5] = [
    "click here to sign up",
    "click here to get",
    "follow us on",
    "subscribe to",
    "sign up for our newsletter",
];

/// All-caps lines with more words than this are treated as banners.
const MAX_SHOUTED_WORDS: usize = 5;

/// Returns `true` when `text` should be dropped from generated documents.
///
/// Rules, in order:
/// 1. empty or whitespace-only lines are unwanted
/// 2. all-uppercase lines with more than five words are unwanted
///    (short acronym-like lines survive)
/// 3. lines containing any of [`UNWANTED_PHRASES`] are unwanted
///
/// # Example
///
/// ```rust
/// use folio_core::is_unwanted_text;
///
/// assert!(is_unwanted_text("   "));
/// assert!(!is_unwanted_text("SMALL CAPS"));
/// assert!(is_unwanted_text("Follow us on social media"));
/// assert!(!is_unwanted_text("An ordinary sentence."));
/// ```
pub fn is_unwanted_text(text: &str) -> bool {
    if text.trim().is_empty() {
        return true;
    }

    if is_all_uppercase(text) && text.split_whitespace().count() > MAX_SHOUTED_WORDS {
        return true;
    }

    let lowered = text.to_lowercase();
    UNWANTED_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// True when the text has at least one cased character and none in lowercase.
///
/// Digits and punctuation are ignored, so "COVID-19 UPDATE" counts as uppercase.
fn is_all_uppercase(text: &str) -> bool {
    let mut has_cased = false;

    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }

    has_cased
}

/// Splits an article body into the paragraphs that should be rendered.
///
/// Blank lines are always dropped. When `apply_filter` is set, lines rejected
/// by [`is_unwanted_text`] are dropped as well. Kept lines are trimmed.
pub fn filter_paragraphs(body: &str, apply_filter: bool) -> Vec<String> {
    body.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !apply_filter || !is_unwanted_text(line))
        .map(str::to_string)
        .collect()
}
