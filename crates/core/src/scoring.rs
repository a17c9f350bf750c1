use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Configuration for content scoring algorithm
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Characters of paragraph text per point
    pub chars_per_point: usize,
    /// Maximum points from paragraph text length
    pub max_char_points: f64,
    /// Maximum points from commas (prose indicator)
    pub max_comma_points: f64,
    /// Paragraphs shorter than this are ignored when scoring
    pub min_paragraph_chars: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            positive_weight: 25.0,
            negative_weight: -25.0,
            chars_per_point: 100,
            max_char_points: 30.0,
            max_comma_points: 10.0,
            min_paragraph_chars: 25,
        }
    }
}

/// Base score by tag: how likely a container is to hold the main text.
pub fn base_tag_score(tag: &str) -> f64 {
    match tag {
        "article" => 10.0,
        "main" => 8.0,
        "section" => 5.0,
        "div" => 5.0,
        "td" => 3.0,
        _ => 0.0,
    }
}

static POSITIVE_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)").unwrap()
});

static NEGATIVE_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|nav|newsletter|related|remark|rss|share|shoutbox|sidebar|social|sponsor|ad-break|agegate|pagination|pager|popup|promo|subscribe)").unwrap()
});

static PARAGRAPH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Calculate the class/ID weight adjustment for an element
///
/// Negative patterns win over positive ones: "article-footer" is still a footer.
pub fn class_id_weight(element: &ElementRef<'_>, config: &ScoreConfig) -> f64 {
    let value = element.value();
    let names = value.id().into_iter().chain(value.classes());

    let mut weight = 0.0;
    for name in names {
        if NEGATIVE_PATTERNS.is_match(name) {
            return config.negative_weight;
        }
        if POSITIVE_PATTERNS.is_match(name) {
            weight = config.positive_weight;
        }
    }
    weight
}

/// Link density: share of the element's text that sits inside links (0.0 to 1.0)
pub fn link_density(element: &ElementRef<'_>) -> f64 {
    let text_length = element.text().map(|t| t.chars().count()).sum::<usize>();
    if text_length == 0 {
        return 0.0;
    }

    let link_length = element
        .select(&LINK_SELECTOR)
        .map(|link| link.text().map(|t| t.chars().count()).sum::<usize>())
        .sum::<usize>();

    link_length as f64 / text_length as f64
}

/// Points for the paragraph prose an element carries.
///
/// Only `<p>` descendants above `min_paragraph_chars` count, so menus and
/// bylines contribute nothing.
pub fn paragraph_score(element: &ElementRef<'_>, config: &ScoreConfig) -> f64 {
    let mut chars = 0usize;
    let mut commas = 0usize;

    for paragraph in element.select(&PARAGRAPH_SELECTOR) {
        let text = paragraph.text().collect::<String>();
        let length = text.trim().chars().count();
        if length < config.min_paragraph_chars {
            continue;
        }
        chars += length;
        commas += text.matches(',').count();
    }

    let char_points = (chars as f64 / config.chars_per_point as f64).min(config.max_char_points);
    let comma_points = (commas as f64).min(config.max_comma_points);
    char_points + comma_points
}

/// Calculate the final score for a candidate container
///
/// Tag, class/ID weight and paragraph prose add up; the total is then scaled
/// down by link density. Elements without any qualifying paragraph score 0.
pub fn calculate_score(element: &ElementRef<'_>, config: &ScoreConfig) -> f64 {
    let prose = paragraph_score(element, config);
    if prose == 0.0 {
        return 0.0;
    }

    let raw = base_tag_score(element.value().name()) + class_id_weight(element, config) + prose;
    raw * (1.0 - link_density(element))
}
