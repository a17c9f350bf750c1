//! PDF rendering with lopdf.
//!
//! Text is laid out with the standard Type1 Times faces, so no font files are
//! embedded. Lines are wrapped on an average glyph width, which keeps output
//! inside the margins for ordinary prose without shipping font metrics.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::{Block, Formatter, RenderDocument};
use crate::Result;

/// Configuration for PDF output
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// Page width in points (A4 by default)
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Margin on every side, in points
    pub margin: f32,
    /// Font size in points, shared by headings and body
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
    /// Average glyph width as a fraction of the font size, used for wrapping
    pub average_char_width: f32,
    /// Standard Type1 font for paragraphs
    pub body_font: String,
    /// Standard Type1 font for headings
    pub heading_font: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 72.0,
            font_size: 12.0,
            line_height: 1.2,
            average_char_width: 0.5,
            body_font: "Times-Roman".to_string(),
            heading_font: "Times-Bold".to_string(),
        }
    }
}

impl PdfConfig {
    fn leading(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Characters that fit on one line at the average glyph width.
    fn chars_per_line(&self) -> usize {
        let usable = self.page_width - 2.0 * self.margin;
        ((usable / (self.font_size * self.average_char_width)).floor() as usize).max(1)
    }
}

const BODY_FONT_KEY: &str = "F1";
const HEADING_FONT_KEY: &str = "F2";

/// PDF formatter
#[derive(Debug, Clone, Default)]
pub struct PdfFormatter {
    config: PdfConfig,
}

impl PdfFormatter {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }
}

/// Accumulates text operations page by page.
struct PageLayout<'a> {
    config: &'a PdfConfig,
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Baseline of the next line, measured from the page bottom.
    cursor_y: f32,
}

impl<'a> PageLayout<'a> {
    fn new(config: &'a PdfConfig) -> Self {
        Self { config, pages: Vec::new(), current: Vec::new(), cursor_y: config.page_height - config.margin }
    }

    fn break_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.cursor_y = self.config.page_height - self.config.margin;
    }

    fn line(&mut self, text: &str, font_key: &str) {
        if self.cursor_y - self.config.leading() < self.config.margin {
            self.break_page();
        }
        self.cursor_y -= self.config.leading();

        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font_key.into(), self.config.font_size.into()]),
            Operation::new("Td", vec![self.config.margin.into(), self.cursor_y.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn gap(&mut self, amount: f32) {
        self.cursor_y -= amount;
    }

    fn paragraph(&mut self, text: &str, font_key: &str) {
        let words: Vec<&str> = text.split_whitespace().collect();
        for line in wrap_words(&words, self.config.chars_per_line()) {
            self.line(&line, font_key);
        }
        self.gap(self.config.leading() * 0.5);
    }

    /// Returns every page's operations; an empty document still has one page.
    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

impl Formatter for PdfFormatter {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, doc: &RenderDocument) -> Result<Vec<u8>> {
        let config = &self.config;
        let mut layout = PageLayout::new(config);

        for block in &doc.blocks {
            match block {
                Block::Heading(text) => layout.paragraph(text, HEADING_FONT_KEY),
                Block::Paragraph(text) => layout.paragraph(text, BODY_FONT_KEY),
                Block::Spacer => layout.gap(config.leading()),
            }
        }

        let mut pdf = Document::with_version("1.5");
        let pages_id = pdf.new_object_id();

        let body_font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => config.body_font.as_str(),
            "Encoding" => "WinAnsiEncoding",
        });
        let heading_font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => config.heading_font.as_str(),
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = pdf.add_object(dictionary! {
            "Font" => dictionary! {
                BODY_FONT_KEY => body_font_id,
                HEADING_FONT_KEY => heading_font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in layout.finish() {
            let content = Content { operations };
            let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = pdf.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(config.page_width),
                Object::Real(config.page_height),
            ],
        };
        pdf.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        pdf.trailer.set("Root", catalog_id);
        pdf.compress();

        let mut bytes = Vec::new();
        pdf.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Wrap a slice of words to specified width
///
/// A word longer than `width` sits on its own line rather than being split.
fn wrap_words(words: &[&str], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line: Vec<&str> = Vec::new();
    let mut current_length = 0;

    for &word in words {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_length += 1 + word_len;
            current_line.push(word);
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }

    lines
}

/// Encodes text for the standard fonts' WinAnsiEncoding.
///
/// Latin-1 maps directly; typographic punctuation maps to its cp1252 slot;
/// anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '\u{20ac}' => 0x80,
            '\u{201a}' => 0x82,
            '\u{201e}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{2030}' => 0x89,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}
