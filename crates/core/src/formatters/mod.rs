//! Output formatters: DOCX and PDF documents and the plain-text report.
//!
//! Both document formatters consume the same [`RenderDocument`], so a run's
//! Word and PDF files always carry identical text.

pub mod docx;
pub mod pdf;
pub mod report;

pub use docx::{DocxConfig, DocxFormatter};
pub use pdf::{PdfConfig, PdfFormatter};
pub use report::{REPORT_FILE_NAME, convert_to_report};

use crate::Result;

/// One renderable unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Bold line at body size (article titles).
    Heading(String),
    /// Regular paragraph.
    Paragraph(String),
    /// Empty paragraph separating articles in combined output.
    Spacer,
}

/// Ordered blocks making up one output document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDocument {
    pub blocks: Vec<Block>,
}

impl RenderDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single article: bold title followed by its paragraphs.
    pub fn article(title: &str, paragraphs: &[String]) -> Self {
        let mut doc = Self::new();
        doc.push_article(title, paragraphs);
        doc
    }

    pub fn push_article(&mut self, title: &str, paragraphs: &[String]) {
        self.blocks.push(Block::Heading(title.to_string()));
        self.blocks.extend(paragraphs.iter().cloned().map(Block::Paragraph));
    }

    pub fn push_paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph(text.into()));
    }

    pub fn push_spacer(&mut self) {
        self.blocks.push(Block::Spacer);
    }
}

/// A document formatter producing the bytes of one file type.
pub trait Formatter {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Renders `doc` to the file's bytes.
    fn render(&self, doc: &RenderDocument) -> Result<Vec<u8>>;
}
