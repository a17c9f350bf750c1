//! Minimal WordprocessingML (.docx) writer.
//!
//! A .docx file is a ZIP package of XML parts. Only the four parts Word needs
//! to open a plain document are written: content types, package
//! relationships, the main document and a styles part that sets the default
//! font.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{Block, Formatter, RenderDocument};
use crate::Result;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Configuration for Word output
#[derive(Debug, Clone)]
pub struct DocxConfig {
    /// Font family for every run
    pub font_name: String,
    /// Font size in points (headings use the same size, bold)
    pub font_size_pt: u32,
}

impl Default for DocxConfig {
    fn default() -> Self {
        Self { font_name: "Times New Roman".to_string(), font_size_pt: 12 }
    }
}

/// Word formatter
#[derive(Debug, Clone, Default)]
pub struct DocxFormatter {
    config: DocxConfig,
}

impl DocxFormatter {
    pub fn new(config: DocxConfig) -> Self {
        Self { config }
    }

    /// Builds `word/document.xml` for the given blocks.
    fn document_xml(&self, doc: &RenderDocument) -> String {
        let mut body = String::new();

        for block in &doc.blocks {
            match block {
                Block::Heading(text) => body.push_str(&self.paragraph_xml(text, true)),
                Block::Paragraph(text) => body.push_str(&self.paragraph_xml(text, false)),
                Block::Spacer => body.push_str("<w:p/>"),
            }
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORD_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
        )
    }

    fn run_properties(&self, bold: bool) -> String {
        let font = xml_escape(&self.config.font_name);
        let half_points = self.config.font_size_pt * 2;
        let bold = if bold { "<w:b/>" } else { "" };
        format!(
            r#"<w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>{bold}<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/></w:rPr>"#
        )
    }

    fn paragraph_xml(&self, text: &str, bold: bool) -> String {
        format!(
            r#"<w:p><w:r>{}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            self.run_properties(bold),
            xml_escape(text)
        )
    }

    /// Builds `word/styles.xml` with the configured default font.
    fn styles_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{WORD_NS}"><w:docDefaults><w:rPrDefault>{}</w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/>{}</w:style></w:styles>"#,
            self.run_properties(false),
            self.run_properties(false)
        )
    }
}

impl Formatter for DocxFormatter {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn render(&self, doc: &RenderDocument) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
            ("word/document.xml", self.document_xml(doc)),
            ("word/styles.xml", self.styles_xml()),
        ];

        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

/// Escapes text for XML element and attribute content.
///
/// Control characters other than tab, newline and carriage return are not
/// allowed in XML 1.0 and are dropped.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}
