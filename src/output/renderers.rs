//! PDF and DOCX rendering for generated documents

use crate::config::DocumentFormat;
use crate::error::{CareerCraftError, Result};
use crate::output::documents::{CoverLetterContent, GeneratedDocument, ResumeContent};
use crate::output::report::AnalysisReport;
use askama::Template;
use log::info;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::io::{BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};

pub trait DocumentRenderer {
    fn render(&self, document: &GeneratedDocument) -> Result<Vec<u8>>;
    fn format(&self) -> DocumentFormat;
}

pub fn renderer_for(format: DocumentFormat) -> Box<dyn DocumentRenderer> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfRenderer::default()),
        DocumentFormat::Docx => Box::new(DocxRenderer),
    }
}

/// Write the resume and cover letter for a report in every requested format.
pub fn export_documents(
    report: &AnalysisReport,
    headline: &str,
    formats: &[DocumentFormat],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let documents = [
        ("resume", ResumeContent::from_report(report, headline).to_document()),
        ("cover_letter", CoverLetterContent::from_report(report).to_document()),
    ];

    let mut written = Vec::new();
    for format in formats {
        let renderer = renderer_for(*format);
        for (stem, document) in &documents {
            let path = dir.join(format!("{}.{}", stem, format.extension()));
            std::fs::write(&path, renderer.render(document)?)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
    }
    Ok(written)
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 25.0;
const TOP_MARGIN: f32 = 272.0;
const BOTTOM_MARGIN: f32 = 25.0;

/// A4 PDF with the built-in Helvetica faces
pub struct PdfRenderer {
    /// Characters per line for body text
    wrap_width: usize,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self { wrap_width: 90 }
    }
}

struct PdfCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PdfCursor<'_> {
    fn advance(&mut self, step: f32) {
        self.y -= step;
        if self.y < BOTTOM_MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_MARGIN - step;
        }
    }

    fn write(&self, text: &str, size: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(LEFT_MARGIN), Mm(self.y), font);
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &GeneratedDocument) -> Result<Vec<u8>> {
        let (doc, page1, layer1) =
            PdfDocument::new(&document.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let font_regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut cursor = PdfCursor {
            doc: &doc,
            layer: doc.get_page(page1).get_layer(layer1),
            y: TOP_MARGIN,
        };

        cursor.write(&pdf_safe(&document.heading), 22.0, &font_bold);
        if let Some(subtitle) = &document.subtitle {
            cursor.advance(10.0);
            cursor.write(&pdf_safe(subtitle), 12.0, &font_regular);
        }
        cursor.advance(6.0);

        for section in &document.sections {
            if let Some(title) = &section.title {
                cursor.advance(10.0);
                cursor.write(&pdf_safe(title), 14.0, &font_bold);
                cursor.advance(2.0);
            }
            for paragraph in &section.paragraphs {
                let text = if section.bulleted {
                    format!("- {}", paragraph)
                } else {
                    paragraph.clone()
                };
                for line in wrap_text(&pdf_safe(&text), self.wrap_width) {
                    cursor.advance(5.5);
                    cursor.write(&line, 11.0, &font_regular);
                }
                cursor.advance(2.5);
            }
        }

        drop(cursor);
        let mut writer = BufWriter::new(Cursor::new(Vec::new()));
        doc.save(&mut writer)?;
        let buffer = writer
            .into_inner()
            .map_err(|e| CareerCraftError::Io(e.into_error()))?;
        Ok(buffer.into_inner())
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }
}

/// Built-in PDF fonts only cover WinAnsi; replace what they cannot show.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '-',
            c if c.is_ascii() || ('\u{00A0}'..='\u{00FF}').contains(&c) => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap on character count
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ---------------------------------------------------------------------------
// DOCX
// ---------------------------------------------------------------------------

/// Minimal WordprocessingML package: content types, package relationships
/// and the document body. Word and LibreOffice open it without styles.xml.
pub struct DocxRenderer;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

struct DocxParagraph {
    text: String,
    bold: bool,
    /// Font size in half-points
    size: u32,
    space_after: u32,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
{%- for p in paragraphs %}<w:p><w:pPr><w:spacing w:after="{{ p.space_after }}"/></w:pPr><w:r><w:rPr>{% if p.bold %}<w:b/>{% endif %}<w:sz w:val="{{ p.size }}"/></w:rPr><w:t xml:space="preserve">{{ p.text }}</w:t></w:r></w:p>{% endfor -%}
<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
)]
struct DocumentXml<'a> {
    paragraphs: &'a [DocxParagraph],
}

impl DocxRenderer {
    fn paragraphs(document: &GeneratedDocument) -> Vec<DocxParagraph> {
        let mut paragraphs = vec![DocxParagraph {
            text: document.heading.clone(),
            bold: true,
            size: 44,
            space_after: 80,
        }];
        if let Some(subtitle) = &document.subtitle {
            paragraphs.push(DocxParagraph {
                text: subtitle.clone(),
                bold: false,
                size: 24,
                space_after: 240,
            });
        }

        for section in &document.sections {
            if let Some(title) = &section.title {
                paragraphs.push(DocxParagraph {
                    text: title.clone(),
                    bold: true,
                    size: 28,
                    space_after: 120,
                });
            }
            for paragraph in &section.paragraphs {
                let text = if section.bulleted {
                    format!("\u{2022} {}", paragraph)
                } else {
                    paragraph.clone()
                };
                paragraphs.push(DocxParagraph {
                    text,
                    bold: false,
                    size: 22,
                    space_after: 160,
                });
            }
        }
        paragraphs
    }
}

impl DocumentRenderer for DocxRenderer {
    fn render(&self, document: &GeneratedDocument) -> Result<Vec<u8>> {
        let paragraphs = Self::paragraphs(document);
        let body = DocumentXml {
            paragraphs: &paragraphs,
        }
        .render()?;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        writer.start_file("[Content_Types].xml", options)?;
        writer.write_all(CONTENT_TYPES_XML.as_bytes())?;
        writer.start_file("_rels/.rels", options)?;
        writer.write_all(PACKAGE_RELS_XML.as_bytes())?;
        writer.start_file("word/document.xml", options)?;
        writer.write_all(body.as_bytes())?;

        Ok(writer.finish()?.into_inner())
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }
}
