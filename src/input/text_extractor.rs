//! Text extraction from various document formats

use crate::error::{CareerCraftError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};
use std::panic;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs
        let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(CareerCraftError::PdfExtraction(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            Err(_) => Err(CareerCraftError::PdfExtraction(
                "PDF parser aborted on malformed input".to_string(),
            )),
        }
    }
}

pub struct DocxExtractor {
    max_xml_bytes: u64,
    markup: MarkupStripper,
}

impl DocxExtractor {
    pub fn new(max_xml_bytes: u64) -> Self {
        Self {
            max_xml_bytes,
            markup: MarkupStripper::new(),
        }
    }

    fn xml_to_text(&self, xml: &str) -> String {
        let text = xml
            .replace("</w:p>", "\n")
            .replace("<w:tab/>", " ")
            .replace("<w:br/>", "\n");

        self.markup.strip(&text)
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| CareerCraftError::DocxExtraction(format!("Not a DOCX container: {}", e)))?;

        let entry = archive
            .by_name("word/document.xml")
            .map_err(|e| CareerCraftError::DocxExtraction(format!("Missing document body: {}", e)))?;

        if entry.size() > self.max_xml_bytes {
            return Err(CareerCraftError::DocxExtraction(format!(
                "Document body of {} bytes exceeds the {} byte limit",
                entry.size(),
                self.max_xml_bytes
            )));
        }

        // The declared size can lie; never read past the cap either way.
        let mut raw = Vec::new();
        entry
            .take(self.max_xml_bytes.saturating_add(1))
            .read_to_end(&mut raw)
            .map_err(|e| CareerCraftError::DocxExtraction(format!("Unreadable document body: {}", e)))?;
        if raw.len() as u64 > self.max_xml_bytes {
            return Err(CareerCraftError::DocxExtraction(format!(
                "Document body exceeds the {} byte limit",
                self.max_xml_bytes
            )));
        }

        let xml = String::from_utf8(raw)
            .map_err(|e| CareerCraftError::DocxExtraction(format!("Document body is not UTF-8: {}", e)))?;

        Ok(self.xml_to_text(&xml))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

pub struct MarkdownExtractor {
    markup: MarkupStripper,
}

impl MarkdownExtractor {
    pub fn new() -> Self {
        Self {
            markup: MarkupStripper::new(),
        }
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ");

        self.markup.strip(&text)
    }
}

impl Default for MarkdownExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = String::from_utf8_lossy(bytes);

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

/// Removes tags from XML/HTML and decodes character references
struct MarkupStripper {
    tag_regex: Regex,
    numeric_entity_regex: Regex,
}

impl MarkupStripper {
    fn new() -> Self {
        Self {
            tag_regex: Regex::new(r"<[^>]*>").expect("Invalid tag regex"),
            numeric_entity_regex: Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));")
                .expect("Invalid entity regex"),
        }
    }

    /// Strip tags, decode entities, drop blank lines.
    fn strip(&self, markup: &str) -> String {
        let stripped = self.tag_regex.replace_all(markup, "");

        self.decode_entities(&stripped)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Decodes named and numeric references. `&amp;` goes last so that
    /// escaped entities like `&amp;lt;` stay literal.
    fn decode_entities(&self, text: &str) -> String {
        let named = text
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'");

        let numeric = self
            .numeric_entity_regex
            .replace_all(&named, |caps: &regex::Captures| {
                let code = match (caps.get(1), caps.get(2)) {
                    (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                    (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
                    (None, None) => None,
                };
                match code.and_then(char::from_u32) {
                    Some(c) if c != '\0' => c.to_string(),
                    _ => caps[0].to_string(),
                }
            });

        numeric.replace("&amp;", "&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with_body(body: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let body = r#"<w:document><w:body>
            <w:p><w:r><w:t>Proficient in Python</w:t></w:r></w:p>
            <w:p><w:r><w:t>SQL</w:t></w:r><w:r><w:tab/><w:t>R&amp;D</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = DocxExtractor::new(1 << 20).extract(&docx_with_body(body)).unwrap();
        assert_eq!(text, "Proficient in Python\nSQL R&D");
    }

    #[test]
    fn test_numeric_references_are_decoded() {
        let body = r#"<w:document><w:body>
            <w:p><w:r><w:t>sql &#38; &#60;docker&#62; &#x2019;s &#34;ok&#34;</w:t></w:r></w:p>
            <w:p><w:r><w:t>&amp;#38; &#xD800; &#99999999;</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = DocxExtractor::new(1 << 20).extract(&docx_with_body(body)).unwrap();
        assert_eq!(text, "sql & <docker> \u{2019}s \"ok\"\n&#38; &#xD800; &#99999999;");
    }

    #[test]
    fn test_oversized_docx_body_is_rejected() {
        let body = format!("<w:p><w:t>{}</w:t></w:p>", "python ".repeat(200));
        let bytes = docx_with_body(&body);
        let result = DocxExtractor::new(64).extract(&bytes);
        assert!(matches!(result, Err(CareerCraftError::DocxExtraction(_))));
        assert!(DocxExtractor::new(1 << 20).extract(&bytes).is_ok());
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        let result = DocxExtractor::new(1 << 20).extract(b"not a zip");
        assert!(matches!(result, Err(CareerCraftError::DocxExtraction(_))));
    }

    #[test]
    fn test_docx_requires_document_body() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", zip::write::FileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(DocxExtractor::new(1 << 20).extract(&bytes).is_err());
    }

    #[test]
    fn test_pdf_garbage_is_error_not_panic() {
        let result = PdfExtractor.extract(b"%PDF-1.4 this is not really a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_markdown_formatting_removed() {
        let md = "## Skills\n\n- **Python**\n- Docker &amp; Kubernetes\n";
        let text = MarkdownExtractor::new().extract(md.as_bytes()).unwrap();
        assert!(text.contains("Skills"));
        assert!(text.contains("Python"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
    }
}
