//! Input manager: turns uploaded documents into lowercase plain text
//!
//! Extraction never fails past this boundary. Corrupt, unsupported or
//! oversized documents are logged and yield an empty string, which downstream
//! simply scores as "no skills found".

use crate::config::InputConfig;
use crate::error::{CareerCraftError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Decompressed DOCX bodies may be this many times larger than the container
const DOCX_EXPANSION_FACTOR: u64 = 8;

pub struct InputManager {
    limits: InputConfig,
    cache: HashMap<String, String>,
    docx: DocxExtractor,
    markdown: MarkdownExtractor,
}

impl InputManager {
    pub fn new(limits: InputConfig) -> Self {
        let max_xml = limits.max_file_bytes.saturating_mul(DOCX_EXPANSION_FACTOR);
        Self {
            limits,
            cache: HashMap::new(),
            docx: DocxExtractor::new(max_xml),
            markdown: MarkdownExtractor::new(),
        }
    }

    /// Read a document from disk and extract its text.
    ///
    /// Only a missing or unreadable path is an error; anything wrong with the
    /// document itself degrades to empty text.
    pub async fn extract_file(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        let metadata = fs::metadata(path).await.map_err(|e| {
            CareerCraftError::InvalidInput(format!("Cannot open {}: {}", path.display(), e))
        })?;

        let text = if metadata.len() > self.limits.max_file_bytes {
            warn!(
                "Skipping {}: {} bytes exceeds the {} byte limit",
                path.display(),
                metadata.len(),
                self.limits.max_file_bytes
            );
            String::new()
        } else {
            let bytes = fs::read(path).await?;
            let declared = path.extension().and_then(|ext| ext.to_str());
            info!("Extracting text from {}", path.display());
            self.extract_bytes(&bytes, declared)
        };

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    /// Extract lowercase text from an in-memory document.
    pub fn extract_bytes(&self, bytes: &[u8], declared: Option<&str>) -> String {
        if bytes.len() as u64 > self.limits.max_file_bytes {
            warn!(
                "Document of {} bytes exceeds the {} byte limit",
                bytes.len(),
                self.limits.max_file_bytes
            );
            return String::new();
        }

        let file_type = FileType::detect(declared, bytes);
        debug!("Detected file type {:?} (declared: {:?})", file_type, declared);

        let extracted = match file_type {
            FileType::Pdf => PdfExtractor.extract(bytes),
            FileType::Docx => self.docx.extract(bytes),
            FileType::Text => PlainTextExtractor.extract(bytes),
            FileType::Markdown => self.markdown.extract(bytes),
            FileType::Unknown => Err(CareerCraftError::UnsupportedFormat(format!(
                "{} (expected pdf, docx, txt or md)",
                declared.unwrap_or("unknown type")
            ))),
        };

        match extracted {
            Ok(text) => self.finish(&text),
            Err(e) => {
                warn!("Text extraction failed, continuing with empty text: {}", e);
                String::new()
            }
        }
    }

    fn finish(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        if lowered.chars().count() > self.limits.max_text_chars {
            warn!(
                "Extracted text truncated to {} characters",
                self.limits.max_text_chars
            );
            lowered.chars().take(self.limits.max_text_chars).collect()
        } else {
            lowered
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn manager() -> InputManager {
        InputManager::new(Config::default().input)
    }

    #[test]
    fn test_plain_text_is_lowercased() {
        let text = manager().extract_bytes(b"Proficient in Python and SQL", Some("txt"));
        assert_eq!(text, "proficient in python and sql");
    }

    #[test]
    fn test_unsupported_type_yields_empty_text() {
        assert_eq!(manager().extract_bytes(b"plain words", Some("odt")), "");
        assert_eq!(manager().extract_bytes(b"plain words", None), "");
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_text() {
        assert_eq!(manager().extract_bytes(b"%PDF-1.5 garbage", Some("pdf")), "");
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        let mut limits = Config::default().input;
        limits.max_file_bytes = 8;
        let manager = InputManager::new(limits);
        assert_eq!(manager.extract_bytes(b"python developer", Some("txt")), "");
    }

    #[test]
    fn test_text_is_truncated_to_char_limit() {
        let mut limits = Config::default().input;
        limits.max_text_chars = 6;
        let manager = InputManager::new(limits);
        assert_eq!(manager.extract_bytes(b"Python Developer", Some("txt")), "python");
    }
}
