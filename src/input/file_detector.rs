//! File type detection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Guess from magic bytes. Only binary containers are recognised.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF") {
            FileType::Pdf
        } else if bytes.starts_with(b"PK\x03\x04") {
            FileType::Docx
        } else {
            FileType::Unknown
        }
    }

    /// Declared extension wins; content sniffing covers missing or unknown ones.
    pub fn detect(declared: Option<&str>, bytes: &[u8]) -> Self {
        match declared.map(Self::from_extension) {
            Some(FileType::Unknown) | None => Self::sniff(bytes),
            Some(file_type) => file_type,
        }
    }
}
