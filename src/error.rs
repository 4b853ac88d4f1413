//! Error handling for careercraft

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerCraftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill catalog error: {0}")]
    Catalog(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Document generation error: {0}")]
    DocumentGeneration(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CareerCraftError>;

impl From<zip::result::ZipError> for CareerCraftError {
    fn from(err: zip::result::ZipError) -> Self {
        CareerCraftError::DocumentGeneration(format!("zip container: {}", err))
    }
}

impl From<printpdf::Error> for CareerCraftError {
    fn from(err: printpdf::Error) -> Self {
        CareerCraftError::DocumentGeneration(format!("pdf: {}", err))
    }
}

impl From<askama::Error> for CareerCraftError {
    fn from(err: askama::Error) -> Self {
        CareerCraftError::DocumentGeneration(format!("template: {}", err))
    }
}

impl From<toml::de::Error> for CareerCraftError {
    fn from(err: toml::de::Error) -> Self {
        CareerCraftError::Configuration(format!("Failed to parse TOML: {}", err))
    }
}

impl From<toml::ser::Error> for CareerCraftError {
    fn from(err: toml::ser::Error) -> Self {
        CareerCraftError::Configuration(format!("Failed to serialize TOML: {}", err))
    }
}
