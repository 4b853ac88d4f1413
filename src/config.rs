//! Configuration management for careercraft

use crate::error::{CareerCraftError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub scoring: ScoringConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub documents: DocumentsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog TOML to load instead of the embedded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub use_weights: bool,
    pub keyword_weight: f64,
    pub context_weight: f64,
    /// Context score reported when vectorization has nothing to work with
    pub context_floor: u8,
    pub context_min_tokens: usize,
    pub top_roles: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_file_bytes: u64,
    pub max_text_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentsConfig {
    pub formats: Vec<DocumentFormat>,
    pub candidate_headline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            scoring: ScoringConfig {
                use_weights: true,
                keyword_weight: 0.6,
                context_weight: 0.4,
                context_floor: 10,
                context_min_tokens: 2,
                top_roles: 3,
            },
            input: InputConfig {
                max_file_bytes: 10 * 1024 * 1024,
                max_text_chars: 200_000,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
            documents: DocumentsConfig {
                formats: vec![DocumentFormat::Pdf, DocumentFormat::Docx],
                candidate_headline: "Entry-Level Candidate".to_string(),
            },
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location.
    ///
    /// A missing default file is created with default values; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CareerCraftError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overwrite the file at `path` (or the default location) with defaults.
    pub fn reset(path: Option<&Path>) -> Result<Self> {
        let config = Self::default();
        match path {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("careercraft")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        if scoring.keyword_weight < 0.0 || scoring.context_weight < 0.0 {
            return Err(CareerCraftError::Configuration(
                "scoring weights must not be negative".to_string(),
            ));
        }
        if scoring.keyword_weight + scoring.context_weight <= 0.0 {
            return Err(CareerCraftError::Configuration(
                "scoring.keyword_weight and scoring.context_weight cannot both be zero".to_string(),
            ));
        }
        if scoring.context_floor > 100 {
            return Err(CareerCraftError::Configuration(format!(
                "scoring.context_floor must be within 0..=100, got {}",
                scoring.context_floor
            )));
        }
        if self.input.max_file_bytes == 0 {
            return Err(CareerCraftError::Configuration(
                "input.max_file_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
