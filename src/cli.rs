//! CLI interface for careercraft

use crate::config::{DocumentFormat, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Resume file types accepted by `analyze`
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

#[derive(Parser)]
#[command(name = "careercraft")]
#[command(about = "Resume skill-gap analysis and career readiness scoring")]
#[command(long_about = "Detect skills in a resume, score them against a preset role or job description, rank best-fit roles, and generate a tailored resume and cover letter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a role or job description
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Preset role name (see `careercraft roles`)
        #[arg(long, conflicts_with_all = ["job", "job_text"])]
        role: Option<String>,

        /// Path to a job description file
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description text
        #[arg(long)]
        job_text: Option<String>,

        /// Candidate name used in the report and generated documents
        #[arg(short, long, default_value = "Candidate")]
        name: String,

        /// Output format: console, json, markdown (defaults to config)
        #[arg(short, long)]
        output: Option<String>,

        /// Show detected skill counts
        #[arg(short, long)]
        detailed: bool,

        /// Save the formatted report to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Write a resume and cover letter into this directory
        #[arg(short, long)]
        export_dir: Option<PathBuf>,

        /// Document formats for --export-dir, comma separated (pdf,docx)
        #[arg(short, long)]
        formats: Option<String>,

        /// Session file to read completed skills from and record this run in
        #[arg(long)]
        session: Option<PathBuf>,
    },

    /// List preset roles and their required skills
    Roles,

    /// List the skill vocabulary by category
    Skills,

    /// Show or update learning progress in a session file
    Progress {
        /// Session file
        #[arg(long)]
        session: PathBuf,

        /// Mark a skill's learning item as completed
        #[arg(long)]
        complete: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Parse a comma separated list of document formats
pub fn parse_document_formats(formats: &str) -> Result<Vec<DocumentFormat>, String> {
    let mut parsed = Vec::new();
    for name in formats.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let format = match name.to_lowercase().as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            _ => return Err(format!("Invalid document format: {}. Supported: pdf, docx", name)),
        };
        if !parsed.contains(&format) {
            parsed.push(format);
        }
    }
    if parsed.is_empty() {
        return Err("No document formats given".to_string());
    }
    Ok(parsed)
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
