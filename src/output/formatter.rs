//! Report formatters: colored console, JSON and Markdown

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::{score_label, AnalysisReport, LearningItem, TargetKind};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and optional detail
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn score_color(score: u8) -> Color {
    match score {
        90..=100 => Color::Green,
        75..=89 => Color::BrightGreen,
        60..=74 => Color::Yellow,
        40..=59 => Color::BrightYellow,
        _ => Color::Red,
    }
}

fn join_tags<'a>(tags: impl IntoIterator<Item = &'a crate::catalog::SkillTag>) -> String {
    tags.into_iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let badge = score_label(score);
        if self.use_colors {
            format!("[{}]", badge.color(score_color(score)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_learning_item(&self, item: &LearningItem) -> String {
        let marker = if item.completed { "[x]" } else { "[ ]" };
        let skill = if item.completed {
            self.colorize(item.skill.as_str(), Color::BrightBlack)
        } else {
            self.colorize(item.skill.as_str(), Color::Yellow)
        };
        format!("  {} {}: {}\n", marker, skill, item.describe())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CAREER READINESS REPORT", 1));
        output.push_str(&format!(
            "Candidate: {} | Role: {} | Generated: {}\n",
            report.candidate_name,
            report.role,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        for warning in &report.warnings {
            output.push_str(&format!("{} {}\n", self.colorize("warning:", Color::Red), warning));
        }

        output.push_str(&self.format_header("Readiness", 2));
        output.push_str(&format!(
            "Readiness Score: {}% {}\n",
            report.readiness_score,
            self.format_score_badge(report.readiness_score)
        ));
        output.push_str(&format!("{}\n", self.colorize(&report.summary, Color::Cyan)));

        let breakdown = &report.score_breakdown;
        output.push_str(&format!(
            "  Keyword match: {}%{}\n",
            breakdown.keyword_score,
            if breakdown.weighted { " (weighted)" } else { "" }
        ));
        if let Some(context) = breakdown.context_score {
            output.push_str(&format!(
                "  Context match: {}%{}\n",
                context,
                if breakdown.context_degenerate { " (too little text, floor applied)" } else { "" }
            ));
            output.push_str(&format!(
                "  Blend: {:.0}% keyword / {:.0}% context\n",
                breakdown.keyword_weight * 100.0,
                breakdown.context_weight * 100.0
            ));
        }

        output.push_str(&self.format_header("Skills", 2));
        if report.matched_skills.is_empty() {
            output.push_str("  Matched: none\n");
        } else {
            output.push_str(&format!(
                "  Matched: {}\n",
                self.colorize(&join_tags(&report.matched_skills), Color::Green)
            ));
        }
        if report.missing_skills.is_empty() {
            output.push_str("  Missing: none\n");
        } else {
            output.push_str(&format!(
                "  Missing: {}\n",
                self.colorize(&join_tags(&report.missing_skills), Color::Red)
            ));
        }

        if !report.role_ranking.is_empty() {
            output.push_str(&self.format_header("Best-Fit Roles", 2));
            for (i, fit) in report.role_ranking.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} {} ({}/{} skills)\n",
                    i + 1,
                    fit.role,
                    self.colorize(&format!("{}%", fit.score), score_color(fit.score)),
                    fit.matched,
                    fit.required
                ));
            }
        }

        if !report.learning_plan.is_empty() {
            output.push_str(&self.format_header("Learning Plan", 2));
            for item in &report.learning_plan {
                output.push_str(&self.format_learning_item(item));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Detected Skills", 3));
            if report.detected_skills.is_empty() {
                output.push_str("  none\n");
            }
            for (skill, count) in &report.detected_skills {
                output.push_str(&format!("  • {} (x{})\n", skill, count));
            }
            output.push_str(&format!(
                "\nRequired for {}: {}\n",
                report.role,
                join_tags(&report.required_skills)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# Career Readiness Report: {}\n\n", report.candidate_name));

        if self.include_metadata {
            let target = match report.target {
                TargetKind::Preset => "preset role",
                TargetKind::JobDescription => "job description",
            };
            output.push_str(&format!(
                "**Role:** {} ({}) | **Generated:** {}\n\n",
                report.role,
                target,
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        for warning in &report.warnings {
            output.push_str(&format!("> **Warning:** {}\n\n", warning));
        }

        output.push_str("## Readiness\n\n");
        output.push_str(&format!(
            "**Readiness Score:** {}% ({})\n\n",
            report.readiness_score,
            score_label(report.readiness_score)
        ));
        output.push_str(&format!("{}\n\n", report.summary));

        let breakdown = &report.score_breakdown;
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        match breakdown.context_score {
            Some(context) => {
                output.push_str(&format!(
                    "| Keyword match | {}% | {:.0}% |\n",
                    breakdown.keyword_score,
                    breakdown.keyword_weight * 100.0
                ));
                output.push_str(&format!(
                    "| Context match | {}% | {:.0}% |\n",
                    context,
                    breakdown.context_weight * 100.0
                ));
            }
            None => {
                output.push_str(&format!("| Keyword match | {}% | 100% |\n", breakdown.keyword_score));
            }
        }
        output.push('\n');

        output.push_str("## Skills\n\n");
        output.push_str(&format!("- **Required:** {}\n", or_none(&join_tags(&report.required_skills))));
        output.push_str(&format!("- **Matched:** {}\n", or_none(&join_tags(&report.matched_skills))));
        output.push_str(&format!("- **Missing:** {}\n\n", or_none(&join_tags(&report.missing_skills))));

        if !report.role_ranking.is_empty() {
            output.push_str("## Best-Fit Roles\n\n");
            for (i, fit) in report.role_ranking.iter().enumerate() {
                output.push_str(&format!(
                    "{}. **{}**: {}% ({}/{} skills)\n",
                    i + 1,
                    fit.role,
                    fit.score,
                    fit.matched,
                    fit.required
                ));
            }
            output.push('\n');
        }

        if !report.learning_plan.is_empty() {
            output.push_str("## Learning Plan\n\n");
            for item in &report.learning_plan {
                let resource = match &item.resource {
                    Some(resource) => match &resource.url {
                        Some(url) => format!("[{}]({})", resource.title, url),
                        None => resource.title.clone(),
                    },
                    None => item.describe(),
                };
                output.push_str(&format!(
                    "- [{}] `{}`: {}\n",
                    if item.completed { "x" } else { " " },
                    item.skill,
                    resource
                ));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by careercraft v{}*\n", env!("CARGO_PKG_VERSION")));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn or_none(list: &str) -> &str {
    if list.is_empty() {
        "none"
    } else {
        list
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, config.detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, candidate_name: &str, timestamp: bool) -> String {
    let base_name: String = candidate_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let base_name = if base_name.is_empty() { "candidate".to_string() } else { base_name };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_readiness{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_readiness{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_readiness{}.md", base_name, timestamp_suffix),
    }
}
