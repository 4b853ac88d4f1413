//! Analysis report structures

use crate::catalog::{LearningResource, SkillTag};
use crate::processing::scorer::RoleFit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything one analysis produces, ready for formatting or export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub candidate_name: String,

    /// Preset role name, or a generic label for free-text job descriptions
    pub role: String,

    pub target: TargetKind,

    /// Final readiness percentage (keyword score, blended with context when available)
    pub readiness_score: u8,

    pub score_breakdown: ScoreBreakdown,

    pub required_skills: BTreeSet<SkillTag>,

    pub detected_skills: BTreeMap<SkillTag, usize>,

    pub matched_skills: BTreeSet<SkillTag>,

    pub missing_skills: BTreeSet<SkillTag>,

    /// Best-fit presets, highest score first
    pub role_ranking: Vec<RoleFit>,

    pub learning_plan: Vec<LearningItem>,

    /// One-sentence verdict used in reports and generated documents
    pub summary: String,

    /// Problems with the inputs that did not stop the analysis
    pub warnings: Vec<String>,

    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Preset,
    JobDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_score: u8,
    pub weighted: bool,
    pub context_score: Option<u8>,
    /// True when the context score is the configured floor
    pub context_degenerate: bool,
    pub keyword_weight: f64,
    pub context_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningItem {
    pub skill: SkillTag,
    pub resource: Option<LearningResource>,
    pub completed: bool,
}

impl LearningItem {
    /// Resource title, or a generic hint for skills without a curated resource
    pub fn describe(&self) -> String {
        match &self.resource {
            Some(LearningResource { title, url: Some(url) }) => format!("{} ({})", title, url),
            Some(LearningResource { title, url: None }) => title.clone(),
            None => format!("Search for an introductory {} course or tutorial", self.skill),
        }
    }
}

/// Labels used by every formatter for a readiness percentage
pub fn score_label(score: u8) -> &'static str {
    match score {
        90..=100 => "EXCELLENT",
        75..=89 => "STRONG",
        60..=74 => "GOOD",
        40..=59 => "FAIR",
        _ => "NEEDS WORK",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learning_item_description() {
        let with_url = LearningItem {
            skill: SkillTag::new("docker"),
            resource: Some(LearningResource {
                title: "Docker Essentials".to_string(),
                url: Some("https://example.com/docker".to_string()),
            }),
            completed: false,
        };
        assert_eq!(with_url.describe(), "Docker Essentials (https://example.com/docker)");

        let without = LearningItem {
            skill: SkillTag::new("rust"),
            resource: None,
            completed: false,
        };
        assert!(without.describe().contains("rust"));
    }

    #[test]
    fn test_score_labels() {
        assert_eq!(score_label(100), "EXCELLENT");
        assert_eq!(score_label(67), "GOOD");
        assert_eq!(score_label(0), "NEEDS WORK");
    }
}
