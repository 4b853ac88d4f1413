//! Analysis orchestrator
//!
//! Composes detection, keyword scoring, context scoring and role ranking into
//! a single [`AnalysisReport`]. One call per request; no state is kept between
//! calls beyond the immutable catalog.

use crate::catalog::{Catalog, SkillTag};
use crate::config::{Config, ScoringConfig};
use crate::error::{CareerCraftError, Result};
use crate::output::report::{AnalysisReport, LearningItem, ScoreBreakdown, TargetKind};
use crate::processing::context::ContextScorer;
use crate::processing::scorer::{blend, match_skills, rank_roles};
use crate::processing::skill_detector::SkillDetector;
use chrono::Utc;
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Label used for free-text job descriptions
pub const CUSTOM_ROLE_LABEL: &str = "Target Role";

#[derive(Debug, Clone, PartialEq)]
pub enum JobTarget {
    /// Name of a catalog role preset
    Preset(String),
    /// Pasted or loaded job description text
    Description(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub candidate_name: String,
    /// Lowercase resume text; empty when extraction failed
    pub resume_text: String,
    pub target: JobTarget,
    /// Learning items already finished in earlier sessions
    pub completed_skills: BTreeSet<SkillTag>,
}

impl AnalysisRequest {
    pub fn new(candidate_name: impl Into<String>, resume_text: impl Into<String>, target: JobTarget) -> Self {
        Self {
            candidate_name: candidate_name.into(),
            resume_text: resume_text.into(),
            target,
            completed_skills: BTreeSet::new(),
        }
    }

    pub fn with_completed_skills(mut self, completed: BTreeSet<SkillTag>) -> Self {
        self.completed_skills = completed;
        self
    }
}

pub struct Analyzer {
    catalog: Catalog,
    detector: SkillDetector,
    context: ContextScorer,
    scoring: ScoringConfig,
}

struct ResolvedTarget {
    role: String,
    kind: TargetKind,
    required: BTreeSet<SkillTag>,
    job_text: Option<String>,
}

impl Analyzer {
    pub fn new(config: &Config, catalog: Catalog) -> Result<Self> {
        config.validate()?;
        let detector = SkillDetector::new(&catalog)?;
        let context = ContextScorer::new(
            config.scoring.context_floor,
            config.scoring.context_min_tokens,
        );
        info!(
            "Analyzer ready: {} skills, {} surface forms",
            catalog.tags().len(),
            detector.surface_form_count()
        );

        Ok(Self {
            catalog,
            detector,
            context,
            scoring: config.scoring.clone(),
        })
    }

    /// Run one analysis.
    ///
    /// Only an unknown preset role is an error. Missing resume text or an
    /// empty requirement set produce a zero score plus a warning.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        let target = self.resolve_target(&request.target)?;
        let mut warnings = Vec::new();

        let resume_empty = request.resume_text.trim().is_empty();
        if resume_empty {
            warn!("Resume text is empty; no skills can be detected");
            warnings.push(
                "No text could be extracted from the resume. Upload a text-based PDF or DOCX."
                    .to_string(),
            );
        }
        if target.required.is_empty() {
            warn!("No required skills for '{}'", target.role);
            warnings.push(
                "The job description does not mention any known skill. Paste a fuller description or pick a preset role."
                    .to_string(),
            );
        }

        let detected_counts = self.detector.detect_with_counts(&request.resume_text);
        let detected: BTreeSet<SkillTag> = detected_counts.keys().cloned().collect();
        debug!("Detected {} skills in resume", detected.len());

        let weights = self
            .scoring
            .use_weights
            .then(|| self.catalog.weights());
        let keyword = match_skills(&detected, &target.required, weights);

        let context = match &target.job_text {
            Some(job_text) if self.scoring.context_weight > 0.0 && !resume_empty => {
                Some(self.context.score(&request.resume_text, job_text))
            }
            _ => None,
        };

        let readiness_score = match (&context, target.required.is_empty() || resume_empty) {
            (_, true) => 0,
            (Some(context), false) => blend(
                keyword.score,
                context.score,
                self.scoring.keyword_weight,
                self.scoring.context_weight,
            ),
            (None, false) => keyword.score,
        };

        let mut role_ranking = rank_roles(&detected, self.catalog.roles(), weights);
        role_ranking.truncate(self.scoring.top_roles);

        let learning_plan = keyword
            .missing
            .iter()
            .map(|skill| LearningItem {
                skill: skill.clone(),
                resource: self.catalog.resource(skill).cloned(),
                completed: request.completed_skills.contains(skill),
            })
            .collect();

        let summary = summarize(
            &request.candidate_name,
            &target.role,
            readiness_score,
            keyword.matched.len(),
            target.required.len(),
            &keyword.missing,
        );

        info!(
            "Analysis for '{}': readiness {}% (keyword {}%, context {:?})",
            target.role,
            readiness_score,
            keyword.score,
            context.map(|c| c.score)
        );

        Ok(AnalysisReport {
            candidate_name: request.candidate_name.clone(),
            role: target.role,
            target: target.kind,
            readiness_score,
            score_breakdown: ScoreBreakdown {
                keyword_score: keyword.score,
                weighted: weights.is_some(),
                context_score: context.map(|c| c.score),
                context_degenerate: context.is_some_and(|c| c.degenerate),
                keyword_weight: self.scoring.keyword_weight,
                context_weight: self.scoring.context_weight,
            },
            required_skills: target.required,
            detected_skills: detected_counts,
            matched_skills: keyword.matched,
            missing_skills: keyword.missing,
            role_ranking,
            learning_plan,
            summary,
            warnings,
            generated_at: Utc::now(),
        })
    }

    fn resolve_target(&self, target: &JobTarget) -> Result<ResolvedTarget> {
        match target {
            JobTarget::Preset(name) => {
                let role = self.catalog.role(name).ok_or_else(|| {
                    let hint = self
                        .catalog
                        .suggest_role(name)
                        .map(|s| format!(" Did you mean '{}'?", s))
                        .unwrap_or_default();
                    CareerCraftError::InvalidInput(format!("Unknown role '{}'.{}", name, hint))
                })?;
                Ok(ResolvedTarget {
                    role: role.name.clone(),
                    kind: TargetKind::Preset,
                    required: role.skills.clone(),
                    job_text: role.description.clone(),
                })
            }
            JobTarget::Description(text) => {
                let required = self.detector.detect(text);
                debug!("Job description requires {} known skills", required.len());
                Ok(ResolvedTarget {
                    role: CUSTOM_ROLE_LABEL.to_string(),
                    kind: TargetKind::JobDescription,
                    required,
                    job_text: Some(text.clone()),
                })
            }
        }
    }
}

fn summarize(
    name: &str,
    role: &str,
    score: u8,
    matched: usize,
    required: usize,
    missing: &BTreeSet<SkillTag>,
) -> String {
    let subject = if name.trim().is_empty() { "The candidate" } else { name.trim() };

    if required == 0 {
        return format!("{} could not be scored for {}: no required skills were found.", subject, role);
    }

    let head = format!(
        "{} is {}% ready for {}, covering {} of {} required skills.",
        subject, score, role, matched, required
    );
    if missing.is_empty() {
        format!("{} Every required skill is already on the resume.", head)
    } else {
        let next: Vec<&str> = missing.iter().take(3).map(SkillTag::as_str).collect();
        format!("{} Focus next on: {}.", head, next.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer_with(config: Config) -> Analyzer {
        Analyzer::new(&config, Catalog::embedded().unwrap()).unwrap()
    }

    fn keyword_only() -> Config {
        let mut config = Config::default();
        config.scoring.use_weights = false;
        config.scoring.context_weight = 0.0;
        config
    }

    #[test]
    fn test_job_description_end_to_end() {
        let analyzer = analyzer_with(keyword_only());
        let request = AnalysisRequest::new(
            "Jane Doe",
            "proficient in python and sql",
            JobTarget::Description("Looking for Python, SQL and Docker experience".to_string()),
        );
        let report = analyzer.analyze(&request).unwrap();

        let tags = |names: &[&str]| names.iter().map(|n| SkillTag::new(n)).collect::<BTreeSet<_>>();
        assert_eq!(report.required_skills, tags(&["python", "sql", "docker"]));
        assert_eq!(report.matched_skills, tags(&["python", "sql"]));
        assert_eq!(report.missing_skills, tags(&["docker"]));
        assert_eq!(report.score_breakdown.keyword_score, 67);
        assert_eq!(report.readiness_score, 67);
        assert_eq!(report.role, CUSTOM_ROLE_LABEL);
        assert!(report.warnings.is_empty());
        assert!(report.summary.contains("Focus next on: docker"));
    }

    #[test]
    fn test_preset_role_uses_catalog_weights() {
        let mut config = Config::default();
        config.scoring.context_weight = 0.0;
        let analyzer = analyzer_with(config);
        let request = AnalysisRequest::new(
            "Sam",
            "data work with sql and excel pivot tables",
            JobTarget::Preset("data analyst".to_string()),
        );
        let report = analyzer.analyze(&request).unwrap();
        // python 3, sql 3, excel 1, statistics 2 -> (3 + 1) / 9
        assert_eq!(report.role, "Data Analyst");
        assert!(report.score_breakdown.weighted);
        assert_eq!(report.readiness_score, 44);
    }

    #[test]
    fn test_context_blend_applies_with_job_text() {
        let analyzer = analyzer_with(Config::default());
        let request = AnalysisRequest::new(
            "Jane",
            "python developer",
            JobTarget::Description("python".to_string()),
        );
        let report = analyzer.analyze(&request).unwrap();
        // Keyword 100, context falls back to the floor of 10.
        assert_eq!(report.score_breakdown.keyword_score, 100);
        assert_eq!(report.score_breakdown.context_score, Some(10));
        assert!(report.score_breakdown.context_degenerate);
        assert_eq!(report.readiness_score, 64);
    }

    #[test]
    fn test_unknown_role_suggests_closest() {
        let analyzer = analyzer_with(Config::default());
        let request = AnalysisRequest::new("Jane", "python", JobTarget::Preset("Backend Develper".to_string()));
        match analyzer.analyze(&request) {
            Err(CareerCraftError::InvalidInput(message)) => {
                assert!(message.contains("Did you mean 'Backend Developer'?"));
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_inputs_score_zero_with_warnings() {
        let analyzer = analyzer_with(Config::default());
        let request = AnalysisRequest::new(
            "Jane",
            "",
            JobTarget::Description("we value kindness and punctuality".to_string()),
        );
        let report = analyzer.analyze(&request).unwrap();
        assert_eq!(report.readiness_score, 0);
        assert!(report.required_skills.is_empty());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_empty_resume_scores_zero_with_context_enabled() {
        let analyzer = analyzer_with(Config::default());
        let targets = [
            JobTarget::Description("need python sql docker developer".to_string()),
            JobTarget::Preset("Backend Developer".to_string()),
        ];
        for target in targets {
            let report = analyzer.analyze(&AnalysisRequest::new("Jane", "  \n", target)).unwrap();
            assert!(!report.required_skills.is_empty());
            assert_eq!(report.readiness_score, 0);
            assert_eq!(report.score_breakdown.keyword_score, 0);
            assert_eq!(report.score_breakdown.context_score, None);
            assert_eq!(report.warnings.len(), 1);
        }
    }

    #[test]
    fn test_learning_plan_marks_completed_skills() {
        let analyzer = analyzer_with(keyword_only());
        let completed: BTreeSet<SkillTag> = [SkillTag::new("docker")].into_iter().collect();
        let request = AnalysisRequest::new("Jane", "python", JobTarget::Preset("Backend Developer".to_string()))
            .with_completed_skills(completed);
        let report = analyzer.analyze(&request).unwrap();

        let docker = report
            .learning_plan
            .iter()
            .find(|item| item.skill.as_str() == "docker")
            .unwrap();
        assert!(docker.completed);
        assert!(docker.resource.is_some());
        assert!(report.learning_plan.iter().filter(|item| item.completed).count() == 1);
    }

    #[test]
    fn test_role_ranking_is_truncated_and_sorted() {
        let analyzer = analyzer_with(keyword_only());
        let request = AnalysisRequest::new(
            "Jane",
            "python, sql, git, docker and rest api work",
            JobTarget::Preset("Backend Developer".to_string()),
        );
        let report = analyzer.analyze(&request).unwrap();
        assert_eq!(report.role_ranking.len(), 3);
        assert_eq!(report.role_ranking[0].role, "Backend Developer");
        assert_eq!(report.role_ranking[0].score, 100);
        assert!(report
            .role_ranking
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }
}
