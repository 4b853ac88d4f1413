//! Per-user session state
//!
//! Progress that used to live in UI globals (readiness score, finished
//! learning items) is an explicit value: loaded from a file the user names,
//! updated by each request, and written back.

use crate::catalog::SkillTag;
use crate::error::{CareerCraftError, Result};
use crate::output::report::AnalysisReport;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub readiness_score: Option<u8>,
    #[serde(default)]
    pub history: Vec<SessionEntry>,
    #[serde(default)]
    pub completed_skills: BTreeSet<SkillTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub role: String,
    pub score: u8,
    pub at: DateTime<Utc>,
}

impl SessionState {
    /// Load a session file; a missing file starts a fresh session.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No session at {}, starting fresh", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            CareerCraftError::InvalidInput(format!("Corrupt session file {}: {}", path.display(), e))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// State after one more analysis.
    pub fn record(&self, report: &AnalysisReport) -> Self {
        let mut next = self.clone();
        next.readiness_score = Some(report.readiness_score);
        next.history.push(SessionEntry {
            role: report.role.clone(),
            score: report.readiness_score,
            at: report.generated_at,
        });
        next
    }

    /// Mark a learning item done. Returns false when it already was.
    pub fn complete_skill(&mut self, skill: SkillTag) -> bool {
        self.completed_skills.insert(skill)
    }

    /// Change in readiness between the last two analyses
    pub fn trend(&self) -> Option<i16> {
        let mut recent = self.history.iter().rev();
        let last = recent.next()?;
        let previous = recent.next()?;
        Some(i16::from(last.score) - i16::from(previous.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::processing::analyzer::{AnalysisRequest, Analyzer, JobTarget};

    fn report(resume: &str) -> AnalysisReport {
        let mut config = Config::default();
        config.scoring.context_weight = 0.0;
        config.scoring.use_weights = false;
        let analyzer = Analyzer::new(&config, Catalog::embedded().unwrap()).unwrap();
        analyzer
            .analyze(&AnalysisRequest::new(
                "Jane",
                resume,
                JobTarget::Preset("Frontend Developer".to_string()),
            ))
            .unwrap()
    }

    #[test]
    fn test_record_returns_updated_copy() {
        let session = SessionState::default();
        let first = session.record(&report("html and css"));
        let second = first.record(&report("html, css, javascript and react"));

        assert!(session.history.is_empty());
        assert_eq!(first.readiness_score, Some(50));
        assert_eq!(second.readiness_score, Some(100));
        assert_eq!(second.history.len(), 2);
        assert_eq!(second.trend(), Some(50));
    }

    #[test]
    fn test_complete_skill_is_idempotent() {
        let mut session = SessionState::default();
        assert!(session.complete_skill(SkillTag::new("react")));
        assert!(!session.complete_skill(SkillTag::new("React")));
        assert_eq!(session.completed_skills.len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        assert_eq!(SessionState::load(&path).unwrap(), SessionState::default());

        let mut session = SessionState::default().record(&report("html"));
        session.complete_skill(SkillTag::new("css"));
        session.save(&path).unwrap();

        assert_eq!(SessionState::load(&path).unwrap(), session);
    }

    #[test]
    fn test_corrupt_session_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(SessionState::load(&path).is_err());
    }
}
