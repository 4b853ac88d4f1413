//! Resume and cover letter content
//!
//! Pure data built from a report. Rendering to PDF or DOCX lives in
//! [`crate::output::renderers`].

use crate::catalog::SkillTag;
use crate::output::report::AnalysisReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Format-neutral document: a heading block followed by titled sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub title: String,
    pub heading: String,
    pub subtitle: Option<String>,
    pub sections: Vec<DocumentSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub title: Option<String>,
    pub paragraphs: Vec<String>,
    pub bulleted: bool,
}

impl DocumentSection {
    fn titled(title: &str, paragraphs: Vec<String>) -> Self {
        Self {
            title: Some(title.to_string()),
            paragraphs,
            bulleted: false,
        }
    }

    fn bullets(title: &str, items: Vec<String>) -> Self {
        Self {
            title: Some(title.to_string()),
            paragraphs: items,
            bulleted: true,
        }
    }

    fn plain(paragraphs: Vec<String>) -> Self {
        Self {
            title: None,
            paragraphs,
            bulleted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub name: String,
    pub role: String,
    pub headline: String,
    pub skills: BTreeSet<SkillTag>,
    pub growth_areas: BTreeSet<SkillTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterContent {
    pub name: String,
    pub role: String,
    pub strengths: BTreeSet<SkillTag>,
    pub learning: BTreeSet<SkillTag>,
    pub readiness_score: u8,
}

impl ResumeContent {
    pub fn from_report(report: &AnalysisReport, headline: &str) -> Self {
        Self {
            name: report.candidate_name.clone(),
            role: report.role.clone(),
            headline: headline.to_string(),
            skills: report.matched_skills.clone(),
            growth_areas: report.missing_skills.clone(),
        }
    }

    pub fn to_document(&self) -> GeneratedDocument {
        let skills = join_skills(&self.skills);
        let experience = if self.skills.is_empty() {
            "a broad foundation of technical coursework".to_string()
        } else {
            skills.clone()
        };

        let mut sections = vec![
            DocumentSection::titled(
                "Professional Summary",
                vec![format!(
                    "Motivated and detail-oriented candidate aspiring to work as a {} with hands-on experience in {}. \
                     Passionate about building real-world solutions and learning continuously.",
                    self.role, experience
                )],
            ),
            DocumentSection::titled(
                "Core Skills",
                vec![if skills.is_empty() { "To be added".to_string() } else { skills }],
            ),
            DocumentSection::bullets(
                "Projects & Practical Experience",
                vec![
                    "Academic and personal projects demonstrating applied knowledge".to_string(),
                    "Experience with collaborative coding and structured problem-solving".to_string(),
                ],
            ),
        ];

        let growth = if self.growth_areas.is_empty() {
            "Actively strengthening advanced concepts, deployment practices, and industry standards.".to_string()
        } else {
            format!(
                "Currently developing skills in {} to deepen role-specific expertise.",
                join_skills(&self.growth_areas)
            )
        };
        sections.push(DocumentSection::titled("Learning & Growth", vec![growth]));

        GeneratedDocument {
            title: format!("{} - Resume", self.name),
            heading: self.name.clone(),
            subtitle: Some(format!("Aspiring {} | {}", self.role, self.headline)),
            sections,
        }
    }
}

impl CoverLetterContent {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            name: report.candidate_name.clone(),
            role: report.role.clone(),
            strengths: report.matched_skills.clone(),
            learning: report.missing_skills.clone(),
            readiness_score: report.readiness_score,
        }
    }

    pub fn to_document(&self) -> GeneratedDocument {
        let mut body = vec![
            "Dear Hiring Manager,".to_string(),
            format!(
                "I am writing to express my interest in the {} position. I am an early-career \
                 candidate eager to contribute to a team that builds meaningful products.",
                self.role
            ),
        ];

        if self.strengths.is_empty() {
            body.push(
                "I bring a strong willingness to learn, a structured approach to problem solving, \
                 and the discipline to ramp up quickly on new technologies."
                    .to_string(),
            );
        } else {
            body.push(format!(
                "My background includes practical work with {}, which aligns closely with the \
                 requirements of this role.",
                join_skills(&self.strengths)
            ));
        }

        if !self.learning.is_empty() {
            body.push(format!(
                "I am actively expanding my expertise in {} and enjoy closing skill gaps through \
                 focused, hands-on practice.",
                join_skills(&self.learning)
            ));
        }

        body.push(
            "Thank you for considering my application. I would welcome the opportunity to discuss \
             how I can contribute to your team."
                .to_string(),
        );

        GeneratedDocument {
            title: format!("{} - Cover Letter", self.name),
            heading: self.name.clone(),
            subtitle: Some(format!("Application for {}", self.role)),
            sections: vec![
                DocumentSection::plain(body),
                DocumentSection::plain(vec!["Sincerely,".to_string(), self.name.clone()]),
            ],
        }
    }
}

fn join_skills(skills: &BTreeSet<SkillTag>) -> String {
    skills.iter().map(SkillTag::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> BTreeSet<SkillTag> {
        names.iter().map(|n| SkillTag::new(n)).collect()
    }

    #[test]
    fn test_resume_lists_matched_skills() {
        let content = ResumeContent {
            name: "Jane Doe".to_string(),
            role: "Backend Developer".to_string(),
            headline: "Entry-Level Candidate".to_string(),
            skills: tags(&["python", "sql"]),
            growth_areas: tags(&["docker"]),
        };
        let doc = content.to_document();

        assert_eq!(doc.heading, "Jane Doe");
        assert_eq!(
            doc.subtitle.as_deref(),
            Some("Aspiring Backend Developer | Entry-Level Candidate")
        );
        let core = doc
            .sections
            .iter()
            .find(|s| s.title.as_deref() == Some("Core Skills"))
            .unwrap();
        assert_eq!(core.paragraphs, vec!["python, sql".to_string()]);
        assert!(doc.sections.last().unwrap().paragraphs[0].contains("docker"));
    }

    #[test]
    fn test_cover_letter_without_strengths() {
        let content = CoverLetterContent {
            name: "Jane Doe".to_string(),
            role: "Data Analyst".to_string(),
            strengths: BTreeSet::new(),
            learning: tags(&["sql"]),
            readiness_score: 0,
        };
        let doc = content.to_document();
        let body = &doc.sections[0].paragraphs;

        assert_eq!(body[0], "Dear Hiring Manager,");
        assert!(body.iter().any(|p| p.contains("willingness to learn")));
        assert!(body.iter().any(|p| p.contains("expanding my expertise in sql")));
        assert_eq!(doc.sections[1].paragraphs[1], "Jane Doe");
    }
}
