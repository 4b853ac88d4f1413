//! Skill catalog: vocabulary, aliases, weights, role presets and learning resources
//!
//! The catalog is static data. It is parsed once at startup (from the embedded
//! `data/catalog.toml` or a user-supplied file) and passed around by reference.

use crate::config::CatalogConfig;
use crate::error::{CareerCraftError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use strsim::jaro_winkler;

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.toml");

/// Minimum Jaro-Winkler similarity for a role name suggestion
const ROLE_SUGGESTION_THRESHOLD: f64 = 0.8;

/// Canonical lowercase identifier of one skill
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillTag(String);

impl SkillTag {
    /// Lowercases and collapses internal whitespace.
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        SkillTag(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Importance weights; skills without an entry weigh 1
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTable(BTreeMap<SkillTag, u32>);

impl WeightTable {
    pub fn new(weights: BTreeMap<SkillTag, u32>) -> Self {
        Self(weights)
    }

    pub fn weight(&self, tag: &SkillTag) -> u32 {
        self.0.get(tag).copied().unwrap_or(1)
    }

    pub fn total<'a>(&self, tags: impl IntoIterator<Item = &'a SkillTag>) -> u64 {
        tags.into_iter().map(|t| u64::from(self.weight(t))).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePreset {
    pub name: String,
    pub skills: BTreeSet<SkillTag>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    weights: BTreeMap<String, u32>,
    #[serde(default)]
    roles: BTreeMap<String, RoleEntry>,
    #[serde(default)]
    courses: BTreeMap<String, LearningResource>,
}

#[derive(Debug, Deserialize)]
struct RoleEntry {
    skills: Vec<String>,
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    vocabulary: BTreeMap<String, BTreeSet<SkillTag>>,
    tags: BTreeSet<SkillTag>,
    aliases: BTreeMap<SkillTag, BTreeSet<String>>,
    weights: WeightTable,
    roles: BTreeMap<String, RolePreset>,
    resources: BTreeMap<SkillTag, LearningResource>,
}

impl Catalog {
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    pub fn load(config: &CatalogConfig) -> Result<Self> {
        match &config.path {
            Some(path) => {
                info!("Loading skill catalog from {}", path.display());
                let content = std::fs::read_to_string(path).map_err(|e| {
                    CareerCraftError::Catalog(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&content)
            }
            None => Self::embedded(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| CareerCraftError::Catalog(format!("Failed to parse catalog: {}", e)))?;

        let mut vocabulary = BTreeMap::new();
        let mut tags = BTreeSet::new();
        for (category, entries) in file.skills {
            let mut set = BTreeSet::new();
            for raw in entries {
                let tag = SkillTag::new(&raw);
                if tag.as_str().is_empty() {
                    return Err(CareerCraftError::Catalog(format!(
                        "empty skill in category '{}'",
                        category
                    )));
                }
                tags.insert(tag.clone());
                set.insert(tag);
            }
            vocabulary.insert(category, set);
        }

        let known = |raw: &str, what: &str| -> Result<SkillTag> {
            let tag = SkillTag::new(raw);
            if tags.contains(&tag) {
                Ok(tag)
            } else {
                Err(CareerCraftError::Catalog(format!(
                    "{} refers to unknown skill '{}'",
                    what, raw
                )))
            }
        };

        let mut aliases = BTreeMap::new();
        for (raw, forms) in file.aliases {
            let tag = known(raw.as_str(), "alias")?;
            let forms: BTreeSet<String> = forms
                .iter()
                .map(|f| SkillTag::new(f).0)
                .filter(|f| !f.is_empty())
                .collect();
            aliases.insert(tag, forms);
        }

        let mut weights = BTreeMap::new();
        for (raw, weight) in file.weights {
            let tag = known(raw.as_str(), "weight")?;
            if weight == 0 {
                return Err(CareerCraftError::Catalog(format!(
                    "weight for '{}' must be at least 1",
                    raw
                )));
            }
            weights.insert(tag, weight);
        }

        let mut roles = BTreeMap::new();
        for (name, entry) in file.roles {
            if entry.skills.is_empty() {
                return Err(CareerCraftError::Catalog(format!(
                    "role '{}' has no skills",
                    name
                )));
            }
            let skills = entry
                .skills
                .iter()
                .map(|s| known(s.as_str(), &format!("role '{}'", name)))
                .collect::<Result<BTreeSet<_>>>()?;
            roles.insert(
                name.clone(),
                RolePreset {
                    name,
                    skills,
                    description: entry.description,
                },
            );
        }

        let mut resources = BTreeMap::new();
        for (raw, resource) in file.courses {
            resources.insert(known(raw.as_str(), "course")?, resource);
        }

        debug!(
            "Catalog loaded: {} skills, {} roles, {} resources",
            tags.len(),
            roles.len(),
            resources.len()
        );

        Ok(Self {
            vocabulary,
            tags,
            aliases,
            weights: WeightTable::new(weights),
            roles,
            resources,
        })
    }

    pub fn tags(&self) -> &BTreeSet<SkillTag> {
        &self.tags
    }

    pub fn categories(&self) -> &BTreeMap<String, BTreeSet<SkillTag>> {
        &self.vocabulary
    }

    /// Canonical tag for a raw string, if it is part of the vocabulary
    pub fn tag(&self, raw: &str) -> Option<SkillTag> {
        let tag = SkillTag::new(raw);
        self.tags.contains(&tag).then_some(tag)
    }

    /// Every surface form of a tag, the tag itself first
    pub fn surface_forms(&self, tag: &SkillTag) -> Vec<String> {
        let mut forms = vec![tag.as_str().to_string()];
        if let Some(extra) = self.aliases.get(tag) {
            forms.extend(extra.iter().filter(|f| *f != tag.as_str()).cloned());
        }
        forms
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn roles(&self) -> impl Iterator<Item = &RolePreset> {
        self.roles.values()
    }

    /// Case-insensitive role lookup
    pub fn role(&self, name: &str) -> Option<&RolePreset> {
        self.roles.get(name).or_else(|| {
            let wanted = name.trim().to_lowercase();
            self.roles
                .values()
                .find(|role| role.name.to_lowercase() == wanted)
        })
    }

    /// Closest role name to a misspelled one
    pub fn suggest_role(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.roles
            .values()
            .map(|role| (role, jaro_winkler(&wanted, &role.name.to_lowercase())))
            .filter(|(_, similarity)| *similarity >= ROLE_SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(role, _)| role.name.as_str())
    }

    pub fn resource(&self, tag: &SkillTag) -> Option<&LearningResource> {
        self.resources.get(tag)
    }
}
