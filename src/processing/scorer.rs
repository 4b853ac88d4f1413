//! Keyword overlap scoring and role-fit ranking
//!
//! All percentages are integers in `0..=100`, rounded half away from zero.
//! An empty requirement set always scores 0.

use crate::catalog::{RolePreset, SkillTag, WeightTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: BTreeSet<SkillTag>,
    pub missing: BTreeSet<SkillTag>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFit {
    pub role: String,
    pub score: u8,
    pub matched: usize,
    pub required: usize,
}

/// `round(100 * part / whole)`, or 0 for an empty whole.
pub fn percentage(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    let ratio = (100.0 * part as f64 / whole as f64).round();
    ratio.clamp(0.0, 100.0) as u8
}

/// Partition the required skills into matched and missing and score the overlap.
///
/// Without a weight table every skill counts once; with one, each skill
/// counts its weight (1 when unlisted).
pub fn match_skills(
    detected: &BTreeSet<SkillTag>,
    required: &BTreeSet<SkillTag>,
    weights: Option<&WeightTable>,
) -> MatchResult {
    let matched: BTreeSet<SkillTag> = required.intersection(detected).cloned().collect();
    let missing: BTreeSet<SkillTag> = required.difference(detected).cloned().collect();

    let score = match weights {
        Some(table) => percentage(table.total(&matched), table.total(required)),
        None => percentage(matched.len() as u64, required.len() as u64),
    };

    MatchResult {
        matched,
        missing,
        score,
    }
}

/// Fixed linear blend of the keyword and context scores.
///
/// The weights are normalized to sum to one, so `(0.6, 0.4)` and `(3.0, 2.0)`
/// are equivalent.
pub fn blend(keyword: u8, context: u8, keyword_weight: f64, context_weight: f64) -> u8 {
    let total = keyword_weight + context_weight;
    if total <= 0.0 {
        return keyword;
    }
    let value = (keyword_weight * f64::from(keyword) + context_weight * f64::from(context)) / total;
    value.round().clamp(0.0, 100.0) as u8
}

/// Score the detected skills against every role preset.
///
/// Sorted by score descending; equal scores are ordered by role name so the
/// ranking is stable across runs.
pub fn rank_roles<'a>(
    detected: &BTreeSet<SkillTag>,
    roles: impl IntoIterator<Item = &'a RolePreset>,
    weights: Option<&WeightTable>,
) -> Vec<RoleFit> {
    let mut ranking: Vec<RoleFit> = roles
        .into_iter()
        .map(|role| {
            let result = match_skills(detected, &role.skills, weights);
            RoleFit {
                role: role.name.clone(),
                score: result.score,
                matched: result.matched.len(),
                required: role.skills.len(),
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.role.cmp(&b.role)));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn tags(names: &[&str]) -> BTreeSet<SkillTag> {
        names.iter().map(|n| SkillTag::new(n)).collect()
    }

    fn role(name: &str, skills: &[&str]) -> RolePreset {
        RolePreset {
            name: name.to_string(),
            skills: tags(skills),
            description: None,
        }
    }

    #[test]
    fn test_end_to_end_unweighted_score() {
        let result = match_skills(
            &tags(&["python", "sql"]),
            &tags(&["python", "sql", "docker"]),
            None,
        );
        assert_eq!(result.matched, tags(&["python", "sql"]));
        assert_eq!(result.missing, tags(&["docker"]));
        assert_eq!(result.score, 67);
    }

    #[test]
    fn test_weighted_score() {
        let weights = WeightTable::new(BTreeMap::from([
            (SkillTag::new("sql"), 3),
            (SkillTag::new("excel"), 1),
        ]));
        let result = match_skills(&tags(&["sql"]), &tags(&["sql", "excel"]), Some(&weights));
        assert_eq!(result.score, 75);

        let unweighted = match_skills(&tags(&["sql"]), &tags(&["sql", "excel"]), None);
        assert_eq!(unweighted.score, 50);
    }

    #[test]
    fn test_unlisted_skills_weigh_one() {
        let weights = WeightTable::new(BTreeMap::from([(SkillTag::new("sql"), 3)]));
        let result = match_skills(&tags(&["git"]), &tags(&["sql", "git"]), Some(&weights));
        assert_eq!(result.score, 25);
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        let weights = WeightTable::default();
        for table in [None, Some(&weights)] {
            let result = match_skills(&tags(&["python"]), &BTreeSet::new(), table);
            assert_eq!(result.score, 0);
            assert!(result.matched.is_empty());
            assert!(result.missing.is_empty());
        }
    }

    #[test]
    fn test_partition_invariant() {
        let required = tags(&["python", "sql", "docker", "git"]);
        let detected_sets = [
            tags(&[]),
            tags(&["python"]),
            tags(&["python", "react", "git"]),
            tags(&["python", "sql", "docker", "git", "excel"]),
        ];
        for detected in &detected_sets {
            let result = match_skills(detected, &required, None);
            let union: BTreeSet<_> = result.matched.union(&result.missing).cloned().collect();
            assert_eq!(union, required);
            assert!(result.matched.is_disjoint(&result.missing));
            assert!(result.matched.is_subset(detected));
            assert!(result.score <= 100);
        }
    }

    #[test]
    fn test_score_monotonic_in_overlap() {
        let required = tags(&["a1", "a2", "a3", "a4", "a5", "a6", "a7"]);
        let weights = WeightTable::new(BTreeMap::from([(SkillTag::new("a3"), 5)]));
        let mut detected = BTreeSet::new();
        let mut last = (0, 0);
        for tag in &required {
            detected.insert(tag.clone());
            let plain = match_skills(&detected, &required, None).score;
            let weighted = match_skills(&detected, &required, Some(&weights)).score;
            assert!(plain >= last.0);
            assert!(weighted >= last.1);
            last = (plain, weighted);
        }
        assert_eq!(last, (100, 100));
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(67, 40, 0.6, 0.4), 56);
        assert_eq!(blend(100, 10, 3.0, 2.0), 64);
        assert_eq!(blend(80, 0, 1.0, 0.0), 80);
        assert_eq!(blend(80, 20, 0.0, 0.0), 80);
    }

    #[test]
    fn test_rank_roles_breaks_ties_by_name() {
        let roles = vec![
            role("Zeta Analyst", &["sql", "excel"]),
            role("Alpha Analyst", &["sql", "statistics"]),
            role("Backend Developer", &["python", "sql"]),
        ];
        let ranking = rank_roles(&tags(&["python", "sql"]), &roles, None);
        let names: Vec<_> = ranking.iter().map(|fit| fit.role.as_str()).collect();
        assert_eq!(names, vec!["Backend Developer", "Alpha Analyst", "Zeta Analyst"]);
        assert_eq!(ranking[0].score, 100);
        assert_eq!(ranking[1].score, 50);
        assert_eq!(ranking[2].score, 50);
        assert_eq!(ranking[0].matched, 2);
    }
}
