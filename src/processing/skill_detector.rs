//! Whole-word skill detection against the catalog vocabulary

use crate::catalog::{Catalog, SkillTag};
use crate::error::{CareerCraftError, Result};
use crate::processing::text_processor::TextProcessor;
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Finds catalog skills in free text.
///
/// Every surface form (canonical tag plus aliases) is compiled into a single
/// Aho-Corasick automaton. Matches are accepted only when they sit on word
/// boundaries, so "java" is never found inside "javascript".
pub struct SkillDetector {
    matcher: AhoCorasick,
    owners: Vec<SkillTag>,
    processor: TextProcessor,
}

impl SkillDetector {
    pub fn new(catalog: &Catalog) -> Result<Self> {
        let processor = TextProcessor::new();
        let mut patterns = Vec::new();
        let mut owners = Vec::new();

        for tag in catalog.tags() {
            for form in catalog.surface_forms(tag) {
                patterns.push(processor.normalize(&form));
                owners.push(tag.clone());
            }
        }

        // Overlapping search needs the standard semantics; it reports
        // "data" and "data structures" at the same position.
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| CareerCraftError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        debug!("Skill detector built with {} surface forms", patterns.len());

        Ok(Self {
            matcher,
            owners,
            processor,
        })
    }

    /// Skills present in the text.
    pub fn detect(&self, text: &str) -> BTreeSet<SkillTag> {
        self.detect_with_counts(text).into_keys().collect()
    }

    /// Skills present in the text with how often any of their forms occurred.
    pub fn detect_with_counts(&self, text: &str) -> BTreeMap<SkillTag, usize> {
        let normalized = self.processor.normalize(text);
        let mut counts = BTreeMap::new();

        for mat in self.matcher.find_overlapping_iter(&normalized) {
            if !on_word_boundaries(&normalized, mat.start(), mat.end()) {
                continue;
            }
            let tag = &self.owners[mat.pattern().as_usize()];
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }

        counts
    }

    pub fn surface_form_count(&self) -> usize {
        self.owners.len()
    }
}

/// Characters that continue a word. `+` and `#` are included so that
/// "c" does not match inside "c++" or "c#".
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '+' || c == '#'
}

/// A dot joins words on both sides, as in "node.js", but ends a sentence
/// when followed by whitespace.
fn continues_word(mut chars: impl Iterator<Item = char>) -> bool {
    match chars.next() {
        Some(c) if is_word_char(c) => true,
        Some('.') => chars.next().is_some_and(is_word_char),
        _ => false,
    }
}

fn on_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    !continues_word(text[..start].chars().rev()) && !continues_word(text[end..].chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(toml: &str) -> SkillDetector {
        SkillDetector::new(&Catalog::from_toml_str(toml).unwrap()).unwrap()
    }

    fn tags(names: &[&str]) -> BTreeSet<SkillTag> {
        names.iter().map(|n| SkillTag::new(n)).collect()
    }

    #[test]
    fn test_java_not_found_inside_javascript() {
        let detector = detector(r#"
            [skills]
            languages = ["java", "javascript"]
        "#);
        assert_eq!(detector.detect("javascript developer"), tags(&["javascript"]));
        assert_eq!(
            detector.detect("Java and JavaScript"),
            tags(&["java", "javascript"])
        );
    }

    #[test]
    fn test_phrase_requires_adjacent_words() {
        let detector = detector(r#"
            [skills]
            cs = ["data structures"]
        "#);
        assert!(detector
            .detect("worked with data pipelines and building structures")
            .is_empty());
        assert_eq!(
            detector.detect("Strong grasp of Data\n  Structures."),
            tags(&["data structures"])
        );
    }

    #[test]
    fn test_symbols_respect_boundaries() {
        let detector = detector(r#"
            [skills]
            languages = ["c", "c++", "c#"]
        "#);
        assert_eq!(detector.detect("c++ and c# daily"), tags(&["c++", "c#"]));
        assert_eq!(detector.detect("plain c, nothing else"), tags(&["c"]));
    }

    #[test]
    fn test_aliases_map_to_canonical_tag() {
        let detector = detector(r#"
            [skills]
            tools = ["git", "kubernetes"]
            [aliases]
            git = ["github"]
            kubernetes = ["k8s"]
        "#);
        assert_eq!(
            detector.detect("Code on GitHub, deployed to k8s"),
            tags(&["git", "kubernetes"])
        );
    }

    #[test]
    fn test_dotted_names_are_one_word() {
        let detector = detector(r#"
            [skills]
            web = ["javascript", "node.js", "sql"]
            [aliases]
            javascript = ["js"]
        "#);
        assert_eq!(detector.detect("services in node.js"), tags(&["node.js"]));
        assert_eq!(detector.detect("Knows JS. Also SQL."), tags(&["javascript", "sql"]));
    }

    #[test]
    fn test_counts_every_occurrence() {
        let detector = detector(r#"
            [skills]
            tools = ["git", "sql"]
            [aliases]
            git = ["github"]
        "#);
        let counts = detector.detect_with_counts("git, github and more git. SQL.");
        assert_eq!(counts.get(&SkillTag::new("git")), Some(&3));
        assert_eq!(counts.get(&SkillTag::new("sql")), Some(&1));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let detector = SkillDetector::new(&Catalog::embedded().unwrap()).unwrap();
        let text = "Backend developer: Python, SQL, Docker, REST APIs, GitHub Actions.";
        let first = detector.detect(text);
        let second = detector.detect(text);
        assert_eq!(first, second);
        assert!(first.contains(&SkillTag::new("python")));
        assert!(first.contains(&SkillTag::new("ci/cd")));
    }

    #[test]
    fn test_empty_text_detects_nothing() {
        let detector = SkillDetector::new(&Catalog::embedded().unwrap()).unwrap();
        assert!(detector.detect("").is_empty());
    }
}
