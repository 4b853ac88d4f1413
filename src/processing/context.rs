//! Context score: TF-IDF cosine similarity between resume and job text

use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextScore {
    /// Percentage in `0..=100`
    pub score: u8,
    /// Raw cosine similarity, absent when the floor was used
    pub similarity: Option<f32>,
    /// True when the inputs were too thin to vectorize
    pub degenerate: bool,
}

pub struct ContextScorer {
    processor: TextProcessor,
    floor: u8,
    min_tokens: usize,
}

impl ContextScorer {
    pub fn new(floor: u8, min_tokens: usize) -> Self {
        Self {
            processor: TextProcessor::new(),
            floor: floor.min(100),
            min_tokens: min_tokens.max(1),
        }
    }

    pub fn score(&self, candidate_text: &str, job_text: &str) -> ContextScore {
        let candidate = self.term_counts(candidate_text);
        let job = self.term_counts(job_text);

        if candidate.len() < self.min_tokens || job.len() < self.min_tokens {
            debug!(
                "Context vectorization skipped: {} / {} distinct terms",
                candidate.len(),
                job.len()
            );
            return self.floor_score();
        }

        match cosine_tfidf(&candidate, &job) {
            Some(similarity) => ContextScore {
                score: (f64::from(similarity) * 100.0).round().clamp(0.0, 100.0) as u8,
                similarity: Some(similarity),
                degenerate: false,
            },
            None => self.floor_score(),
        }
    }

    fn floor_score(&self) -> ContextScore {
        ContextScore {
            score: self.floor,
            similarity: None,
            degenerate: true,
        }
    }

    fn term_counts(&self, text: &str) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for token in self.processor.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }
}

/// Cosine similarity of the two documents' TF-IDF vectors.
///
/// IDF is smoothed over the two-document corpus, `ln((1 + n) / (1 + df)) + 1`,
/// so terms shared by both documents keep a non-zero weight. Returns `None`
/// when either vector has zero length.
fn cosine_tfidf(a: &BTreeMap<String, u32>, b: &BTreeMap<String, u32>) -> Option<f32> {
    const DOCUMENTS: f64 = 2.0;

    let vocabulary: BTreeSet<&String> = a.keys().chain(b.keys()).collect();

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for term in vocabulary {
        let tf_a = f64::from(a.get(term).copied().unwrap_or(0));
        let tf_b = f64::from(b.get(term).copied().unwrap_or(0));
        let df = f64::from(u8::from(tf_a > 0.0) + u8::from(tf_b > 0.0));
        let idf = ((1.0 + DOCUMENTS) / (1.0 + df)).ln() + 1.0;

        let wa = tf_a * idf;
        let wb = tf_b * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> ContextScorer {
        ContextScorer::new(10, 2)
    }

    #[test]
    fn test_empty_job_text_uses_floor() {
        let result = scorer().score("python developer with sql experience", "");
        assert_eq!(result.score, 10);
        assert!(result.degenerate);
        assert!(result.similarity.is_none());
    }

    #[test]
    fn test_single_token_job_text_uses_floor() {
        let result = scorer().score("python developer with sql experience", "python");
        assert_eq!(result.score, 10);
        assert!(result.degenerate);
    }

    #[test]
    fn test_stop_words_only_uses_floor() {
        let result = scorer().score("the and of", "python sql docker");
        assert!(result.degenerate);
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_identical_texts_score_full() {
        let text = "backend developer building python services with sql";
        let result = scorer().score(text, text);
        assert_eq!(result.score, 100);
        assert!(!result.degenerate);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let result = scorer().score("gardening landscaping hedges", "python sql docker");
        assert_eq!(result.score, 0);
        assert!(!result.degenerate);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let result = scorer().score(
            "python developer building apis with sql and docker",
            "we need python and sql skills for data analysis",
        );
        assert!(result.score > 0);
        assert!(result.score < 100);
        let similarity = result.similarity.unwrap();
        assert!(similarity > 0.0 && similarity < 1.0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let a = "python developer building apis with sql and docker";
        let b = "python sql data analysis reporting";
        assert_eq!(scorer().score(a, b), scorer().score(a, b));
    }
}
