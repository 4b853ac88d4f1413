//! Text normalization and tokenization

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            stop_words: Self::create_stop_words(),
            whitespace_regex,
        }
    }

    /// Lowercase, fold typographic punctuation and collapse whitespace.
    ///
    /// Skill phrases are normalized the same way, so "data   structures"
    /// spread over a line break still matches "data structures".
    pub fn normalize(&self, text: &str) -> String {
        let folded = self.normalize_unicode(&text.to_lowercase());
        self.whitespace_regex
            .replace_all(&folded, " ")
            .trim()
            .to_string()
    }

    /// Tokenize text into words using Unicode segmentation
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for word in text.unicode_words() {
            let normalized = word.to_lowercase();

            // Skip stop words and very short words
            if !self.stop_words.contains(normalized.as_str()) && normalized.len() > 1 {
                if normalized.chars().any(|c| c.is_alphabetic()) {
                    tokens.push(normalized);
                }
            }
        }

        tokens
    }

    /// Normalize Unicode characters
    fn normalize_unicode(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'', // Smart quotes to regular quotes
                '\u{201C}' | '\u{201D}' => '"',  // Smart double quotes
                '\u{2010}' | '\u{2011}' | '\u{2013}' | '\u{2014}' => '-',
                '\u{00A0}' => ' ',
                '\u{2022}' | '\u{25CF}' | '\u{25AA}' => ' ', // Bullets
                _ => c,
            })
            .collect()
    }

    /// Create set of common English stop words
    fn create_stop_words() -> HashSet<&'static str> {
        [
            "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at",
            "be", "been", "being", "both", "but", "by", "can", "could", "did", "do", "does",
            "each", "etc", "for", "from", "had", "has", "have", "having", "he", "her", "his",
            "how", "i", "if", "in", "into", "is", "it", "its", "me", "more", "most", "my",
            "no", "not", "of", "on", "or", "our", "out", "over", "own", "per", "she", "should",
            "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
            "these", "they", "this", "those", "through", "to", "too", "under", "up", "us",
            "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
            "will", "with", "would", "you", "your",
        ]
        .into_iter()
        .collect()
    }
}
