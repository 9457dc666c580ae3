//! Phrase extraction services
//!
//! Topic extraction consumes a phrase extractor as a black box:
//! text in, ranked list of phrases out. Two implementations ship:
//!
//! 1. **tfidf** - [`TfIdfExtractor`], unigram + bigram TF-IDF over the
//!    sentences of the input (primary)
//! 2. **noun_phrase** - [`NounPhraseExtractor`], frequency-ranked runs of
//!    content words (fallback, and source of supplementary noun phrases)
//!
//! Extractors are constructed once at startup and shared behind
//! `Arc<dyn PhraseExtractor>`.

pub mod noun_phrase;
pub mod tfidf;

pub use noun_phrase::NounPhraseExtractor;
pub use tfidf::TfIdfExtractor;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use syllabus_common::Result;

/// Text → ranked phrases
pub trait PhraseExtractor: Send + Sync {
    /// Extractor name reported alongside its output
    fn name(&self) -> &'static str;

    /// Extract at most `top_n` phrases, best first
    fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>>;
}

/// Words that never stand alone as a course topic
pub const DOMAIN_STOP_WORDS: &[&str] = &[
    "course", "student", "students", "learn", "learning", "will", "including", "include",
    "covers", "cover", "provides", "provide", "introduction", "basic", "fundamental",
];

/// English function words skipped by both extractors
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "against", "all", "almost", "also",
    "although", "always", "am", "among", "an", "and", "another", "any", "are", "around", "as",
    "at", "be", "became", "because", "become", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "done", "down",
    "during", "each", "either", "else", "enough", "etc", "even", "ever", "every", "few", "for",
    "from", "further", "get", "give", "had", "has", "have", "having", "he", "her", "here",
    "hers", "him", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "least", "less", "made", "many", "may", "me", "might", "more", "most",
    "much", "must", "my", "neither", "no", "nor", "not", "now", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "our", "ours", "out", "over", "own",
    "per", "rather", "same", "several", "she", "should", "since", "so", "some", "such", "than",
    "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "throughout", "thus", "to", "too", "toward", "towards", "under", "until", "up",
    "upon", "us", "use", "used", "using", "very", "via", "was", "we", "well", "were", "what",
    "when", "where", "whether", "which", "while", "who", "whom", "whose", "why", "with",
    "within", "without", "would", "yet", "you", "your",
];

static ENGLISH_STOP_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

static DOMAIN_STOP_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DOMAIN_STOP_WORDS.iter().copied().collect());

/// Two or more word characters, hyphenated compounds kept whole
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w[\w\-]*\w").expect("valid regex"));

/// Sentence boundaries
static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?\n\r]+").expect("valid regex"));

/// Sentence and clause boundaries
static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?;:,()\n\r]+").expect("valid regex"));

pub(crate) fn is_english_stop_word(word: &str) -> bool {
    ENGLISH_STOP_SET.contains(word)
}

pub(crate) fn is_domain_stop_word(phrase: &str) -> bool {
    DOMAIN_STOP_SET.contains(phrase)
}

/// Lowercase word tokens of a text fragment
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().trim_matches('-').to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Split text into sentences, dropping empty ones
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split text into sentence/clause fragments, dropping empty ones
pub(crate) fn fragments(text: &str) -> Vec<&str> {
    BOUNDARY_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_hyphenated_words() {
        assert_eq!(
            tokenize("Hands-on Machine Learning, a lab."),
            vec!["hands-on", "machine", "learning", "lab"]
        );
    }

    #[test]
    fn test_fragments_split_on_punctuation() {
        assert_eq!(
            fragments("Graphs; trees. Sorting (merge, quick)"),
            vec!["Graphs", "trees", "Sorting", "merge", "quick"]
        );
    }

    #[test]
    fn test_sentences_keep_clauses_together() {
        assert_eq!(
            sentences("Graphs, trees. Sorting!\n"),
            vec!["Graphs, trees", "Sorting"]
        );
    }

    #[test]
    fn test_stop_word_lookup() {
        assert!(is_english_stop_word("the"));
        assert!(!is_english_stop_word("algorithm"));
        assert!(is_domain_stop_word("students"));
        assert!(!is_domain_stop_word("graph"));
    }
}
