//! TF-IDF keyword extractor
//!
//! The sentences of the input form the document set. Each sentence
//! contributes unigrams and bigrams of its non-stop-word tokens; a term's
//! score is its L2-normalized TF-IDF weight summed over all sentences, with
//! smoothed IDF `ln((1 + n) / (1 + df)) + 1`.
//!
//! Terms built from a domain stop word ("course", "students", ...) and terms
//! of two characters or fewer are dropped from the ranking. Equal scores
//! keep first-appearance order.

use std::collections::HashMap;
use syllabus_common::{Error, Result};
use tracing::debug;

use super::{is_domain_stop_word, is_english_stop_word, sentences, tokenize, PhraseExtractor};

/// Unigram + bigram TF-IDF extractor
#[derive(Debug, Clone, Default)]
pub struct TfIdfExtractor;

impl TfIdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Unigrams then bigrams of one sentence, stop words removed first
    fn document_terms(sentence: &str) -> Vec<String> {
        let words: Vec<String> = tokenize(sentence)
            .into_iter()
            .filter(|w| !is_english_stop_word(w))
            .collect();

        let mut terms = words.clone();
        terms.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        terms
    }

    fn keep_term(term: &str) -> bool {
        term.chars().count() > 2 && !term.split(' ').any(is_domain_stop_word)
    }
}

impl PhraseExtractor for TfIdfExtractor {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>> {
        let documents: Vec<Vec<String>> = sentences(text)
            .into_iter()
            .map(Self::document_terms)
            .filter(|terms| !terms.is_empty())
            .collect();

        if documents.is_empty() {
            return Err(Error::Extraction("empty vocabulary".to_string()));
        }

        // Vocabulary in first-appearance order, with document frequencies
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for document in &documents {
            let mut seen_here: Vec<&str> = Vec::new();
            for term in document {
                let next = first_seen.len();
                first_seen.entry(term.as_str()).or_insert(next);
                if !seen_here.contains(&term.as_str()) {
                    seen_here.push(term.as_str());
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        let n_docs = documents.len() as f64;
        let idf = |term: &str| -> f64 {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        };

        let mut scores: HashMap<&str, f64> = HashMap::new();
        for document in &documents {
            let mut tf: HashMap<&str, f64> = HashMap::new();
            for term in document {
                *tf.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
            let weights: Vec<(&str, f64)> = tf.iter().map(|(t, f)| (*t, f * idf(t))).collect();
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm == 0.0 {
                continue;
            }
            for (term, weight) in weights {
                *scores.entry(term).or_insert(0.0) += weight / norm;
            }
        }

        let mut ranked: Vec<(&str, f64, usize)> = scores
            .into_iter()
            .filter(|(term, _)| Self::keep_term(term))
            .map(|(term, score)| (term, score, first_seen.get(term).copied().unwrap_or(usize::MAX)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)));

        let keywords: Vec<String> = ranked
            .into_iter()
            .take(top_n)
            .map(|(term, _, _)| term.to_string())
            .collect();

        if keywords.is_empty() {
            return Err(Error::Extraction("no terms left after filtering".to_string()));
        }

        debug!(
            documents = documents.len(),
            keywords = keywords.len(),
            "TF-IDF extraction complete"
        );
        Ok(keywords)
    }
}
