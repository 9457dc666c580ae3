//! Noun-phrase extractor
//!
//! Approximates noun chunks without a tagger: a candidate phrase is a
//! maximal run of content words inside one clause, where stop words and
//! domain stop words end a run. Runs longer than three words keep their
//! last three (the head noun sits at the end of an English noun phrase).
//! Phrases are ranked by frequency, ties by first appearance.

use std::collections::HashMap;
use syllabus_common::{Error, Result};

use super::{fragments, is_domain_stop_word, is_english_stop_word, tokenize, PhraseExtractor};

/// Longest phrase kept, in words
const MAX_PHRASE_WORDS: usize = 3;

/// Frequency-ranked content-word runs
#[derive(Debug, Clone, Default)]
pub struct NounPhraseExtractor;

impl NounPhraseExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Candidate phrases in order of appearance
    fn candidates(text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        for fragment in fragments(text) {
            let mut run: Vec<String> = Vec::new();
            for word in tokenize(fragment) {
                if is_english_stop_word(&word) || is_domain_stop_word(&word) {
                    Self::flush(&mut run, &mut phrases);
                } else {
                    run.push(word);
                }
            }
            Self::flush(&mut run, &mut phrases);
        }
        phrases
    }

    fn flush(run: &mut Vec<String>, phrases: &mut Vec<String>) {
        if run.is_empty() {
            return;
        }
        let start = run.len().saturating_sub(MAX_PHRASE_WORDS);
        let phrase = run[start..].join(" ");
        run.clear();

        if phrase.chars().count() > 3 && !phrase.chars().all(|c| c.is_ascii_digit()) {
            phrases.push(phrase);
        }
    }
}

impl PhraseExtractor for NounPhraseExtractor {
    fn name(&self) -> &'static str {
        "noun-phrase"
    }

    fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>> {
        let candidates = Self::candidates(text);

        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (idx, phrase) in candidates.iter().enumerate() {
            counts.entry(phrase.as_str()).or_insert((0, idx)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(phrase, (count, first))| (phrase, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let phrases: Vec<String> = ranked
            .into_iter()
            .take(top_n)
            .map(|(phrase, _, _)| phrase.to_string())
            .collect();

        if phrases.is_empty() {
            return Err(Error::Extraction("no noun phrases found".to_string()));
        }
        Ok(phrases)
    }
}
