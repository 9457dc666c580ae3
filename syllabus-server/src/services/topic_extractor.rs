//! Topic extraction
//!
//! Combines the course title, description and scope into one text, ranks
//! keywords with the primary phrase extractor (falling back to the secondary
//! one when it fails), adds the secondary extractor's noun phrases, and
//! keeps an order-preserving, de-duplicated list of topics.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::extractors::PhraseExtractor;
use crate::models::TopicSet;

/// Topic extraction stage
pub struct TopicExtractor {
    primary: Arc<dyn PhraseExtractor>,
    fallback: Arc<dyn PhraseExtractor>,
    keyword_count: usize,
    max_topics: usize,
}

impl TopicExtractor {
    pub fn new(
        primary: Arc<dyn PhraseExtractor>,
        fallback: Arc<dyn PhraseExtractor>,
        keyword_count: usize,
        max_topics: usize,
    ) -> Self {
        Self {
            primary,
            fallback,
            keyword_count,
            max_topics,
        }
    }

    /// Extract keywords and topics from a course description
    pub fn extract(&self, title: &str, description: &str, scope: &str) -> TopicSet {
        let full_text = format!("{}. {}. {}", title, description, scope);

        let (keywords, extractor) = match self.primary.extract(&full_text, self.keyword_count) {
            Ok(keywords) => (keywords, self.primary.name()),
            Err(e) => {
                warn!(
                    "{} extraction failed ({}), falling back to {}",
                    self.primary.name(),
                    e,
                    self.fallback.name()
                );
                let keywords = self
                    .fallback
                    .extract(&full_text, self.keyword_count)
                    .unwrap_or_else(|e| {
                        warn!("{} extraction failed: {}", self.fallback.name(), e);
                        Vec::new()
                    });
                (keywords, self.fallback.name())
            }
        };

        let noun_phrases = self
            .fallback
            .extract(&full_text, self.max_topics)
            .unwrap_or_else(|e| {
                debug!("No noun phrases: {}", e);
                Vec::new()
            });

        let topics: Vec<String> = {
            let mut seen = HashSet::new();
            keywords
                .iter()
                .chain(noun_phrases.iter())
                .filter(|topic| seen.insert(topic.as_str()))
                .take(self.max_topics)
                .cloned()
                .collect()
        };

        debug!(
            keywords = keywords.len(),
            noun_phrases = noun_phrases.len(),
            topics = topics.len(),
            "Topics extracted"
        );

        TopicSet {
            keywords,
            topics,
            extractor: extractor.to_string(),
        }
    }
}
