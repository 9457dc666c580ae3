//! Pipeline components
//!
//! Components run strictly downstream, each owning one stage:
//! topic extraction → module structuring → outcome generation →
//! assessment blueprint → question generation → alignment matrix.
//! [`SyllabusPipeline`] wires them together for one request.
//!
//! Every randomized component draws from a caller-supplied `Rng` so a
//! seeded run is reproducible end to end.

pub mod alignment_matrix;
pub mod assessment_generator;
pub mod module_structurer;
pub mod outcome_generator;
pub mod pipeline;
pub mod question_generator;
pub mod topic_extractor;

pub use alignment_matrix::AlignmentMatrixGenerator;
pub use assessment_generator::AssessmentGenerator;
pub use module_structurer::ModuleStructurer;
pub use outcome_generator::OutcomeGenerator;
pub use pipeline::SyllabusPipeline;
pub use question_generator::QuestionGenerator;
pub use topic_extractor::TopicExtractor;

use once_cell::sync::Lazy;
use regex::Regex;

static FIRST_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

static ARTICLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(the|a|an)\b").expect("valid regex"));

static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Week count from a duration string ("12 weeks" → 12)
///
/// The first integer in the text wins; `None` when there is none.
pub fn duration_weeks(duration: &str) -> Option<u32> {
    FIRST_NUMBER_RE
        .find(duration)
        .and_then(|m| m.as_str().parse().ok())
}

/// Lowercase, drop articles, squeeze whitespace
pub fn clean_concept(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let without_articles = ARTICLE_RE.replace_all(&lower, "");
    SPACES_RE.replace_all(without_articles.trim(), " ").into_owned()
}

/// Strip every listed prefix the (lowercase) text starts with, in list order
pub(crate) fn strip_prefixes(text: &str, prefixes: &[&str]) -> String {
    let mut stripped = text.to_string();
    for prefix in prefixes {
        if let Some(rest) = stripped.strip_prefix(prefix) {
            stripped = rest.trim().to_string();
        }
    }
    stripped
}

/// Capitalize the first letter of every alphabetic run ("hands-on lab" → "Hands-On Lab")
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}
