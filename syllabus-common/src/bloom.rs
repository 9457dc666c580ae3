//! Bloom's Taxonomy knowledge base
//!
//! Six cognitive tiers, each with an action-verb vocabulary, learning-outcome
//! sentence templates and sample-question templates.
//!
//! Templates use `{placeholder}` markers filled by [`fill_template`]:
//! - Outcome templates: `{concept}`, `{context}`
//! - Question templates: `{concept}`, `{concept1}`, `{concept2}`, `{problem}`,
//!   `{context}`, `{goal}`, `{target}`, `{alternative}`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Canonical lead-in phrase every learning outcome starts with
pub const OUTCOME_LEAD_IN: &str = "Students will be able to";

/// Bloom's Taxonomy cognitive level
///
/// Ordered from lowest (Remember) to highest (Create) cognitive demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BloomLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

/// Domain a Bloom level belongs to
///
/// Only the cognitive domain is generated; the tier is still carried on every
/// outcome so downstream consumers can tell it apart from affective or
/// psychomotor outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BloomTier {
    #[default]
    Cognitive,
}

impl BloomLevel {
    /// All six levels, lowest to highest
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Remember,
        BloomLevel::Understand,
        BloomLevel::Apply,
        BloomLevel::Analyze,
        BloomLevel::Evaluate,
        BloomLevel::Create,
    ];

    /// Position within [`BloomLevel::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BloomLevel::Remember => "Remember",
            BloomLevel::Understand => "Understand",
            BloomLevel::Apply => "Apply",
            BloomLevel::Analyze => "Analyze",
            BloomLevel::Evaluate => "Evaluate",
            BloomLevel::Create => "Create",
        }
    }

    /// Measurable action verbs for this level (lowercase)
    pub fn verbs(self) -> &'static [&'static str] {
        match self {
            BloomLevel::Remember => &[
                "define", "identify", "list", "name", "recall", "recognize", "state", "describe",
                "label", "match", "select",
            ],
            BloomLevel::Understand => &[
                "classify", "describe", "discuss", "explain", "interpret", "summarize", "compare",
                "illustrate", "paraphrase",
            ],
            BloomLevel::Apply => &[
                "apply", "demonstrate", "implement", "solve", "use", "execute", "operate",
                "calculate", "practice",
            ],
            BloomLevel::Analyze => &[
                "analyze", "compare", "contrast", "differentiate", "examine", "investigate",
                "categorize", "distinguish",
            ],
            BloomLevel::Evaluate => &[
                "assess", "critique", "evaluate", "judge", "justify", "validate", "argue",
                "defend", "support",
            ],
            BloomLevel::Create => &[
                "create", "design", "develop", "construct", "formulate", "propose", "plan",
                "produce", "generate",
            ],
        }
    }

    /// Learning-outcome sentence templates for this level
    pub fn outcome_templates(self) -> &'static [&'static str] {
        match self {
            BloomLevel::Remember => &[
                "Students will be able to define {concept}",
                "Students will be able to identify key {concept}",
                "Students will be able to list the main {concept}",
                "Students will be able to recall fundamental {concept}",
            ],
            BloomLevel::Understand => &[
                "Students will be able to explain {concept}",
                "Students will be able to describe the principles of {concept}",
                "Students will be able to summarize {concept}",
                "Students will be able to interpret {concept}",
            ],
            BloomLevel::Apply => &[
                "Students will be able to apply {concept} to {context}",
                "Students will be able to implement {concept}",
                "Students will be able to use {concept} to solve problems",
                "Students will be able to demonstrate {concept}",
            ],
            BloomLevel::Analyze => &[
                "Students will be able to analyze {concept}",
                "Students will be able to compare different {concept}",
                "Students will be able to examine the components of {concept}",
                "Students will be able to differentiate between {concept}",
            ],
            BloomLevel::Evaluate => &[
                "Students will be able to evaluate {concept}",
                "Students will be able to critique {concept}",
                "Students will be able to justify decisions about {concept}",
                "Students will be able to assess {concept}",
            ],
            BloomLevel::Create => &[
                "Students will be able to design {concept}",
                "Students will be able to create {concept}",
                "Students will be able to develop solutions using {concept}",
                "Students will be able to construct {concept}",
            ],
        }
    }

    /// Sample-question templates for this level
    pub fn question_templates(self) -> &'static [&'static str] {
        match self {
            BloomLevel::Remember => &[
                "What is the definition of {concept}?",
                "Identify the main components of {concept}.",
                "List the key features of {concept}.",
                "Which of the following best describes {concept}?",
            ],
            BloomLevel::Understand => &[
                "Explain the relationship between {concept1} and {concept2}.",
                "Describe how {concept} works.",
                "Summarize the main principles of {concept}.",
                "Compare {concept1} with {concept2}.",
            ],
            BloomLevel::Apply => &[
                "Apply {concept} to solve {problem}.",
                "Demonstrate how to use {concept} in {context}.",
                "Implement {concept} to achieve {goal}.",
                "Use {concept} to calculate {target}.",
            ],
            BloomLevel::Analyze => &[
                "Analyze the factors that influence {concept}.",
                "Compare and contrast {concept1} with {concept2}.",
                "Examine the relationship between {concept1} and {concept2}.",
                "Differentiate between {concept1} and {concept2}.",
            ],
            BloomLevel::Evaluate => &[
                "Evaluate the effectiveness of {concept} in {context}.",
                "Critique the approach used in {concept}.",
                "Justify the use of {concept} over {alternative}.",
                "Assess the advantages and disadvantages of {concept}.",
            ],
            BloomLevel::Create => &[
                "Design a {concept} that addresses {problem}.",
                "Create a plan to implement {concept}.",
                "Develop a solution using {concept}.",
                "Propose a new approach to {concept}.",
            ],
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloomLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloomLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown Bloom level: {}", s)))
    }
}

/// Full Bloom verb vocabulary across all six levels, without duplicates
///
/// Verbs shared between levels ("describe", "compare") appear once, at the
/// lowest level that lists them.
pub fn all_verbs() -> Vec<&'static str> {
    let mut verbs: Vec<&'static str> = Vec::new();
    for level in BloomLevel::ALL {
        for verb in level.verbs() {
            if !verbs.contains(verb) {
                verbs.push(verb);
            }
        }
    }
    verbs
}

/// Replace every `{key}` marker in `template` with its value
///
/// Markers without a matching key are left in place.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = template.to_string();
    for (key, value) in values {
        filled = filled.replace(&format!("{{{}}}", key), value);
    }
    filled
}

/// Uppercase the first character of a sentence
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
