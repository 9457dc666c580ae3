//! Sample question records
//!
//! Every question shares an envelope (id, module, Bloom level, difficulty,
//! prompt) and carries type-specific fields. The `type` tag and those fields
//! are flattened into the envelope on the wire:
//!
//! ```json
//! {"id": "Q-M1-001", "moduleId": 1, "type": "MCQ", "options": [...], ...}
//! ```

use serde::{Deserialize, Serialize};
use syllabus_common::BloomLevel;

/// Expected difficulty of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Difficulty implied by the cognitive demand of a Bloom level
    pub fn for_level(level: BloomLevel) -> Self {
        match level {
            BloomLevel::Remember | BloomLevel::Understand => Difficulty::Easy,
            BloomLevel::Apply | BloomLevel::Analyze => Difficulty::Medium,
            BloomLevel::Evaluate | BloomLevel::Create => Difficulty::Hard,
        }
    }
}

/// One rubric line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricCriterion {
    pub criterion: String,
    pub description: String,
}

impl RubricCriterion {
    pub fn new(criterion: &str, description: &str) -> Self {
        Self {
            criterion: criterion.to_string(),
            description: description.to_string(),
        }
    }
}

/// Type-specific question content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionKind {
    #[serde(rename = "MCQ", rename_all = "camelCase")]
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
        explanation: String,
    },
    #[serde(rename = "Short Answer", rename_all = "camelCase")]
    ShortAnswer {
        rubric: Vec<RubricCriterion>,
        sample_answer: String,
    },
    #[serde(rename = "Case Study", rename_all = "camelCase")]
    CaseStudy {
        scenario: String,
        rubric: Vec<RubricCriterion>,
    },
    #[serde(rename = "Practical Lab", rename_all = "camelCase")]
    PracticalLab {
        requirements: Vec<String>,
        deliverables: Vec<String>,
        rubric: Vec<RubricCriterion>,
    },
}

impl QuestionKind {
    /// Wire name of the question type
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "MCQ",
            QuestionKind::ShortAnswer { .. } => "Short Answer",
            QuestionKind::CaseStudy { .. } => "Case Study",
            QuestionKind::PracticalLab { .. } => "Practical Lab",
        }
    }
}

/// Generated sample question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// `Q-M{moduleId}-{seq:03}`
    pub id: String,
    pub module_id: u32,
    pub bloom_level: BloomLevel,
    pub difficulty: Difficulty,
    pub question: String,
    pub estimated_time: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Question id for the `seq`-th (1-based) question of a module
pub fn question_id(module_id: u32, seq: usize) -> String {
    format!("Q-M{}-{:03}", module_id, seq)
}
