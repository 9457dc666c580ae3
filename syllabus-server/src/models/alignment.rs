//! Alignment matrix records

use serde::{Deserialize, Serialize};
use syllabus_common::BloomLevel;

/// Most question ids listed per alignment row
pub const MAX_QUESTIONS_PER_ROW: usize = 5;

/// Qualitative question coverage of one outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coverage {
    None,
    Low,
    Medium,
    High,
}

impl Coverage {
    /// Tier for a number of matching questions
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Coverage::None,
            1..=2 => Coverage::Low,
            3..=4 => Coverage::Medium,
            _ => Coverage::High,
        }
    }
}

/// One (module, outcome) row of the alignment matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentRow {
    pub module_id: u32,
    /// Module title
    pub module: String,
    pub learning_outcome: String,
    /// `M{moduleId}-LO{position}`
    pub learning_outcome_id: String,
    pub bloom_level: BloomLevel,
    /// Blueprint components assessing the outcome's level, in blueprint order
    pub assessment_types: Vec<String>,
    /// At most [`MAX_QUESTIONS_PER_ROW`] ids, in generation order
    pub question_ids: Vec<String>,
    pub coverage: Coverage,
}

/// Outcome without any sample question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentGap {
    pub module: String,
    pub outcome: String,
    pub learning_outcome_id: String,
    pub issue: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_tiers() {
        let tiers: Vec<Coverage> = (0..=6).map(Coverage::from_count).collect();
        assert_eq!(
            tiers,
            vec![
                Coverage::None,
                Coverage::Low,
                Coverage::Low,
                Coverage::Medium,
                Coverage::Medium,
                Coverage::High,
                Coverage::High,
            ]
        );
    }
}
