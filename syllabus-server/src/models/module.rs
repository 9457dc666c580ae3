//! Course module and its module-level learning outcomes

use serde::{Deserialize, Serialize};
use syllabus_common::{BloomLevel, BloomTier};

/// Module-level learning outcome
///
/// Addressed externally by `M{moduleId}-LO{position}`; see
/// [`module_outcome_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOutcome {
    pub outcome: String,
    pub bloom_level: BloomLevel,
    pub bloom_tier: BloomTier,
}

/// One course module
///
/// Created by the module structurer; `learning_outcomes` is filled in by the
/// outcome generator and never reordered afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// 1-based sequential id
    pub id: u32,
    pub title: String,
    pub description: String,
    /// At most four topics
    pub subtopics: Vec<String>,
    /// Every topic assigned to the module
    pub keywords: Vec<String>,
    pub hours: u32,
    #[serde(default)]
    pub learning_outcomes: Vec<ModuleOutcome>,
}

impl Module {
    /// Outcome keys paired with their outcomes, in position order
    pub fn keyed_outcomes(&self) -> impl Iterator<Item = (String, &ModuleOutcome)> + '_ {
        self.learning_outcomes
            .iter()
            .enumerate()
            .map(move |(idx, outcome)| (module_outcome_key(self.id, idx + 1), outcome))
    }
}

/// Synthetic key of a module outcome (`position` is 1-based)
pub fn module_outcome_key(module_id: u32, position: usize) -> String {
    format!("M{}-LO{}", module_id, position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_follow_position() {
        let outcome = ModuleOutcome {
            outcome: "Students will be able to define recursion".to_string(),
            bloom_level: BloomLevel::Remember,
            bloom_tier: BloomTier::Cognitive,
        };
        let module = Module {
            id: 3,
            title: "Introduction to Recursion".to_string(),
            description: String::new(),
            subtopics: vec!["recursion".to_string()],
            keywords: vec!["recursion".to_string()],
            hours: 6,
            learning_outcomes: vec![outcome.clone(), outcome],
        };
        let keys: Vec<String> = module.keyed_outcomes().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["M3-LO1", "M3-LO2"]);
    }

    #[test]
    fn test_camel_case_fields() {
        let module = Module {
            id: 1,
            title: "T".to_string(),
            description: "D".to_string(),
            subtopics: vec![],
            keywords: vec![],
            hours: 4,
            learning_outcomes: vec![],
        };
        let json = serde_json::to_value(&module).unwrap();
        assert!(json.get("learningOutcomes").is_some());
        assert!(json.get("learning_outcomes").is_none());
    }
}
