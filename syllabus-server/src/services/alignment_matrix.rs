//! Alignment matrix
//!
//! Joins every module outcome against the blueprint (components assessing
//! its Bloom level) and the question bank (questions of the same module and
//! level). Pure nested-loop join, no randomness.

use syllabus_common::BloomLevel;
use tracing::debug;

use crate::models::{
    AlignmentGap, AlignmentRow, AlignmentSection, AssessmentBlueprint, Coverage, Module, Question,
    MAX_QUESTIONS_PER_ROW,
};

const GAP_ISSUE: &str = "No questions mapped to this outcome";

/// Alignment stage
#[derive(Debug, Clone, Default)]
pub struct AlignmentMatrixGenerator;

impl AlignmentMatrixGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Matrix plus gap analysis
    pub fn generate(
        &self,
        modules: &[Module],
        blueprint: &AssessmentBlueprint,
        questions: &[Question],
    ) -> AlignmentSection {
        let matrix = self.generate_matrix(modules, blueprint, questions);
        let gaps = self.gap_analysis(&matrix);
        debug!(rows = matrix.len(), gaps = gaps.len(), "Alignment matrix built");
        AlignmentSection { matrix, gaps }
    }

    /// One row per module outcome, module order then outcome order
    pub fn generate_matrix(
        &self,
        modules: &[Module],
        blueprint: &AssessmentBlueprint,
        questions: &[Question],
    ) -> Vec<AlignmentRow> {
        modules
            .iter()
            .flat_map(|module| {
                module.keyed_outcomes().map(move |(key, outcome)| {
                    let question_ids =
                        matching_questions(module.id, outcome.bloom_level, questions);
                    AlignmentRow {
                        module_id: module.id,
                        module: module.title.clone(),
                        learning_outcome: outcome.outcome.clone(),
                        learning_outcome_id: key,
                        bloom_level: outcome.bloom_level,
                        assessment_types: assessing_components(outcome.bloom_level, blueprint),
                        coverage: Coverage::from_count(question_ids.len()),
                        question_ids,
                    }
                })
            })
            .collect()
    }

    /// Rows without any question
    pub fn gap_analysis(&self, matrix: &[AlignmentRow]) -> Vec<AlignmentGap> {
        matrix
            .iter()
            .filter(|row| row.coverage == Coverage::None)
            .map(|row| AlignmentGap {
                module: row.module.clone(),
                outcome: row.learning_outcome.clone(),
                learning_outcome_id: row.learning_outcome_id.clone(),
                issue: GAP_ISSUE.to_string(),
            })
            .collect()
    }
}

fn assessing_components(level: BloomLevel, blueprint: &AssessmentBlueprint) -> Vec<String> {
    blueprint
        .components()
        .iter()
        .filter(|c| c.assesses(level))
        .map(|c| c.kind.name().to_string())
        .collect()
}

fn matching_questions(module_id: u32, level: BloomLevel, questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .filter(|q| q.module_id == module_id && q.bloom_level == level)
        .take(MAX_QUESTIONS_PER_ROW)
        .map(|q| q.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        question_id, AssessmentComponent, Difficulty, ModuleOutcome, QuestionKind,
    };
    use syllabus_common::{AssessmentKind, BloomTier};

    fn module(id: u32, levels: &[BloomLevel]) -> Module {
        Module {
            id,
            title: format!("Module {}", id),
            description: String::new(),
            subtopics: vec![],
            keywords: vec![],
            hours: 6,
            learning_outcomes: levels
                .iter()
                .map(|level| ModuleOutcome {
                    outcome: format!("Students will be able to {} things", level.verbs()[0]),
                    bloom_level: *level,
                    bloom_tier: BloomTier::Cognitive,
                })
                .collect(),
        }
    }

    fn question(module_id: u32, seq: usize, level: BloomLevel) -> Question {
        Question {
            id: question_id(module_id, seq),
            module_id,
            bloom_level: level,
            difficulty: Difficulty::for_level(level),
            question: "Q?".to_string(),
            estimated_time: "2 minutes".to_string(),
            tags: vec![],
            kind: QuestionKind::MultipleChoice {
                options: vec![],
                correct_answer: "A".to_string(),
                explanation: String::new(),
            },
        }
    }

    fn blueprint(kinds: &[(AssessmentKind, u32)]) -> AssessmentBlueprint {
        let components = kinds
            .iter()
            .map(|(kind, weight)| AssessmentComponent {
                kind: *kind,
                weight: *weight,
                description: String::new(),
                timing: String::new(),
                format: String::new(),
                linked_los: vec![],
                linked_module_los: vec![],
                bloom_levels: kind.suitable_bloom().to_vec(),
            })
            .collect();
        AssessmentBlueprint::new(components, vec![]).unwrap()
    }

    #[test]
    fn test_rows_keyed_and_ordered() {
        let modules = vec![
            module(1, &[BloomLevel::Remember, BloomLevel::Apply]),
            module(2, &[BloomLevel::Create]),
        ];
        let bp = blueprint(&[(AssessmentKind::Quizzes, 50), (AssessmentKind::FinalExam, 50)]);
        let matrix = AlignmentMatrixGenerator::new().generate_matrix(&modules, &bp, &[]);
        let keys: Vec<&str> = matrix.iter().map(|r| r.learning_outcome_id.as_str()).collect();
        assert_eq!(keys, vec!["M1-LO1", "M1-LO2", "M2-LO1"]);
        assert_eq!(matrix[0].assessment_types, vec!["Quizzes", "Final Exam"]);
        assert_eq!(matrix[2].assessment_types, vec!["Final Exam"]);
    }

    #[test]
    fn test_level_without_component_has_no_assessment_types() {
        let modules = vec![module(1, &[BloomLevel::Create])];
        let bp = blueprint(&[(AssessmentKind::Quizzes, 60), (AssessmentKind::PreTest, 40)]);
        let matrix = AlignmentMatrixGenerator::new().generate_matrix(&modules, &bp, &[]);
        assert_eq!(matrix.len(), 1);
        assert!(matrix[0].assessment_types.is_empty());
    }

    #[test]
    fn test_question_ids_truncated_and_coverage() {
        let modules = vec![module(1, &[BloomLevel::Apply, BloomLevel::Analyze])];
        let mut questions: Vec<Question> =
            (1..=7).map(|seq| question(1, seq, BloomLevel::Apply)).collect();
        questions.push(question(1, 8, BloomLevel::Analyze));
        questions.push(question(2, 1, BloomLevel::Analyze));

        let bp = blueprint(&[(AssessmentKind::FinalExam, 100)]);
        let section = AlignmentMatrixGenerator::new().generate(&modules, &bp, &questions);

        let apply = &section.matrix[0];
        assert_eq!(apply.question_ids.len(), 5);
        assert_eq!(apply.question_ids[0], "Q-M1-001");
        assert_eq!(apply.question_ids[4], "Q-M1-005");
        assert_eq!(apply.coverage, Coverage::High);

        let analyze = &section.matrix[1];
        assert_eq!(analyze.question_ids, vec!["Q-M1-008"]);
        assert_eq!(analyze.coverage, Coverage::Low);
        assert!(section.gaps.is_empty());
    }

    #[test]
    fn test_gaps_for_uncovered_outcomes() {
        let modules = vec![module(1, &[BloomLevel::Evaluate]), module(2, &[BloomLevel::Remember])];
        let questions = vec![question(2, 1, BloomLevel::Remember)];
        let bp = blueprint(&[(AssessmentKind::FinalExam, 100)]);
        let section = AlignmentMatrixGenerator::new().generate(&modules, &bp, &questions);

        assert_eq!(section.gaps.len(), 1);
        assert_eq!(section.gaps[0].learning_outcome_id, "M1-LO1");
        assert_eq!(section.gaps[0].module, "Module 1");
        assert_eq!(section.gaps[0].issue, "No questions mapped to this outcome");
    }
}
