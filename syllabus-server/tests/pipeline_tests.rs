//! Pipeline property tests
//!
//! Runs the whole pipeline across many seeds and course shapes and checks
//! the properties every generated syllabus must hold.

use syllabus_common::config::PipelineConfig;
use syllabus_common::{AssessmentKind, BloomLevel, BloomTier, CourseType};
use syllabus_server::models::{
    AssessmentBlueprint, AssessmentComponent, CourseSpec, Coverage, Module, ModuleOutcome,
    MAX_QUESTIONS_PER_ROW,
};
use syllabus_server::services::assessment_generator::select_types;
use syllabus_server::services::{AlignmentMatrixGenerator, SyllabusPipeline};
use syllabus_server::validators::OutcomeValidator;

fn courses() -> Vec<CourseSpec> {
    vec![
        CourseSpec {
            title: "Software Engineering Fundamentals".to_string(),
            description: "Programming, software design, algorithm implementation, database \
                          systems and system architecture. Students build and debug code."
                .to_string(),
            scope: "Version control, testing frameworks and software deployment.".to_string(),
            duration: "14 weeks".to_string(),
            num_modules: Some(8),
            outcomes_per_topic: None,
            seed: None,
        },
        CourseSpec {
            title: "Philosophy of Science".to_string(),
            description: "Theory of knowledge, scientific principles, research methodology \
                          and critical analysis of historical concepts."
                .to_string(),
            scope: "Epistemology, theoretical frameworks and conceptual models.".to_string(),
            duration: "10 weeks".to_string(),
            num_modules: None,
            outcomes_per_topic: Some(2),
            seed: None,
        },
        CourseSpec {
            title: "Clinical Laboratory Practice".to_string(),
            description: "Hands-on lab workshops, practical skills training, case studies and \
                          fieldwork projects in a clinical practice setting."
                .to_string(),
            scope: "Practicum, simulations and applied field experience.".to_string(),
            duration: "one semester".to_string(),
            num_modules: Some(3),
            outcomes_per_topic: None,
            seed: None,
        },
    ]
}

// =============================================================================
// Whole-pipeline properties
// =============================================================================

#[test]
fn test_properties_hold_across_seeds() {
    let pipeline = SyllabusPipeline::new(&PipelineConfig::default());

    for spec in courses() {
        for seed in 0..25u64 {
            let result = pipeline
                .run(&spec, seed)
                .unwrap_or_else(|e| panic!("{} seed {}: {}", spec.title, seed, e));

            let weights: u32 = result
                .assessments
                .blueprint
                .components()
                .iter()
                .map(|c| c.weight)
                .sum();
            assert_eq!(weights, 100, "{} seed {}", spec.title, seed);

            let module_outcomes: usize = result
                .module_structure
                .modules
                .iter()
                .map(|m| m.learning_outcomes.len())
                .sum();
            assert_eq!(result.alignment.matrix.len(), module_outcomes);

            for row in &result.alignment.matrix {
                assert!(row.question_ids.len() <= MAX_QUESTIONS_PER_ROW);
                assert_eq!(row.coverage, Coverage::from_count(row.question_ids.len()));
                let prefix = format!("Q-M{}-", row.module_id);
                assert!(row.question_ids.iter().all(|id| id.starts_with(&prefix)));
            }

            let gaps = result
                .alignment
                .matrix
                .iter()
                .filter(|r| r.coverage == Coverage::None)
                .count();
            assert_eq!(result.alignment.gaps.len(), gaps);

            for (i, module) in result.module_structure.modules.iter().enumerate() {
                assert_eq!(module.id as usize, i + 1);
                assert!(!module.learning_outcomes.is_empty());
            }

            let score = result.assessments.analysis.quality_score;
            assert!((0.0..=100.0).contains(&score));
        }
    }
}

#[test]
fn test_requested_module_count_is_honored() {
    let pipeline = SyllabusPipeline::new(&PipelineConfig::default());
    for spec in courses() {
        let result = pipeline.run(&spec, 3).unwrap();
        if let Some(requested) = spec.num_modules {
            assert_eq!(result.module_structure.total_modules, requested as usize);
        } else {
            assert!((4..=8).contains(&result.module_structure.total_modules));
        }
    }
}

#[test]
fn test_outcomes_per_topic_fixes_module_outcome_count() {
    let pipeline = SyllabusPipeline::new(&PipelineConfig::default());
    let spec = &courses()[1];
    let result = pipeline.run(spec, 11).unwrap();
    for module in &result.module_structure.modules {
        assert_eq!(module.learning_outcomes.len(), 2);
    }
}

#[test]
fn test_questions_per_module_config() {
    let config = PipelineConfig {
        questions_per_module: 8,
        ..PipelineConfig::default()
    };
    let pipeline = SyllabusPipeline::new(&config);
    let spec = &courses()[0];
    let result = pipeline.run(spec, 4).unwrap();
    assert_eq!(result.questions.len(), 8 * result.module_structure.total_modules);
}

// =============================================================================
// Component properties
// =============================================================================

#[test]
fn test_technical_course_with_eight_modules_has_midterm() {
    let types = select_types(CourseType::Technical, 8);
    assert!(types.contains(&AssessmentKind::MidtermExam));

    let types = select_types(CourseType::Technical, 5);
    assert!(!types.contains(&AssessmentKind::MidtermExam));
}

#[test]
fn test_outcome_validator_examples() {
    let validator = OutcomeValidator::new();

    let good = validator.validate("Students will be able to analyze algorithms with 80% accuracy");
    assert!(good.valid, "{:?}", good.issues);

    let bad = validator.validate("Know stuff");
    assert!(!bad.valid);
    assert!(bad.issues.len() >= 2);
    assert!(bad.warnings.len() >= 2);
}

#[test]
fn test_alignment_without_matching_assessment() {
    let module = Module {
        id: 1,
        title: "Introduction to Compilers".to_string(),
        description: "Parsing and code generation.".to_string(),
        subtopics: vec!["parsing".to_string()],
        keywords: vec!["parsing".to_string()],
        hours: 6,
        learning_outcomes: vec![ModuleOutcome {
            outcome: "Students will be able to design a parser for a small language."
                .to_string(),
            bloom_level: BloomLevel::Create,
            bloom_tier: BloomTier::Cognitive,
        }],
    };
    let pretest = AssessmentComponent {
        kind: AssessmentKind::PreTest,
        weight: 100,
        description: AssessmentKind::PreTest.description().to_string(),
        timing: "Week 1".to_string(),
        format: AssessmentKind::PreTest.format().to_string(),
        linked_los: Vec::new(),
        linked_module_los: Vec::new(),
        bloom_levels: vec![BloomLevel::Remember, BloomLevel::Understand],
    };
    let blueprint = AssessmentBlueprint::new(vec![pretest], Vec::new()).unwrap();

    let section = AlignmentMatrixGenerator::new().generate(&[module], &blueprint, &[]);

    assert_eq!(section.matrix.len(), 1);
    assert!(section.matrix[0].assessment_types.is_empty());
    assert_eq!(section.matrix[0].coverage, Coverage::None);
    assert_eq!(section.gaps.len(), 1);
}
