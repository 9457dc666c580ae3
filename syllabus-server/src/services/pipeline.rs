//! End-to-end syllabus pipeline
//!
//! One [`SyllabusPipeline`] is built at startup and shared behind an `Arc`.
//! Each run owns its random source, seeded from the run's seed, so the same
//! spec and seed reproduce the same syllabus (apart from run id and date).

use std::sync::Arc;
use syllabus_common::config::PipelineConfig;
use syllabus_common::rng::pipeline_rng;
use syllabus_common::Result;
use tracing::info;
use uuid::Uuid;

use super::{
    AlignmentMatrixGenerator, AssessmentGenerator, ModuleStructurer, OutcomeGenerator,
    QuestionGenerator, TopicExtractor,
};
use crate::extractors::{NounPhraseExtractor, PhraseExtractor, TfIdfExtractor};
use crate::models::{AssessmentSection, CourseSpec, RunMetadata, SyllabusResult};
use crate::validators::{AssessmentAnalyzer, OutcomeValidator};

/// Seed for a run: request seed, then configured seed, then a fresh random one
pub fn resolve_seed(requested: Option<u64>, configured: Option<u64>) -> u64 {
    requested.or(configured).unwrap_or_else(rand::random)
}

/// All pipeline stages, wired in order
pub struct SyllabusPipeline {
    topics: TopicExtractor,
    structurer: ModuleStructurer,
    outcomes: OutcomeGenerator,
    validator: OutcomeValidator,
    assessments: AssessmentGenerator,
    analyzer: AssessmentAnalyzer,
    questions: QuestionGenerator,
    alignment: AlignmentMatrixGenerator,
}

impl SyllabusPipeline {
    /// Pipeline with the TF-IDF extractor and noun-phrase fallback
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_extractors(
            config,
            Arc::new(TfIdfExtractor::new()),
            Arc::new(NounPhraseExtractor::new()),
        )
    }

    pub fn with_extractors(
        config: &PipelineConfig,
        primary: Arc<dyn PhraseExtractor>,
        fallback: Arc<dyn PhraseExtractor>,
    ) -> Self {
        Self {
            topics: TopicExtractor::new(primary, fallback, config.keyword_count, config.max_topics),
            structurer: ModuleStructurer::new(),
            outcomes: OutcomeGenerator::new(),
            validator: OutcomeValidator::new(),
            assessments: AssessmentGenerator::new(),
            analyzer: AssessmentAnalyzer::new(),
            questions: QuestionGenerator::new(config.questions_per_module),
            alignment: AlignmentMatrixGenerator::new(),
        }
    }

    /// Run every stage for one course
    pub fn run(&self, spec: &CourseSpec, seed: u64) -> Result<SyllabusResult> {
        let run_id = Uuid::new_v4();
        let mut rng = pipeline_rng(Some(seed));
        info!(%run_id, seed, course = %spec.title, "Pipeline run started");

        let topics = self.topics.extract(&spec.title, &spec.description, &spec.scope);
        info!(
            %run_id,
            keywords = topics.keywords.len(),
            topics = topics.topics.len(),
            extractor = %topics.extractor,
            "Topics extracted"
        );

        let mut structure =
            self.structurer
                .structure(&topics, &spec.duration, spec.num_modules, &mut rng);
        info!(
            %run_id,
            course_type = %structure.course_type,
            modules = structure.total_modules,
            total_hours = structure.total_hours,
            "Modules structured"
        );

        let outcomes = self.outcomes.generate(
            &mut structure.modules,
            &spec.title,
            structure.course_type,
            spec.outcomes_per_topic,
            &mut rng,
        )?;
        info!(
            %run_id,
            course_outcomes = outcomes.course_learning_outcomes.len(),
            module_outcomes = outcomes.statistics.module_level.total,
            "Outcomes generated"
        );

        let validation = self
            .validator
            .validate_all(&outcomes.course_learning_outcomes, &structure.modules);
        info!(
            %run_id,
            valid = validation.summary.valid_outcomes,
            total = validation.summary.total_outcomes,
            "Outcomes validated"
        );

        let blueprint = self.assessments.generate(
            structure.course_type,
            &spec.duration,
            &outcomes.course_learning_outcomes,
            &structure.modules,
            &mut rng,
        )?;
        let analysis = self.analyzer.analyze(
            &blueprint,
            &outcomes.statistics,
            &outcomes.course_learning_outcomes,
            &structure.modules,
        );
        info!(
            %run_id,
            components = blueprint.components().len(),
            quality_score = analysis.quality_score,
            grade = %analysis.overall_grade,
            "Assessment blueprint analyzed"
        );

        let questions = self.questions.generate_all(&structure.modules, &mut rng);
        info!(%run_id, questions = questions.len(), "Questions generated");

        let alignment = self.alignment.generate(&structure.modules, &blueprint, &questions);
        info!(
            %run_id,
            rows = alignment.matrix.len(),
            gaps = alignment.gaps.len(),
            "Alignment matrix built"
        );

        Ok(SyllabusResult {
            metadata: RunMetadata {
                course_title: spec.title.clone(),
                description: spec.description.clone(),
                scope: spec.scope.clone(),
                duration: spec.duration.clone(),
                run_id: run_id.to_string(),
                generated_date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                seed,
            },
            topics,
            module_structure: structure,
            outcomes,
            validation,
            assessments: AssessmentSection {
                blueprint,
                analysis,
            },
            questions,
            alignment,
        })
    }
}
