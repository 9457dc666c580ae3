//! Pipeline result envelope
//!
//! Top-level sections and their direct keys are snake_case; the entity
//! records nested inside keep their own camelCase names.

use serde::Serialize;
use syllabus_common::CourseType;

use super::{
    AlignmentGap, AlignmentRow, AssessmentBlueprint, BloomStatistics, CourseOutcome, Module,
    Question,
};
use crate::validators::{AnalysisReport, ValidationReport};

/// Complete output of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct SyllabusResult {
    pub metadata: RunMetadata,
    pub topics: TopicSet,
    pub module_structure: ModuleStructure,
    pub outcomes: OutcomeSection,
    pub validation: ValidationReport,
    pub assessments: AssessmentSection,
    pub questions: Vec<Question>,
    pub alignment: AlignmentSection,
}

/// Request echo plus run identification
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub course_title: String,
    pub description: String,
    pub scope: String,
    pub duration: String,
    pub run_id: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub generated_date: String,
    /// Seed of the run's random source; resubmitting it reproduces the run
    pub seed: u64,
}

/// Topic extraction output
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicSet {
    /// Ranked keywords from the phrase extractor
    pub keywords: Vec<String>,
    /// De-duplicated topics distributed over modules
    pub topics: Vec<String>,
    /// Name of the extractor that produced `keywords`
    pub extractor: String,
}

/// Structured course outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleStructure {
    pub course_type: CourseType,
    pub total_modules: usize,
    pub total_hours: u32,
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeSection {
    pub course_learning_outcomes: Vec<CourseOutcome>,
    pub statistics: BloomStatistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSection {
    pub blueprint: AssessmentBlueprint,
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentSection {
    pub matrix: Vec<AlignmentRow>,
    pub gaps: Vec<AlignmentGap>,
}
