//! Data models for the syllabus pipeline
//!
//! Every entity is created once per pipeline run and held in memory for the
//! duration of a single request. Records serialize with camelCase field
//! names; the response envelope in [`syllabus`] uses snake_case sections.

pub mod alignment;
pub mod assessment;
pub mod course;
pub mod module;
pub mod outcome;
pub mod question;
pub mod syllabus;

pub use alignment::{AlignmentGap, AlignmentRow, Coverage, MAX_QUESTIONS_PER_ROW};
pub use assessment::{AssessmentBlueprint, AssessmentComponent, TOTAL_WEIGHT};
pub use course::{CourseSpec, DurationInput, ProcessRequest};
pub use module::{module_outcome_key, Module, ModuleOutcome};
pub use outcome::{BloomStatistics, CourseOutcome, LevelBreakdown};
pub use question::{question_id, Difficulty, Question, QuestionKind, RubricCriterion};
pub use syllabus::{
    AlignmentSection, AssessmentSection, ModuleStructure, OutcomeSection, RunMetadata,
    SyllabusResult, TopicSet,
};
