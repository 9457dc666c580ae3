//! Quality checks over generated content
//!
//! Outcome validation and blueprint analysis never fail: findings are
//! reported as issues and warnings inside the result.

pub mod assessment_analyzer;
pub mod outcome_validator;

pub use assessment_analyzer::{AnalysisReport, AssessmentAnalyzer};
pub use outcome_validator::{
    check_bloom_balance, BalanceCheck, OutcomeValidation, OutcomeValidator, ValidationReport,
    ValidationSummary,
};
