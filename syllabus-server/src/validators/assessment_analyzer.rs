//! Assessment blueprint analysis
//!
//! Scores a blueprint against the outcomes it is meant to measure:
//!
//! | Part                | Points                                         |
//! |---------------------|------------------------------------------------|
//! | Bloom coverage      | 30 × share of outcome levels some component assesses |
//! | Outcome alignment   | 30 × share of outcome ids linked by a component |
//! | Weight distribution | 20 without issues, 15 without warnings, else 10 |
//! | Timing              | 20 without warnings, else 15                   |

use serde::Serialize;
use std::collections::BTreeSet;
use syllabus_common::rng::round1;
use syllabus_common::{AssessmentKind, BloomLevel};

use crate::models::{AssessmentBlueprint, BloomStatistics, CourseOutcome, Module};

const EXCESSIVE_WEIGHT: u32 = 40;
const HIGH_WEIGHT: u32 = 35;
const MIN_CONTINUOUS_WEIGHT: u32 = 25;
const MAX_HIGH_STAKES_WEIGHT: u32 = 60;
const MAX_END_OF_COURSE: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloomCoverage {
    pub assessed_levels: Vec<BloomLevel>,
    pub outcome_levels: Vec<BloomLevel>,
    pub uncovered_levels: Vec<BloomLevel>,
    pub coverage_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeAlignment {
    pub total_outcomes: usize,
    pub assessed_outcomes: usize,
    pub unassessed_outcomes: Vec<String>,
    pub coverage_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightDistribution {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub continuous_weight: u32,
    pub high_stakes_weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingAnalysis {
    pub warnings: Vec<String>,
    pub assessment_count: usize,
}

/// Blueprint quality report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// 0-100, one decimal
    pub quality_score: f64,
    pub overall_grade: String,
    pub bloom_coverage: BloomCoverage,
    pub outcome_alignment: OutcomeAlignment,
    pub weight_distribution: WeightDistribution,
    pub timing: TimingAnalysis,
}

/// Blueprint analysis stage
#[derive(Debug, Clone, Default)]
pub struct AssessmentAnalyzer;

impl AssessmentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        blueprint: &AssessmentBlueprint,
        statistics: &BloomStatistics,
        course_outcomes: &[CourseOutcome],
        modules: &[Module],
    ) -> AnalysisReport {
        let bloom_coverage = bloom_coverage(blueprint, statistics);
        let outcome_alignment = outcome_alignment(blueprint, course_outcomes, modules);
        let weight_distribution = weight_distribution(blueprint);
        let timing = timing(blueprint);

        let mut score = 30.0 * bloom_coverage.coverage_percentage / 100.0
            + 30.0 * outcome_alignment.coverage_percentage / 100.0;
        score += if weight_distribution.issues.is_empty() {
            20.0
        } else if weight_distribution.warnings.is_empty() {
            15.0
        } else {
            10.0
        };
        score += if timing.warnings.is_empty() { 20.0 } else { 15.0 };

        AnalysisReport {
            quality_score: round1(score),
            overall_grade: grade(score).to_string(),
            bloom_coverage,
            outcome_alignment,
            weight_distribution,
            timing,
        }
    }
}

/// Share of the module outcomes' Bloom levels some component assesses
pub fn bloom_coverage(blueprint: &AssessmentBlueprint, statistics: &BloomStatistics) -> BloomCoverage {
    let assessed: BTreeSet<BloomLevel> = blueprint
        .components()
        .iter()
        .flat_map(|c| c.bloom_levels.iter().copied())
        .collect();
    let outcome: BTreeSet<BloomLevel> = statistics.module_level.present_levels().collect();

    let covered = outcome.intersection(&assessed).count();
    let coverage_percentage = if outcome.is_empty() {
        0.0
    } else {
        round1(covered as f64 / outcome.len() as f64 * 100.0)
    };

    BloomCoverage {
        uncovered_levels: outcome.difference(&assessed).copied().collect(),
        assessed_levels: assessed.into_iter().collect(),
        outcome_levels: outcome.into_iter().collect(),
        coverage_percentage,
    }
}

/// Share of course and module outcome ids linked by some component
pub fn outcome_alignment(
    blueprint: &AssessmentBlueprint,
    course_outcomes: &[CourseOutcome],
    modules: &[Module],
) -> OutcomeAlignment {
    let linked: BTreeSet<&str> = blueprint
        .components()
        .iter()
        .flat_map(|c| c.linked_los.iter().chain(c.linked_module_los.iter()))
        .map(String::as_str)
        .collect();

    let all: Vec<String> = course_outcomes
        .iter()
        .map(|co| co.id.clone())
        .chain(modules.iter().flat_map(|m| m.keyed_outcomes().map(|(key, _)| key)))
        .collect();

    let (assessed, unassessed): (Vec<String>, Vec<String>) =
        all.into_iter().partition(|id| linked.contains(id.as_str()));
    let total = assessed.len() + unassessed.len();

    OutcomeAlignment {
        total_outcomes: total,
        assessed_outcomes: assessed.len(),
        unassessed_outcomes: unassessed,
        coverage_percentage: if total == 0 {
            0.0
        } else {
            round1(assessed.len() as f64 / total as f64 * 100.0)
        },
    }
}

pub fn weight_distribution(blueprint: &AssessmentBlueprint) -> WeightDistribution {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for component in blueprint.components() {
        if component.weight > EXCESSIVE_WEIGHT {
            issues.push(format!(
                "{} has excessive weight ({}%). Consider redistributing.",
                component.kind, component.weight
            ));
        } else if component.weight > HIGH_WEIGHT {
            warnings.push(format!(
                "{} has high weight ({}%). Ensure students have adequate preparation.",
                component.kind, component.weight
            ));
        }
    }

    let continuous_weight = blueprint.weight_where(AssessmentKind::is_continuous);
    if continuous_weight < MIN_CONTINUOUS_WEIGHT {
        warnings.push(format!(
            "Low continuous assessment weight ({}%). Consider adding more formative assessments.",
            continuous_weight
        ));
    }

    let high_stakes_weight = blueprint.weight_where(AssessmentKind::is_high_stakes);
    if high_stakes_weight > MAX_HIGH_STAKES_WEIGHT {
        issues.push(format!(
            "High-stakes exams dominate ({}%). This may increase student anxiety.",
            high_stakes_weight
        ));
    }

    WeightDistribution {
        issues,
        warnings,
        continuous_weight,
        high_stakes_weight,
    }
}

/// Flags schedules with too many components at the end of the course
pub fn timing(blueprint: &AssessmentBlueprint) -> TimingAnalysis {
    let end_of_course = blueprint
        .components()
        .iter()
        .filter(|c| c.timing.contains("Final") || c.timing.starts_with("Weeks "))
        .count();

    let mut warnings = Vec::new();
    if end_of_course > MAX_END_OF_COURSE {
        warnings.push(
            "Multiple major assessments scheduled near end of course. Consider spreading workload."
                .to_string(),
        );
    }

    TimingAnalysis {
        warnings,
        assessment_count: blueprint.components().len(),
    }
}

pub fn grade(score: f64) -> &'static str {
    if score >= 90.0 {
        "Excellent"
    } else if score >= 80.0 {
        "Good"
    } else if score >= 70.0 {
        "Satisfactory"
    } else if score >= 60.0 {
        "Needs Improvement"
    } else {
        "Poor"
    }
}
