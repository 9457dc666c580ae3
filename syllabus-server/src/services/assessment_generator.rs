//! Assessment blueprint generation
//!
//! Selects assessment kinds for the course type, allocates integer weights
//! summing to exactly 100, links each component to the outcomes its Bloom
//! levels can measure, and attaches timing, format and recommendations.

use rand::Rng;
use syllabus_common::rng::round_half_even;
use syllabus_common::{AssessmentKind, CourseType, Error, Result};
use tracing::debug;

use super::duration_weeks;
use crate::models::{AssessmentBlueprint, AssessmentComponent, CourseOutcome, Module, TOTAL_WEIGHT};

const MAX_LINKED_COURSE_OUTCOMES: usize = 4;
const MAX_LINKED_MODULE_OUTCOMES: usize = 6;

/// Assessment blueprint stage
#[derive(Debug, Clone, Default)]
pub struct AssessmentGenerator;

impl AssessmentGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the blueprint for a structured course with outcomes attached
    pub fn generate<R: Rng + ?Sized>(
        &self,
        course_type: CourseType,
        duration: &str,
        course_outcomes: &[CourseOutcome],
        modules: &[Module],
        rng: &mut R,
    ) -> Result<AssessmentBlueprint> {
        let num_modules = modules.len();
        let kinds = select_types(course_type, num_modules);
        let weights = allocate_weights(&kinds, course_type, rng)?;
        let weeks = duration_weeks(duration);

        let mut components: Vec<AssessmentComponent> = kinds
            .iter()
            .zip(weights)
            .map(|(&kind, weight)| {
                let (linked_los, linked_module_los) = linked_outcomes(kind, course_outcomes, modules);
                AssessmentComponent {
                    kind,
                    weight,
                    description: describe(kind, course_type),
                    timing: timing(kind, num_modules, weeks),
                    format: kind.format().to_string(),
                    linked_los,
                    linked_module_los,
                    bloom_levels: kind.suitable_bloom().to_vec(),
                }
            })
            .collect();

        // Stable: equal weights keep selection order
        components.sort_by(|a, b| b.weight.cmp(&a.weight));

        let recommendations = recommendations(&components, course_type);
        debug!(
            components = components.len(),
            recommendations = recommendations.len(),
            "Assessment blueprint built"
        );
        AssessmentBlueprint::new(components, recommendations)
    }
}

/// Assessment kinds for a course type, in selection order
pub fn select_types(course_type: CourseType, num_modules: usize) -> Vec<AssessmentKind> {
    use AssessmentKind::*;
    match course_type {
        CourseType::Technical => {
            let mut kinds = vec![PreTest, Quizzes, LabsAssignments, Project, FinalExam];
            if num_modules >= 6 {
                kinds.insert(3, MidtermExam);
            }
            kinds
        }
        CourseType::Theoretical => {
            let mut kinds = vec![PreTest, Quizzes, MidtermExam, LabsAssignments, FinalExam];
            if num_modules >= 6 {
                kinds.push(Project);
            }
            kinds
        }
        CourseType::Practical => {
            let mut kinds = vec![Quizzes, LabsAssignments, Project, FinalExam];
            if num_modules >= 7 {
                kinds.insert(2, MidtermExam);
            }
            kinds
        }
    }
}

/// Integer weights for `kinds`, in the same order, summing to exactly 100
///
/// Weights are drawn uniformly from each kind's range, scaled by
/// `100 / sum` with half-to-even rounding, and any remaining difference is
/// added to the first largest weight.
pub fn allocate_weights<R: Rng + ?Sized>(
    kinds: &[AssessmentKind],
    course_type: CourseType,
    rng: &mut R,
) -> Result<Vec<u32>> {
    if kinds.is_empty() {
        return Err(Error::Invariant("No assessment kinds selected".to_string()));
    }

    let mut weights: Vec<i64> = kinds
        .iter()
        .map(|kind| {
            let (min, max) = kind.weight_range(course_type);
            i64::from(rng.gen_range(min..=max))
        })
        .collect();

    let target = i64::from(TOTAL_WEIGHT);
    let sum: i64 = weights.iter().sum();
    if sum == 0 {
        return Err(Error::Invariant("Drawn assessment weights sum to zero".to_string()));
    }
    if sum != target {
        let factor = target as f64 / sum as f64;
        for w in weights.iter_mut() {
            *w = round_half_even(*w as f64 * factor) as i64;
        }
    }

    let diff = target - weights.iter().sum::<i64>();
    if diff != 0 {
        let mut largest = 0;
        for (idx, w) in weights.iter().enumerate() {
            if *w > weights[largest] {
                largest = idx;
            }
        }
        weights[largest] += diff;
    }

    weights
        .into_iter()
        .map(|w| {
            u32::try_from(w).map_err(|_| Error::Invariant(format!("Negative assessment weight {}", w)))
        })
        .collect()
}

/// Course outcome ids and module outcome keys at levels `kind` can measure
fn linked_outcomes(
    kind: AssessmentKind,
    course_outcomes: &[CourseOutcome],
    modules: &[Module],
) -> (Vec<String>, Vec<String>) {
    let suitable = kind.suitable_bloom();

    let course: Vec<String> = course_outcomes
        .iter()
        .filter(|co| suitable.contains(&co.bloom_level))
        .take(MAX_LINKED_COURSE_OUTCOMES)
        .map(|co| co.id.clone())
        .collect();

    let module: Vec<String> = modules
        .iter()
        .flat_map(|m| m.keyed_outcomes())
        .filter(|(_, outcome)| suitable.contains(&outcome.bloom_level))
        .take(MAX_LINKED_MODULE_OUTCOMES)
        .map(|(key, _)| key)
        .collect();

    (course, module)
}

fn timing(kind: AssessmentKind, num_modules: usize, weeks: Option<u32>) -> String {
    match kind {
        AssessmentKind::PreTest => "Week 1".to_string(),
        AssessmentKind::Quizzes | AssessmentKind::LabsAssignments => match weeks {
            Some(weeks) => format!("Weekly (Weeks 2-{})", weeks),
            None => "Weekly".to_string(),
        },
        AssessmentKind::MidtermExam => format!("Week {}", num_modules / 2 + 1),
        AssessmentKind::Project => {
            format!("Weeks {}-{}", num_modules.saturating_sub(2).max(1), num_modules + 1)
        }
        AssessmentKind::FinalExam => "Final Week".to_string(),
    }
}

fn describe(kind: AssessmentKind, course_type: CourseType) -> String {
    let detail = match (kind, course_type) {
        (AssessmentKind::LabsAssignments, CourseType::Technical) => {
            "Focus on coding exercises and algorithm implementation."
        }
        (AssessmentKind::LabsAssignments, CourseType::Practical) => {
            "Emphasis on real-world applications and case studies."
        }
        (AssessmentKind::LabsAssignments, CourseType::Theoretical) => {
            "Problem sets and analytical exercises."
        }
        (AssessmentKind::Project, CourseType::Technical) => {
            "Build a complete application demonstrating course concepts."
        }
        (AssessmentKind::Project, CourseType::Practical) => {
            "Apply course knowledge to solve a real-world problem."
        }
        (AssessmentKind::Project, CourseType::Theoretical) => {
            "Research-based project with written report."
        }
        _ => return kind.description().to_string(),
    };
    format!("{}. {}", kind.description(), detail)
}

fn recommendations(components: &[AssessmentComponent], course_type: CourseType) -> Vec<String> {
    let weight_of = |predicate: &dyn Fn(AssessmentKind) -> bool| -> u32 {
        components
            .iter()
            .filter(|c| predicate(c.kind))
            .map(|c| c.weight)
            .sum()
    };

    let mut recommendations = Vec::new();

    if weight_of(&AssessmentKind::is_exam) > 50 {
        recommendations.push(
            "Consider reducing exam weight to allow more formative assessment opportunities."
                .to_string(),
        );
    }
    if weight_of(&AssessmentKind::is_continuous) < 30 {
        recommendations
            .push("Consider adding more continuous assessment to track student progress.".to_string());
    }
    match course_type {
        CourseType::Technical => {
            if weight_of(&|k: AssessmentKind| k == AssessmentKind::LabsAssignments) < 25 {
                recommendations.push(
                    "For technical courses, consider increasing hands-on lab/assignment weight."
                        .to_string(),
                );
            }
        }
        CourseType::Practical => {
            if weight_of(&|k: AssessmentKind| k == AssessmentKind::Project) < 15 {
                recommendations.push(
                    "For practical courses, consider adding a capstone project component."
                        .to_string(),
                );
            }
        }
        CourseType::Theoretical => {}
    }

    if recommendations.is_empty() {
        recommendations.push("Assessment blueprint is well-balanced for this course type.".to_string());
    }
    recommendations
}
