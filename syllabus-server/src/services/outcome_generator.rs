//! Learning outcome generation
//!
//! Produces module-level outcomes (Bloom level chosen by module position
//! and course type) and course-level outcomes (Bloom levels following the
//! course type's target distribution), then maps each course outcome onto
//! the modules that deliver its level.
//!
//! # Bloom level selection
//! Module position `p` of `T` picks a base distribution:
//! - `p/T < 0.33`: Remember/Understand heavy
//! - `p/T < 0.67`: Apply/Analyze heavy
//! - otherwise: Analyze/Evaluate/Create heavy
//!
//! Practical courses add +0.10 Apply and +0.05 Create, theoretical courses
//! +0.10 Understand and +0.05 Analyze. One weighted draw picks the level.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use syllabus_common::bloom::{capitalize_first, fill_template};
use syllabus_common::rng::round_half_even;
use syllabus_common::{BloomLevel, BloomTier, CourseType, Error, Result};
use tracing::debug;

use super::{clean_concept, strip_prefixes};
use crate::models::{
    BloomStatistics, CourseOutcome, LevelBreakdown, Module, ModuleOutcome, OutcomeSection,
};

const MIN_MODULE_OUTCOMES: u32 = 1;
const MAX_MODULE_OUTCOMES: u32 = 6;
const MIN_COURSE_OUTCOMES: usize = 3;
const MAX_COURSE_OUTCOMES: usize = 6;

/// Extra draws allowed when a level is already used in the module
const MAX_REDRAWS: usize = 10;

/// Title prefixes stripped when deriving a module's concept
const MODULE_TITLE_PREFIXES: &[&str] = &[
    "introduction to",
    "fundamentals of",
    "advanced",
    "practical",
    "theory of",
    "principles of",
    "understanding",
    "working with",
    "hands-on",
    "exploring",
    "implementing",
    "applied",
    "deep dive into",
    "mastering",
    "capstone project:",
];

/// Title prefixes stripped when deriving the course concept
const COURSE_TITLE_PREFIXES: &[&str] = &["introduction to", "fundamentals of", "advanced", "basics of"];

/// Outcome generation stage
#[derive(Debug, Clone, Default)]
pub struct OutcomeGenerator;

impl OutcomeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Attach module outcomes in place and build the course outcomes
    pub fn generate<R: Rng + ?Sized>(
        &self,
        modules: &mut [Module],
        course_title: &str,
        course_type: CourseType,
        outcomes_per_module: Option<u32>,
        rng: &mut R,
    ) -> Result<OutcomeSection> {
        let total = modules.len();
        for (idx, module) in modules.iter_mut().enumerate() {
            module.learning_outcomes =
                self.module_outcomes(module, idx + 1, total, course_type, outcomes_per_module, rng)?;
        }

        let mut course_outcomes = self.course_outcomes(course_title, course_type, rng);
        map_course_outcomes(&mut course_outcomes, modules, rng);
        let statistics = bloom_statistics(modules, &course_outcomes);

        debug!(
            module_outcomes = statistics.module_level.total,
            course_outcomes = course_outcomes.len(),
            "Outcomes generated"
        );

        Ok(OutcomeSection {
            course_learning_outcomes: course_outcomes,
            statistics,
        })
    }

    /// Outcomes for one module at 1-based `position` of `total`
    pub fn module_outcomes<R: Rng + ?Sized>(
        &self,
        module: &Module,
        position: usize,
        total: usize,
        course_type: CourseType,
        requested: Option<u32>,
        rng: &mut R,
    ) -> Result<Vec<ModuleOutcome>> {
        let count = match requested {
            Some(n) => n.clamp(MIN_MODULE_OUTCOMES, MAX_MODULE_OUTCOMES),
            None => rng.gen_range(1..=3),
        };

        let mut outcomes = Vec::with_capacity(count as usize);
        let mut used: Vec<BloomLevel> = Vec::new();
        for _ in 0..count {
            let mut level = select_bloom_level(position, total, course_type, rng)?;
            let mut redraws = 0;
            while used.contains(&level) && redraws < MAX_REDRAWS {
                level = select_bloom_level(position, total, course_type, rng)?;
                redraws += 1;
            }
            used.push(level);
            outcomes.push(module_outcome(module, level, rng));
        }
        Ok(outcomes)
    }

    /// 3-6 course outcomes following the course type's Bloom distribution
    pub fn course_outcomes<R: Rng + ?Sized>(
        &self,
        course_title: &str,
        course_type: CourseType,
        rng: &mut R,
    ) -> Vec<CourseOutcome> {
        let target = rng.gen_range(MIN_COURSE_OUTCOMES..=MAX_COURSE_OUTCOMES);
        let counts = level_counts(course_type, target);

        let concept = clean_concept(&strip_prefixes(&course_title.to_lowercase(), COURSE_TITLE_PREFIXES));
        let context = format!("practical {} scenarios", concept);

        let mut outcomes = Vec::with_capacity(target);
        for (level, count) in counts {
            for _ in 0..count {
                let template = level.outcome_templates().choose(rng).copied().unwrap_or("");
                let text = fill_template(
                    template,
                    &[("concept", concept.as_str()), ("context", context.as_str())],
                );
                outcomes.push(CourseOutcome {
                    id: format!("CLO-{}", outcomes.len() + 1),
                    outcome: capitalize_first(&text),
                    bloom_level: level,
                    bloom_tier: BloomTier::Cognitive,
                    mapped_modules: Vec::new(),
                });
            }
        }
        outcomes
    }
}

/// Weighted Bloom level draw for module `position` (1-based) of `total`
pub fn select_bloom_level<R: Rng + ?Sized>(
    position: usize,
    total: usize,
    course_type: CourseType,
    rng: &mut R,
) -> Result<BloomLevel> {
    let weights = level_weights(position, total, course_type);
    let dist = WeightedIndex::new(weights)
        .map_err(|e| Error::Internal(format!("Invalid Bloom weights: {}", e)))?;
    Ok(BloomLevel::ALL[dist.sample(rng)])
}

/// Normalized selection weights, indexed like [`BloomLevel::ALL`]
pub fn level_weights(position: usize, total: usize, course_type: CourseType) -> [f64; 6] {
    let ratio = position as f64 / total.max(1) as f64;
    let mut weights = if ratio < 0.33 {
        [0.4, 0.4, 0.15, 0.05, 0.0, 0.0]
    } else if ratio < 0.67 {
        [0.1, 0.2, 0.4, 0.25, 0.05, 0.0]
    } else {
        [0.0, 0.1, 0.2, 0.3, 0.25, 0.15]
    };

    match course_type {
        CourseType::Practical => {
            weights[BloomLevel::Apply.index()] += 0.1;
            weights[BloomLevel::Create.index()] += 0.05;
        }
        CourseType::Theoretical => {
            weights[BloomLevel::Understand.index()] += 0.1;
            weights[BloomLevel::Analyze.index()] += 0.05;
        }
        CourseType::Technical => {}
    }

    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        for w in weights.iter_mut() {
            *w /= sum;
        }
    }
    weights
}

/// Per-level outcome counts summing to `target`
///
/// Counts come from the course type's distribution with half-to-even
/// rounding. A shortfall goes to the most weighted level; an excess is
/// taken from the smallest counts first.
pub fn level_counts(course_type: CourseType, target: usize) -> BTreeMap<BloomLevel, usize> {
    let distribution = course_type.bloom_distribution();
    let mut counts: BTreeMap<BloomLevel, usize> = BloomLevel::ALL
        .iter()
        .map(|level| (*level, round_half_even(distribution[level.index()] * target as f64) as usize))
        .filter(|(_, count)| *count > 0)
        .collect();

    let current: usize = counts.values().sum();
    if current < target {
        let mut highest = BloomLevel::ALL[0];
        for level in BloomLevel::ALL {
            if distribution[level.index()] > distribution[highest.index()] {
                highest = level;
            }
        }
        *counts.entry(highest).or_insert(0) += target - current;
    } else {
        let mut excess = current - target;
        while excess > 0 {
            let smallest = counts
                .iter()
                .min_by_key(|(_, count)| **count)
                .map(|(level, _)| *level);
            let Some(level) = smallest else { break };
            if let Some(count) = counts.get_mut(&level) {
                *count -= 1;
                if *count == 0 {
                    counts.remove(&level);
                }
            }
            excess -= 1;
        }
    }
    counts
}

fn module_outcome<R: Rng + ?Sized>(module: &Module, level: BloomLevel, rng: &mut R) -> ModuleOutcome {
    let template = level.outcome_templates().choose(rng).copied().unwrap_or("");

    let concept = clean_concept(&strip_prefixes(&module.title.to_lowercase(), MODULE_TITLE_PREFIXES));
    let context = module
        .subtopics
        .first()
        .map(|s| clean_concept(s))
        .unwrap_or_else(|| concept.clone());

    let text = fill_template(
        template,
        &[("concept", concept.as_str()), ("context", context.as_str())],
    );
    ModuleOutcome {
        outcome: capitalize_first(&text),
        bloom_level: level,
        bloom_tier: BloomTier::Cognitive,
    }
}

/// Link each course outcome to modules holding an outcome at its level
///
/// Outcomes no module matches get a random 1-2 modules.
fn map_course_outcomes<R: Rng + ?Sized>(
    course_outcomes: &mut [CourseOutcome],
    modules: &[Module],
    rng: &mut R,
) {
    let module_ids: Vec<u32> = modules.iter().map(|m| m.id).collect();

    for outcome in course_outcomes.iter_mut() {
        outcome.mapped_modules = modules
            .iter()
            .filter(|m| m.learning_outcomes.iter().any(|lo| lo.bloom_level == outcome.bloom_level))
            .map(|m| m.id)
            .collect();

        if outcome.mapped_modules.is_empty() && !module_ids.is_empty() {
            let amount = rng.gen_range(1..=module_ids.len().min(2));
            outcome.mapped_modules = module_ids.choose_multiple(rng, amount).copied().collect();
        }
    }
}

/// Bloom distribution of module and course outcomes
pub fn bloom_statistics(modules: &[Module], course_outcomes: &[CourseOutcome]) -> BloomStatistics {
    BloomStatistics {
        module_level: LevelBreakdown::from_levels(
            modules
                .iter()
                .flat_map(|m| m.learning_outcomes.iter().map(|lo| lo.bloom_level)),
        ),
        course_level: LevelBreakdown::from_levels(course_outcomes.iter().map(|co| co.bloom_level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_common::bloom::OUTCOME_LEAD_IN;
    use syllabus_common::rng::pipeline_rng;

    fn module(id: u32, title: &str, subtopics: &[&str]) -> Module {
        Module {
            id,
            title: title.to_string(),
            description: String::new(),
            subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
            keywords: vec![],
            hours: 6,
            learning_outcomes: vec![],
        }
    }

    #[test]
    fn test_weights_by_position_bucket() {
        let early = level_weights(1, 6, CourseType::Technical);
        assert!(early[0] > 0.3 && early[4] == 0.0 && early[5] == 0.0);

        let middle = level_weights(3, 6, CourseType::Technical);
        assert!((middle[2] - 0.4).abs() < 1e-9);

        let late = level_weights(6, 6, CourseType::Technical);
        assert_eq!(late[0], 0.0);
        assert!(late[5] > 0.0);
    }

    #[test]
    fn test_weights_boosted_and_normalized() {
        for course_type in CourseType::ALL {
            for position in 1..=8 {
                let weights = level_weights(position, 8, course_type);
                let sum: f64 = weights.iter().sum();
                assert!((sum - 1.0).abs() < 1e-9);
            }
        }
        let practical = level_weights(1, 6, CourseType::Practical);
        let technical = level_weights(1, 6, CourseType::Technical);
        assert!(practical[BloomLevel::Apply.index()] > technical[BloomLevel::Apply.index()]);
        assert!(practical[BloomLevel::Create.index()] > 0.0);
    }

    #[test]
    fn test_early_modules_never_draw_evaluate_or_create() {
        let mut rng = pipeline_rng(Some(11));
        for _ in 0..200 {
            let level = select_bloom_level(1, 6, CourseType::Technical, &mut rng).unwrap();
            assert!(level <= BloomLevel::Analyze);
        }
    }

    #[test]
    fn test_level_counts_sum_to_target() {
        for course_type in CourseType::ALL {
            for target in MIN_COURSE_OUTCOMES..=MAX_COURSE_OUTCOMES {
                let counts = level_counts(course_type, target);
                assert_eq!(counts.values().sum::<usize>(), target, "{} {}", course_type, target);
                assert!(counts.values().all(|c| *c > 0));
            }
        }
    }

    #[test]
    fn test_level_counts_theoretical_three() {
        // 0.45 → 0, 0.9 → 1, 0.6 → 1, 0.75 → 1, 0.3 → 0: exactly three
        let counts = level_counts(CourseType::Theoretical, 3);
        let levels: Vec<BloomLevel> = counts.keys().copied().collect();
        assert_eq!(
            levels,
            vec![BloomLevel::Understand, BloomLevel::Apply, BloomLevel::Analyze]
        );
    }

    #[test]
    fn test_outcomes_per_module_clamped() {
        let generator = OutcomeGenerator::new();
        let m = module(1, "Introduction to Graphs", &["graphs"]);
        let mut rng = pipeline_rng(Some(5));
        let outcomes = generator
            .module_outcomes(&m, 1, 4, CourseType::Technical, Some(9), &mut rng)
            .unwrap();
        assert_eq!(outcomes.len(), 6);
        let outcomes = generator
            .module_outcomes(&m, 1, 4, CourseType::Technical, Some(0), &mut rng)
            .unwrap();
        assert_eq!(outcomes.len(), 1);
    }

    #[test]
    fn test_module_outcome_text() {
        let generator = OutcomeGenerator::new();
        let m = module(2, "Applied The Sorting Algorithms", &["Merge Sort"]);
        let mut rng = pipeline_rng(Some(9));
        let outcomes = generator
            .module_outcomes(&m, 2, 4, CourseType::Technical, Some(3), &mut rng)
            .unwrap();
        for outcome in outcomes {
            assert!(outcome.outcome.starts_with(OUTCOME_LEAD_IN), "{}", outcome.outcome);
            assert!(outcome.outcome.contains("sorting algorithms"), "{}", outcome.outcome);
            assert!(!outcome.outcome.contains('{'));
            assert_eq!(outcome.bloom_tier, BloomTier::Cognitive);
        }
    }

    #[test]
    fn test_course_outcomes_ids_and_concept() {
        let generator = OutcomeGenerator::new();
        let mut rng = pipeline_rng(Some(21));
        let outcomes =
            generator.course_outcomes("Introduction to Machine Learning", CourseType::Technical, &mut rng);
        assert!((3..=6).contains(&outcomes.len()));
        for (idx, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.id, format!("CLO-{}", idx + 1));
            assert!(outcome.outcome.contains("machine learning"));
            assert!(!outcome.outcome.contains("introduction"));
        }
    }

    #[test]
    fn test_course_outcome_mapping() {
        let generator = OutcomeGenerator::new();
        let mut modules = vec![
            module(1, "Introduction to Graphs", &["graphs"]),
            module(2, "Applied Trees", &["trees"]),
            module(3, "Capstone Project: Heaps", &["heaps"]),
        ];
        let mut rng = pipeline_rng(Some(33));
        let generated = generator
            .generate(&mut modules, "Data Structures", CourseType::Technical, None, &mut rng)
            .unwrap();

        for clo in &generated.course_learning_outcomes {
            assert!(!clo.mapped_modules.is_empty());
            assert!(clo.mapped_modules.len() <= 3);
            let matching: Vec<u32> = modules
                .iter()
                .filter(|m| m.learning_outcomes.iter().any(|lo| lo.bloom_level == clo.bloom_level))
                .map(|m| m.id)
                .collect();
            if !matching.is_empty() {
                assert_eq!(clo.mapped_modules, matching);
            } else {
                assert!(clo.mapped_modules.len() <= 2);
            }
        }

        let total: usize = modules.iter().map(|m| m.learning_outcomes.len()).sum();
        assert_eq!(generated.statistics.module_level.total, total);
        assert_eq!(
            generated.statistics.course_level.total,
            generated.course_learning_outcomes.len()
        );
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let run = |seed| {
            let mut modules = vec![
                module(1, "Introduction to Graphs", &["graphs"]),
                module(2, "Applied Trees", &["trees"]),
            ];
            let mut rng = pipeline_rng(Some(seed));
            let generated = OutcomeGenerator::new()
                .generate(&mut modules, "Data Structures", CourseType::Practical, None, &mut rng)
                .unwrap();
            (modules, generated.course_learning_outcomes)
        };
        assert_eq!(run(77), run(77));
    }
}
