//! Learning outcome validation
//!
//! Rules, each applied independently:
//! 1. starts with the lead-in phrase, else issue
//! 2. contains a Bloom verb, else issue
//! 3. contains a vague verb, warning
//! 4. shorter than 10 characters is an issue, longer than 150 a warning
//! 5. fewer than 6 words, warning
//!
//! An outcome is valid when it has no issues.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use syllabus_common::bloom::{all_verbs, OUTCOME_LEAD_IN};
use syllabus_common::BloomLevel;

use crate::models::{BloomStatistics, CourseOutcome, LevelBreakdown, Module};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+").expect("valid regex"));

/// Verbs and phrases that don't describe measurable behaviour
const VAGUE_PHRASES: &[&str] = &[
    "know",
    "understand",
    "learn",
    "appreciate",
    "be aware of",
    "become familiar with",
    "gain knowledge",
];

/// Inflections accepted after a verb stem ("analyze" → "analyzes", "analyzed", "analyzing")
const VERB_SUFFIXES: &[&str] = &["", "s", "es", "d", "ed", "ing", "e"];

const MIN_LENGTH: usize = 10;
const MAX_LENGTH: usize = 150;
const MIN_WORDS: usize = 6;

/// Result of validating one outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeValidation {
    pub valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutcomeValidation {
    pub id: String,
    pub bloom_level: BloomLevel,
    #[serde(flatten)]
    pub result: OutcomeValidation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOutcomeValidation {
    pub module_id: u32,
    pub module_title: String,
    pub learning_outcome_id: String,
    pub bloom_level: BloomLevel,
    #[serde(flatten)]
    pub result: OutcomeValidation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_outcomes: usize,
    pub valid_outcomes: usize,
    pub outcomes_with_issues: usize,
    pub outcomes_with_warnings: usize,
}

impl ValidationSummary {
    fn record(&mut self, result: &OutcomeValidation) {
        self.total_outcomes += 1;
        if result.valid {
            self.valid_outcomes += 1;
        }
        if !result.issues.is_empty() {
            self.outcomes_with_issues += 1;
        }
        if !result.warnings.is_empty() {
            self.outcomes_with_warnings += 1;
        }
    }
}

/// Bloom distribution recommendations for module outcomes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCheck {
    pub balanced: bool,
    pub recommendations: Vec<String>,
}

/// Validation section of a pipeline result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub course_outcomes: Vec<CourseOutcomeValidation>,
    pub module_outcomes: Vec<ModuleOutcomeValidation>,
    pub summary: ValidationSummary,
    pub bloom_balance: BalanceCheck,
}

/// Outcome quality checks
#[derive(Debug, Clone)]
pub struct OutcomeValidator {
    verbs: Vec<&'static str>,
    lead_in: String,
}

impl Default for OutcomeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeValidator {
    pub fn new() -> Self {
        Self {
            verbs: all_verbs(),
            lead_in: OUTCOME_LEAD_IN.to_lowercase(),
        }
    }

    /// Validate a single outcome text
    pub fn validate(&self, text: &str) -> OutcomeValidation {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        let lower = text.to_lowercase();
        let words: Vec<&str> = WORD_RE.find_iter(&lower).map(|m| m.as_str()).collect();

        if !lower.trim_start().starts_with(&self.lead_in) {
            issues.push(format!("Outcome should start with '{}'", OUTCOME_LEAD_IN));
        }

        if !words.iter().any(|word| self.is_bloom_verb(word)) {
            issues.push("Outcome does not contain a measurable Bloom's taxonomy verb".to_string());
        }

        let padded = format!(" {} ", words.join(" "));
        if VAGUE_PHRASES
            .iter()
            .any(|phrase| padded.contains(&format!(" {} ", phrase)))
        {
            warnings.push("Outcome contains vague, non-measurable verbs".to_string());
        }

        let length = text.chars().count();
        if length < MIN_LENGTH {
            issues.push("Outcome is too short".to_string());
        } else if length > MAX_LENGTH {
            warnings.push("Outcome is quite long; consider simplifying".to_string());
        }

        if text.split_whitespace().count() < MIN_WORDS {
            warnings.push("Outcome may lack sufficient detail".to_string());
        }

        OutcomeValidation {
            valid: issues.is_empty(),
            issues,
            warnings,
            outcome: text.to_string(),
        }
    }

    fn is_bloom_verb(&self, word: &str) -> bool {
        self.verbs.iter().any(|verb| {
            if word == *verb {
                return true;
            }
            let stem = verb.strip_suffix('e').unwrap_or(*verb);
            word.strip_prefix(stem)
                .map_or(false, |rest| VERB_SUFFIXES.contains(&rest))
        })
    }

    /// Validate every course and module outcome, plus the Bloom balance
    pub fn validate_all(&self, course_outcomes: &[CourseOutcome], modules: &[Module]) -> ValidationReport {
        let mut summary = ValidationSummary::default();

        let course_results: Vec<CourseOutcomeValidation> = course_outcomes
            .iter()
            .map(|co| {
                let result = self.validate(&co.outcome);
                summary.record(&result);
                CourseOutcomeValidation {
                    id: co.id.clone(),
                    bloom_level: co.bloom_level,
                    result,
                }
            })
            .collect();

        let module_results: Vec<ModuleOutcomeValidation> = modules
            .iter()
            .flat_map(|module| {
                module.keyed_outcomes().map(move |(key, outcome)| (module, key, outcome))
            })
            .map(|(module, key, outcome)| {
                let result = self.validate(&outcome.outcome);
                summary.record(&result);
                ModuleOutcomeValidation {
                    module_id: module.id,
                    module_title: module.title.clone(),
                    learning_outcome_id: key,
                    bloom_level: outcome.bloom_level,
                    result,
                }
            })
            .collect();

        let statistics = BloomStatistics {
            module_level: LevelBreakdown::from_levels(
                modules
                    .iter()
                    .flat_map(|m| m.learning_outcomes.iter().map(|lo| lo.bloom_level)),
            ),
            course_level: LevelBreakdown::from_levels(course_outcomes.iter().map(|co| co.bloom_level)),
        };

        ValidationReport {
            course_outcomes: course_results,
            module_outcomes: module_results,
            summary,
            bloom_balance: check_bloom_balance(&statistics),
        }
    }
}

/// Recommendations when module outcomes lean too far toward recall or away from higher-order levels
pub fn check_bloom_balance(statistics: &BloomStatistics) -> BalanceCheck {
    let module = &statistics.module_level;
    let mut recommendations = Vec::new();

    if module.percentage(BloomLevel::Remember) > 30.0 {
        recommendations.push("Consider reducing 'Remember' level outcomes (currently > 30%)".to_string());
    }
    if module.percentage(BloomLevel::Apply) < 15.0 {
        recommendations.push("Consider adding more 'Apply' level outcomes (currently < 15%)".to_string());
    }
    let higher_order = module.percentage(BloomLevel::Analyze)
        + module.percentage(BloomLevel::Evaluate)
        + module.percentage(BloomLevel::Create);
    if higher_order < 20.0 {
        recommendations
            .push("Consider adding more higher-order outcomes (Analyze/Evaluate/Create)".to_string());
    }

    BalanceCheck {
        balanced: recommendations.is_empty(),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModuleOutcome;
    use syllabus_common::BloomTier;

    #[test]
    fn test_measurable_outcome_is_valid() {
        let result = OutcomeValidator::new()
            .validate("Students will be able to analyze algorithms with 80% accuracy");
        assert!(result.valid, "{:?}", result.issues);
        assert!(result.issues.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_vague_short_outcome_collects_every_finding() {
        let result = OutcomeValidator::new().validate("Know stuff");
        assert!(!result.valid);
        assert_eq!(result.issues.len(), 2);
        assert!(result.issues[0].contains("Students will be able to"));
        assert!(result.issues[1].contains("Bloom's taxonomy verb"));
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("vague"));
        assert!(result.warnings[1].contains("lack sufficient detail"));
    }

    #[test]
    fn test_length_bounds() {
        let validator = OutcomeValidator::new();
        let short = validator.validate("Define x");
        assert!(short.issues.contains(&"Outcome is too short".to_string()));

        let long = format!("Students will be able to design {}", "systems ".repeat(20));
        let result = validator.validate(&long);
        assert!(result.valid);
        assert!(result
            .warnings
            .contains(&"Outcome is quite long; consider simplifying".to_string()));
    }

    #[test]
    fn test_verb_inflections_match() {
        let validator = OutcomeValidator::new();
        assert!(validator.is_bloom_verb("analyzing"));
        assert!(validator.is_bloom_verb("designs"));
        assert!(validator.is_bloom_verb("evaluated"));
        assert!(!validator.is_bloom_verb("stuff"));
        assert!(!validator.is_bloom_verb("know"));
    }

    #[test]
    fn test_vague_phrases_match_whole_words_only() {
        let validator = OutcomeValidator::new();
        let result =
            validator.validate("Students will be able to apply machine learning to image data");
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);

        let result = validator.validate("Students will be able to become familiar with and use SQL");
        assert!(result.warnings[0].contains("vague"));
    }

    #[test]
    fn test_generated_templates_validate() {
        let validator = OutcomeValidator::new();
        for level in BloomLevel::ALL {
            for template in level.outcome_templates() {
                let text = template
                    .replace("{concept}", "relational databases")
                    .replace("{context}", "query tuning");
                let result = validator.validate(&text);
                assert!(result.valid, "{}: {:?}", text, result.issues);
            }
        }
    }

    #[test]
    fn test_validate_all_summary_and_keys() {
        let modules = vec![Module {
            id: 2,
            title: "Trees".to_string(),
            description: String::new(),
            subtopics: vec![],
            keywords: vec![],
            hours: 6,
            learning_outcomes: vec![
                ModuleOutcome {
                    outcome: "Students will be able to define binary trees".to_string(),
                    bloom_level: BloomLevel::Remember,
                    bloom_tier: BloomTier::Cognitive,
                },
                ModuleOutcome {
                    outcome: "Know trees".to_string(),
                    bloom_level: BloomLevel::Understand,
                    bloom_tier: BloomTier::Cognitive,
                },
            ],
        }];
        let clos = vec![CourseOutcome {
            id: "CLO-1".to_string(),
            outcome: "Students will be able to design balanced search trees".to_string(),
            bloom_level: BloomLevel::Create,
            bloom_tier: BloomTier::Cognitive,
            mapped_modules: vec![2],
        }];

        let report = OutcomeValidator::new().validate_all(&clos, &modules);
        assert_eq!(report.summary.total_outcomes, 3);
        assert_eq!(report.summary.valid_outcomes, 2);
        assert_eq!(report.summary.outcomes_with_issues, 1);
        assert_eq!(report.course_outcomes[0].id, "CLO-1");
        assert_eq!(report.module_outcomes[1].learning_outcome_id, "M2-LO2");
        assert_eq!(report.module_outcomes[1].module_title, "Trees");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["totalOutcomes"], 3);
        assert_eq!(json["module_outcomes"][0]["moduleId"], 2);
        assert_eq!(json["module_outcomes"][0]["valid"], true);
        assert_eq!(json["course_outcomes"][0]["bloomLevel"], "Create");
    }

    #[test]
    fn test_bloom_balance() {
        let skewed = BloomStatistics {
            module_level: LevelBreakdown::from_levels([
                BloomLevel::Remember,
                BloomLevel::Remember,
                BloomLevel::Understand,
            ]),
            course_level: LevelBreakdown::default(),
        };
        let check = check_bloom_balance(&skewed);
        assert!(!check.balanced);
        assert_eq!(check.recommendations.len(), 3);

        let balanced = BloomStatistics {
            module_level: LevelBreakdown::from_levels([
                BloomLevel::Understand,
                BloomLevel::Apply,
                BloomLevel::Analyze,
                BloomLevel::Create,
            ]),
            course_level: LevelBreakdown::default(),
        };
        assert!(check_bloom_balance(&balanced).balanced);
    }
}
