//! Sample question generation
//!
//! Each module gets a fixed mix of question types, lower Bloom levels for
//! multiple choice and higher ones for open work:
//!
//! | Type            | Share            | Bloom levels                 |
//! |-----------------|------------------|------------------------------|
//! | MCQ             | max(1, ⌊0.6n⌋)   | Remember, Understand, Apply  |
//! | Short Answer    | max(1, ⌊0.25n⌋)  | Apply, Analyze               |
//! | Case Study/Lab  | rest (min 1)     | Analyze, Evaluate, Create    |
//!
//! Case studies and practical labs alternate, starting with a case study.

use rand::seq::SliceRandom;
use rand::Rng;
use syllabus_common::bloom::{capitalize_first, fill_template};
use syllabus_common::BloomLevel;
use tracing::debug;

use super::{clean_concept, title_case};
use crate::models::{question_id, Difficulty, Module, Question, QuestionKind, RubricCriterion};

const MCQ_LEVELS: [BloomLevel; 3] = [BloomLevel::Remember, BloomLevel::Understand, BloomLevel::Apply];
const SHORT_ANSWER_LEVELS: [BloomLevel; 2] = [BloomLevel::Apply, BloomLevel::Analyze];
const OPEN_LEVELS: [BloomLevel; 3] = [BloomLevel::Analyze, BloomLevel::Evaluate, BloomLevel::Create];

const ANSWER_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Question counts per type for `n` questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionMix {
    pub mcq: usize,
    pub short_answer: usize,
    pub open: usize,
}

impl QuestionMix {
    pub fn for_count(n: usize) -> Self {
        let mcq = (n * 3 / 5).max(1);
        let short_answer = (n / 4).max(1);
        let open = n.saturating_sub(mcq + short_answer).max(1);
        Self {
            mcq,
            short_answer,
            open,
        }
    }

    pub fn total(&self) -> usize {
        self.mcq + self.short_answer + self.open
    }
}

/// Concepts a module's questions are phrased around
struct Concepts {
    concept: String,
    concept1: String,
    concept2: String,
}

impl Concepts {
    fn for_module(module: &Module) -> Self {
        let concept = clean_concept(&module.title);
        if module.subtopics.len() > 1 {
            Self {
                concept1: clean_concept(&module.subtopics[0]),
                concept2: clean_concept(&module.subtopics[1]),
                concept,
            }
        } else {
            Self {
                concept1: concept.clone(),
                concept2: concept.clone(),
                concept,
            }
        }
    }
}

/// Question generation stage
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    questions_per_module: usize,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new(5)
    }
}

impl QuestionGenerator {
    pub fn new(questions_per_module: usize) -> Self {
        Self {
            questions_per_module,
        }
    }

    /// Questions for every module, module order then generation order
    pub fn generate_all<R: Rng + ?Sized>(&self, modules: &[Module], rng: &mut R) -> Vec<Question> {
        let questions: Vec<Question> = modules
            .iter()
            .flat_map(|module| self.generate_for_module(module, rng))
            .collect();
        debug!(questions = questions.len(), "Questions generated");
        questions
    }

    pub fn generate_for_module<R: Rng + ?Sized>(&self, module: &Module, rng: &mut R) -> Vec<Question> {
        let mix = QuestionMix::for_count(self.questions_per_module);
        let concepts = Concepts::for_module(module);
        let mut questions = Vec::with_capacity(mix.total());

        for _ in 0..mix.mcq {
            let level = pick(&MCQ_LEVELS, rng);
            questions.push(multiple_choice(&concepts, level, rng));
        }
        for _ in 0..mix.short_answer {
            let level = pick(&SHORT_ANSWER_LEVELS, rng);
            questions.push(short_answer(&concepts, level, rng));
        }
        for i in 0..mix.open {
            let level = pick(&OPEN_LEVELS, rng);
            if i % 2 == 0 {
                questions.push(case_study(module, &concepts, level));
            } else {
                questions.push(practical_lab(&concepts, level));
            }
        }

        for (idx, question) in questions.iter_mut().enumerate() {
            question.id = question_id(module.id, idx + 1);
            question.module_id = module.id;
        }
        questions
    }
}

fn pick<R: Rng + ?Sized>(levels: &[BloomLevel], rng: &mut R) -> BloomLevel {
    levels.choose(rng).copied().unwrap_or(BloomLevel::Apply)
}

fn question_text<R: Rng + ?Sized>(
    level: BloomLevel,
    concepts: &Concepts,
    problem: &str,
    context: &str,
    rng: &mut R,
) -> String {
    let template = level.question_templates().choose(rng).copied().unwrap_or("");
    let c = &concepts.concept;
    let goal = format!("optimal {}", c);
    let target = format!("the {} value", c);
    let alternative = format!("alternative {} methods", c);
    let text = fill_template(
        template,
        &[
            ("concept1", concepts.concept1.as_str()),
            ("concept2", concepts.concept2.as_str()),
            ("concept", c.as_str()),
            ("problem", problem),
            ("context", context),
            ("goal", goal.as_str()),
            ("target", target.as_str()),
            ("alternative", alternative.as_str()),
        ],
    );
    capitalize_first(&text)
}

fn multiple_choice<R: Rng + ?Sized>(concepts: &Concepts, level: BloomLevel, rng: &mut R) -> Question {
    let c = &concepts.concept;
    let question = question_text(
        level,
        concepts,
        &format!("a problem involving {}", c),
        &format!("practical {} scenarios", c),
        rng,
    );

    let focus = &concepts.concept1;
    let titled = title_case(focus);
    let options = vec![
        format!("A) {} serves as the primary mechanism for data processing", titled),
        format!("B) It provides a framework for implementing {}", focus),
        format!("C) {} enables systematic analysis and evaluation", titled),
        format!("D) It represents an alternative approach to {}", focus),
    ];
    let correct = ANSWER_LETTERS.choose(rng).copied().unwrap_or("A");

    Question {
        id: String::new(),
        module_id: 0,
        bloom_level: level,
        difficulty: Difficulty::for_level(level),
        question,
        estimated_time: estimated_minutes(2.0, level),
        tags: vec![focus.clone(), level.as_str().to_lowercase()],
        kind: QuestionKind::MultipleChoice {
            options,
            correct_answer: correct.to_string(),
            explanation: format!(
                "Option {} is correct because it accurately describes {}.",
                correct, focus
            ),
        },
    }
}

fn short_answer<R: Rng + ?Sized>(concepts: &Concepts, level: BloomLevel, rng: &mut R) -> Question {
    let question = question_text(
        level,
        concepts,
        &format!("real-world {} challenges", concepts.concept),
        "industry applications",
        rng,
    );
    let focus = &concepts.concept1;

    Question {
        id: String::new(),
        module_id: 0,
        bloom_level: level,
        difficulty: Difficulty::for_level(level),
        question,
        estimated_time: estimated_minutes(10.0, level),
        tags: vec![
            focus.clone(),
            level.as_str().to_lowercase(),
            "written-response".to_string(),
        ],
        kind: QuestionKind::ShortAnswer {
            rubric: short_answer_rubric(level),
            sample_answer: format!(
                "A comprehensive answer should address the key principles of {}, demonstrate \
                 understanding of its applications, and provide relevant examples.",
                focus
            ),
        },
    }
}

fn case_study(module: &Module, concepts: &Concepts, level: BloomLevel) -> Question {
    let c = &concepts.concept;
    let challenge = module
        .subtopics
        .first()
        .map(String::as_str)
        .unwrap_or("system integration");
    let scenario = format!(
        "A company is implementing {} to improve their operations. They face challenges with {}. \
         Current metrics show suboptimal performance in key areas.",
        c, challenge
    );

    let question = match level {
        BloomLevel::Analyze | BloomLevel::Evaluate => format!(
            "Analyze the scenario and evaluate the effectiveness of their {} approach. \
             What improvements would you recommend?",
            c
        ),
        BloomLevel::Create => format!(
            "Design a comprehensive solution that addresses the challenges. \
             Your solution should incorporate best practices in {}.",
            c
        ),
        _ => format!(
            "Apply {} principles to solve the company's challenges. \
             Provide a step-by-step implementation plan.",
            c
        ),
    };

    Question {
        id: String::new(),
        module_id: 0,
        bloom_level: level,
        difficulty: Difficulty::Hard,
        question,
        estimated_time: "30-45 minutes".to_string(),
        tags: vec![
            c.clone(),
            level.as_str().to_lowercase(),
            "case-study".to_string(),
            "applied".to_string(),
        ],
        kind: QuestionKind::CaseStudy {
            scenario,
            rubric: vec![
                RubricCriterion::new(
                    "Analysis (30%)",
                    "Depth of problem analysis and identification of key issues",
                ),
                RubricCriterion::new(
                    "Solution Quality (40%)",
                    "Effectiveness and feasibility of proposed solution",
                ),
                RubricCriterion::new(
                    "Justification (20%)",
                    "Quality of reasoning and evidence provided",
                ),
                RubricCriterion::new("Presentation (10%)", "Clarity and organization of response"),
            ],
        },
    }
}

fn practical_lab(concepts: &Concepts, level: BloomLevel) -> Question {
    let c = &concepts.concept;
    Question {
        id: String::new(),
        module_id: 0,
        bloom_level: level,
        difficulty: Difficulty::Hard,
        question: format!(
            "Implement a solution that demonstrates {}. \
             Your implementation should be functional and well-documented.",
            c
        ),
        estimated_time: "2-3 hours".to_string(),
        tags: vec![
            c.clone(),
            level.as_str().to_lowercase(),
            "hands-on".to_string(),
            "implementation".to_string(),
        ],
        kind: QuestionKind::PracticalLab {
            requirements: vec![
                format!("Implement core {} functionality", c),
                "Include appropriate error handling".to_string(),
                "Provide comprehensive documentation".to_string(),
                "Demonstrate testing and validation".to_string(),
            ],
            deliverables: vec![
                "Complete implementation code/artifact".to_string(),
                "Technical documentation".to_string(),
                "Test results and analysis".to_string(),
                "Reflection on design decisions".to_string(),
            ],
            rubric: vec![
                RubricCriterion::new(
                    "Functionality (40%)",
                    "Implementation meets requirements and works correctly",
                ),
                RubricCriterion::new(
                    "Code Quality (25%)",
                    "Code is well-structured, readable, and maintainable",
                ),
                RubricCriterion::new("Documentation (20%)", "Clear and comprehensive documentation"),
                RubricCriterion::new("Testing (15%)", "Thorough testing and validation"),
            ],
        },
    }
}

fn short_answer_rubric(level: BloomLevel) -> Vec<RubricCriterion> {
    match level {
        BloomLevel::Remember | BloomLevel::Understand => vec![
            RubricCriterion::new(
                "Excellent (9-10 pts)",
                "Complete and accurate response with clear explanations",
            ),
            RubricCriterion::new("Good (7-8 pts)", "Mostly correct with minor gaps"),
            RubricCriterion::new("Adequate (5-6 pts)", "Basic understanding demonstrated"),
            RubricCriterion::new("Poor (0-4 pts)", "Significant gaps or misconceptions"),
        ],
        _ => vec![
            RubricCriterion::new(
                "Excellent (9-10 pts)",
                "Sophisticated analysis with strong justification",
            ),
            RubricCriterion::new("Good (7-8 pts)", "Solid understanding with reasonable justification"),
            RubricCriterion::new("Adequate (5-6 pts)", "Basic application with limited depth"),
            RubricCriterion::new("Poor (0-4 pts)", "Superficial or incorrect application"),
        ],
    }
}

fn bloom_multiplier(level: BloomLevel) -> f64 {
    match level {
        BloomLevel::Remember => 1.0,
        BloomLevel::Understand => 1.2,
        BloomLevel::Apply => 1.5,
        BloomLevel::Analyze => 1.8,
        BloomLevel::Evaluate => 2.0,
        BloomLevel::Create => 2.5,
    }
}

fn estimated_minutes(base: f64, level: BloomLevel) -> String {
    format!("{} minutes", (base * bloom_multiplier(level)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_question_mix() {
        assert_eq!(
            QuestionMix::for_count(5),
            QuestionMix {
                mcq: 3,
                short_answer: 1,
                open: 1
            }
        );
        assert_eq!(QuestionMix::for_count(10).total(), 10);
        assert_eq!(QuestionMix::for_count(1).total(), 3);
    }

    #[test]
    fn test_module_questions_ids_and_levels() {
        let m = module(3, "Introduction to Sorting", &["merge sort", "quick sort"]);
        let mut rng = pipeline_rng(Some(4));
        let questions = QuestionGenerator::new(5).generate_for_module(&m, &mut rng);
        assert_eq!(questions.len(), 5);

        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["Q-M3-001", "Q-M3-002", "Q-M3-003", "Q-M3-004", "Q-M3-005"]);
        assert!(questions.iter().all(|q| q.module_id == 3));

        for q in &questions[..3] {
            assert_eq!(q.kind.type_name(), "MCQ");
            assert!(MCQ_LEVELS.contains(&q.bloom_level));
        }
        assert_eq!(questions[3].kind.type_name(), "Short Answer");
        assert!(SHORT_ANSWER_LEVELS.contains(&questions[3].bloom_level));
        assert_eq!(questions[4].kind.type_name(), "Case Study");
        assert_eq!(questions[4].difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_open_questions_alternate() {
        let m = module(1, "Graphs", &[]);
        let mut rng = pipeline_rng(Some(8));
        let questions = QuestionGenerator::new(10).generate_for_module(&m, &mut rng);
        let open: Vec<&str> = questions[8..].iter().map(|q| q.kind.type_name()).collect();
        assert_eq!(open, vec!["Case Study", "Practical Lab"]);
        assert_eq!(questions[9].estimated_time, "2-3 hours");
    }

    #[test]
    fn test_templates_fully_filled() {
        let m = module(2, "The Hash Tables", &["collision handling", "load factor"]);
        for seed in 0..40 {
            let mut rng = pipeline_rng(Some(seed));
            for q in QuestionGenerator::new(8).generate_for_module(&m, &mut rng) {
                assert!(!q.question.contains('{'), "{}", q.question);
                assert!(q.question.chars().next().map_or(false, char::is_uppercase));
            }
        }
    }

    #[test]
    fn test_mcq_options_and_answer() {
        let m = module(1, "Sorting", &["merge sort", "quick sort"]);
        let mut rng = pipeline_rng(Some(2));
        let questions = QuestionGenerator::new(5).generate_for_module(&m, &mut rng);
        match &questions[0].kind {
            QuestionKind::MultipleChoice {
                options,
                correct_answer,
                explanation,
            } => {
                assert_eq!(options.len(), 4);
                assert!(options[0].starts_with("A) Merge Sort serves"));
                assert!(ANSWER_LETTERS.contains(&correct_answer.as_str()));
                assert!(explanation.ends_with("describes merge sort."));
            }
            other => panic!("expected MCQ, got {}", other.type_name()),
        }
        assert_eq!(questions[0].tags[0], "merge sort");
    }

    #[test]
    fn test_estimated_time() {
        assert_eq!(estimated_minutes(2.0, BloomLevel::Remember), "2 minutes");
        assert_eq!(estimated_minutes(2.0, BloomLevel::Apply), "3 minutes");
        assert_eq!(estimated_minutes(10.0, BloomLevel::Analyze), "18 minutes");
        assert_eq!(estimated_minutes(2.0, BloomLevel::Understand), "2 minutes");
    }

    #[test]
    fn test_case_study_defaults_without_subtopics() {
        let m = module(1, "Networks", &[]);
        let q = case_study(&m, &Concepts::for_module(&m), BloomLevel::Create);
        match q.kind {
            QuestionKind::CaseStudy { scenario, rubric } => {
                assert!(scenario.contains("challenges with system integration"));
                assert_eq!(rubric.len(), 4);
            }
            other => panic!("expected case study, got {}", other.type_name()),
        }
        assert!(q.question.starts_with("Design a comprehensive solution"));
    }

    #[test]
    fn test_generate_all_in_module_order() {
        let modules = vec![module(1, "Graphs", &[]), module(2, "Trees", &[])];
        let mut rng = pipeline_rng(Some(3));
        let questions = QuestionGenerator::default().generate_all(&modules, &mut rng);
        assert_eq!(questions.len(), 10);
        assert_eq!(questions[0].module_id, 1);
        assert_eq!(questions[9].id, "Q-M2-005");
    }
}
