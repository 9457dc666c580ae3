//! Module structuring
//!
//! Groups extracted topics into an ordered list of modules and dresses them
//! up: course type detection, title prefixes by position, one-line
//! descriptions and per-module hour allocation.
//!
//! # Module count
//! - Requested count: clamped to [1, 12]
//! - Otherwise: `topics / 3`, clamped to [4, 8]
//!
//! Topics are dealt round-robin, so module `i` holds topics `i`, `i + n`,
//! `i + 2n`, ... Modules left without a topic become generic
//! "Additional Concepts" modules.
//!
//! # Hours
//! `weeks × 3 / modules`, truncated and clamped to [4, 12]; 6 when the
//! duration names no week count.

use rand::seq::SliceRandom;
use rand::Rng;
use syllabus_common::CourseType;
use tracing::debug;

use super::{duration_weeks, title_case};
use crate::models::{Module, ModuleStructure, TopicSet};

const MAX_REQUESTED_MODULES: u32 = 12;
const MIN_DERIVED_MODULES: usize = 4;
const MAX_DERIVED_MODULES: usize = 8;
const MAX_SUBTOPICS: usize = 4;

const HOURS_PER_WEEK: u32 = 3;
const MIN_MODULE_HOURS: u32 = 4;
const MAX_MODULE_HOURS: u32 = 12;
const DEFAULT_MODULE_HOURS: u32 = 6;

const PADDING_TITLE: &str = "Additional Concepts";
const PADDING_SUBTOPICS: [&str; 2] = ["Related topics", "Case studies"];

/// Prefixes removed from a draft title before the positional prefix is applied
const KNOWN_PREFIXES: &[&str] = &[
    "Introduction to",
    "Fundamentals of",
    "Advanced",
    "Practical Applications of",
    "Theory and Practice of",
    "Deep Dive into",
    "Exploring",
    "Mastering",
];

/// Module structuring stage
#[derive(Debug, Clone, Default)]
pub struct ModuleStructurer;

impl ModuleStructurer {
    pub fn new() -> Self {
        Self
    }

    /// Build the structured outline for a course
    pub fn structure<R: Rng + ?Sized>(
        &self,
        topics: &TopicSet,
        duration: &str,
        requested_modules: Option<u32>,
        rng: &mut R,
    ) -> ModuleStructure {
        let course_type = detect_course_type(&topics.keywords);
        let count = module_count(topics.topics.len(), requested_modules);
        let hours = hours_per_module(duration, count);

        let mut modules = draft_modules(&topics.topics, count, hours);
        apply_title_prefixes(&mut modules, course_type, rng);
        for module in modules.iter_mut() {
            module.description = describe(module);
        }
        sequence_modules(&mut modules);

        let total_hours: u32 = modules.iter().map(|m| m.hours).sum();
        debug!(
            course_type = %course_type,
            modules = modules.len(),
            total_hours,
            "Modules structured"
        );

        ModuleStructure {
            course_type,
            total_modules: modules.len(),
            total_hours,
            modules,
        }
    }
}

/// Number of modules for a topic count and optional request
pub fn module_count(topic_count: usize, requested: Option<u32>) -> usize {
    match requested {
        Some(n) => n.clamp(1, MAX_REQUESTED_MODULES) as usize,
        None => (topic_count / 3).clamp(MIN_DERIVED_MODULES, MAX_DERIVED_MODULES),
    }
}

/// Hours allotted to each of `module_count` modules
pub fn hours_per_module(duration: &str, module_count: usize) -> u32 {
    match duration_weeks(duration) {
        Some(weeks) => {
            let per_module = weeks.saturating_mul(HOURS_PER_WEEK) / module_count.max(1) as u32;
            per_module.clamp(MIN_MODULE_HOURS, MAX_MODULE_HOURS)
        }
        None => DEFAULT_MODULE_HOURS,
    }
}

/// Course type whose indicators match the most keywords
///
/// A keyword matches when it contains any indicator fragment. Ties go to
/// the earlier type in technical, theoretical, practical order.
pub fn detect_course_type(keywords: &[String]) -> CourseType {
    let score = |course_type: CourseType| {
        keywords
            .iter()
            .filter(|kw| {
                let kw = kw.to_lowercase();
                course_type.indicators().iter().any(|ind| kw.contains(ind))
            })
            .count()
    };

    let mut best = CourseType::Technical;
    let mut best_score = score(best);
    for course_type in CourseType::ALL.into_iter().skip(1) {
        let s = score(course_type);
        if s > best_score {
            best = course_type;
            best_score = s;
        }
    }
    best
}

fn draft_modules(topics: &[String], count: usize, hours: u32) -> Vec<Module> {
    let mut clusters: Vec<Vec<String>> = vec![Vec::new(); count];
    for (idx, topic) in topics.iter().enumerate() {
        clusters[idx % count].push(topic.clone());
    }

    let mut modules: Vec<Module> = clusters
        .into_iter()
        .filter(|cluster| !cluster.is_empty())
        .enumerate()
        .map(|(idx, cluster)| Module {
            id: idx as u32 + 1,
            title: draft_title(&cluster),
            description: String::new(),
            subtopics: cluster.iter().take(MAX_SUBTOPICS).cloned().collect(),
            keywords: cluster,
            hours,
            learning_outcomes: Vec::new(),
        })
        .collect();

    while modules.len() < count {
        modules.push(Module {
            id: modules.len() as u32 + 1,
            title: PADDING_TITLE.to_string(),
            description: String::new(),
            subtopics: PADDING_SUBTOPICS.iter().map(|s| s.to_string()).collect(),
            keywords: Vec::new(),
            hours,
            learning_outcomes: Vec::new(),
        });
    }
    modules
}

/// Title from the first topic of a cluster
fn draft_title(cluster: &[String]) -> String {
    match cluster.first() {
        Some(first) if first.split_whitespace().count() == 1 => {
            format!("Introduction to {}", title_case(first))
        }
        Some(first) => title_case(first),
        None => "General Concepts".to_string(),
    }
}

fn middle_prefixes(course_type: CourseType) -> &'static [&'static str] {
    match course_type {
        CourseType::Technical => &["Practical", "Applied", "Implementing"],
        CourseType::Theoretical => &["Theory of", "Principles of", "Understanding"],
        CourseType::Practical => &["Working with", "Hands-on", "Exploring"],
    }
}

/// First module introduces, last module caps the course, the rest get a
/// random course-type prefix
fn apply_title_prefixes<R: Rng + ?Sized>(modules: &mut [Module], course_type: CourseType, rng: &mut R) {
    let last = modules.len().saturating_sub(1);
    for (idx, module) in modules.iter_mut().enumerate() {
        let prefix = if idx == 0 {
            "Introduction to"
        } else if idx == last {
            match course_type {
                CourseType::Theoretical => "Advanced Topics in",
                _ => "Capstone Project:",
            }
        } else {
            middle_prefixes(course_type)
                .choose(rng)
                .copied()
                .unwrap_or("Exploring")
        };

        let mut base = module.title.as_str();
        for known in KNOWN_PREFIXES {
            if let Some(rest) = base.strip_prefix(known) {
                base = rest.trim();
            }
        }
        module.title = format!("{} {}", prefix, base);
    }
}

fn describe(module: &Module) -> String {
    let listed: Vec<&str> = module.subtopics.iter().take(3).map(String::as_str).collect();
    let focus = module.subtopics.first().map(String::as_str).unwrap_or("the module topics");
    format!(
        "This module covers {}, providing a comprehensive understanding of {}.",
        listed.join(", "),
        focus
    )
}

/// First module must read introductory and the last advanced
fn sequence_modules(modules: &mut [Module]) {
    if modules.len() < 3 {
        return;
    }

    if let Some(first) = modules.first_mut() {
        let lower = first.title.to_lowercase();
        if !["introduction", "fundamentals", "basics"].iter().any(|w| lower.contains(w)) {
            first.title = format!("Introduction to {}", first.title);
        }
    }

    if let Some(last) = modules.last_mut() {
        let lower = last.title.to_lowercase();
        if !["advanced", "capstone", "project", "integration"].iter().any(|w| lower.contains(w)) {
            last.title = format!("Advanced {}", last.title);
        }
    }
}
