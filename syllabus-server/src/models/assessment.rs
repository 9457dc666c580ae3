//! Assessment blueprint records
//!
//! A blueprint is a list of weighted assessment components. The weights of a
//! blueprint always sum to exactly 100; [`AssessmentBlueprint::new`] refuses
//! to build one that doesn't.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use syllabus_common::{AssessmentKind, BloomLevel, Error, Result};

/// Total weight every blueprint must carry
pub const TOTAL_WEIGHT: u32 = 100;

/// One weighted assessment in the blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentComponent {
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    /// Percentage of the final grade, 0-100
    pub weight: u32,
    pub description: String,
    pub timing: String,
    pub format: String,
    /// Course outcome ids (`CLO-{n}`), at most four
    #[serde(rename = "linkedLOs")]
    pub linked_los: Vec<String>,
    /// Module outcome keys (`M{id}-LO{n}`), at most six
    #[serde(rename = "linkedModuleLOs")]
    pub linked_module_los: Vec<String>,
    pub bloom_levels: Vec<BloomLevel>,
}

impl AssessmentComponent {
    /// Whether this component measures the given Bloom level
    pub fn assesses(&self, level: BloomLevel) -> bool {
        self.bloom_levels.contains(&level)
    }
}

/// Complete assessment blueprint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentBlueprint {
    total_weight: u32,
    components: Vec<AssessmentComponent>,
    grading_scale: BTreeMap<String, String>,
    recommendations: Vec<String>,
}

impl AssessmentBlueprint {
    /// Build a blueprint, rejecting component weights that don't sum to 100
    pub fn new(components: Vec<AssessmentComponent>, recommendations: Vec<String>) -> Result<Self> {
        if components.is_empty() {
            return Err(Error::Invariant("Blueprint has no components".to_string()));
        }

        let total: u32 = components.iter().map(|c| c.weight).sum();
        if total != TOTAL_WEIGHT {
            return Err(Error::Invariant(format!(
                "Blueprint weights sum to {}, expected {}",
                total, TOTAL_WEIGHT
            )));
        }

        Ok(Self {
            total_weight: total,
            components,
            grading_scale: default_grading_scale(),
            recommendations,
        })
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Components, heaviest first
    pub fn components(&self) -> &[AssessmentComponent] {
        &self.components
    }

    pub fn grading_scale(&self) -> &BTreeMap<String, String> {
        &self.grading_scale
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    /// Component of the given kind, if selected
    pub fn component(&self, kind: AssessmentKind) -> Option<&AssessmentComponent> {
        self.components.iter().find(|c| c.kind == kind)
    }

    /// Summed weight of the components matching `predicate`
    pub fn weight_where<F>(&self, predicate: F) -> u32
    where
        F: Fn(AssessmentKind) -> bool,
    {
        self.components
            .iter()
            .filter(|c| predicate(c.kind))
            .map(|c| c.weight)
            .sum()
    }
}

/// Letter grade bands
fn default_grading_scale() -> BTreeMap<String, String> {
    [
        ("A", "90-100%"),
        ("B", "80-89%"),
        ("C", "70-79%"),
        ("D", "60-69%"),
        ("F", "Below 60%"),
    ]
    .into_iter()
    .map(|(grade, band)| (grade.to_string(), band.to_string()))
    .collect()
}
