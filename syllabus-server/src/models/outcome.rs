//! Course-level outcomes and Bloom distribution statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use syllabus_common::{BloomLevel, BloomTier};

/// Course-level learning outcome (CLO)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutcome {
    /// `CLO-{n}`, 1-based
    pub id: String,
    pub outcome: String,
    pub bloom_level: BloomLevel,
    pub bloom_tier: BloomTier,
    /// Ids of modules this outcome is delivered by, populated after module outcomes exist
    pub mapped_modules: Vec<u32>,
}

/// Outcome counts per Bloom level for one outcome population
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelBreakdown {
    /// Count for every level, including zero counts
    pub counts: BTreeMap<BloomLevel, usize>,
    /// Share of the total (one decimal); empty when there are no outcomes
    pub percentages: BTreeMap<BloomLevel, f64>,
    pub total: usize,
}

impl LevelBreakdown {
    pub fn from_levels<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = BloomLevel>,
    {
        let mut counts: BTreeMap<BloomLevel, usize> =
            BloomLevel::ALL.iter().map(|level| (*level, 0)).collect();
        let mut total = 0;
        for level in levels {
            *counts.entry(level).or_insert(0) += 1;
            total += 1;
        }

        let percentages = if total > 0 {
            counts
                .iter()
                .map(|(level, count)| {
                    (*level, syllabus_common::rng::round1(*count as f64 / total as f64 * 100.0))
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        Self {
            counts,
            percentages,
            total,
        }
    }

    /// Percentage for a level, 0 when absent
    pub fn percentage(&self, level: BloomLevel) -> f64 {
        self.percentages.get(&level).copied().unwrap_or(0.0)
    }

    /// Levels with at least one outcome, lowest first
    pub fn present_levels(&self) -> impl Iterator<Item = BloomLevel> + '_ {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(level, _)| *level)
    }
}

/// Bloom distribution of module-level and course-level outcomes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloomStatistics {
    pub module_level: LevelBreakdown,
    pub course_level: LevelBreakdown,
}
