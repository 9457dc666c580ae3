//! Seedable random source
//!
//! Every generator takes its randomness from an explicitly passed `Rng`.
//! Production requests draw from entropy; tests and pinned configurations
//! seed it so a run can be reproduced exactly.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random source type used by the pipeline
pub type PipelineRng = StdRng;

/// Create the random source for one pipeline run
///
/// `Some(seed)` gives a deterministic sequence; `None` seeds from OS entropy.
pub fn pipeline_rng(seed: Option<u64>) -> PipelineRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Round half to even, matching the rounding used for percentage arithmetic
pub fn round_half_even(value: f64) -> f64 {
    let rounded = value.round();
    if (value - value.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded - value.signum()
    } else {
        rounded
    }
}

/// Round to one decimal place for reported percentages and scores
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
