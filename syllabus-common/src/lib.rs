//! # Syllabus Expander Common Library
//!
//! Shared code for the syllabus expander service and batch tool:
//! - Error type and result alias
//! - Bootstrap configuration loading (TOML)
//! - Bloom's Taxonomy knowledge base (verbs and sentence templates)
//! - Assessment type catalogue and course type detection vocabulary
//! - Seedable random source used by every generator

pub mod bloom;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod rng;

pub use bloom::{BloomLevel, BloomTier};
pub use catalogue::{AssessmentKind, CourseType};
pub use error::{Error, Result};
pub use rng::PipelineRng;
