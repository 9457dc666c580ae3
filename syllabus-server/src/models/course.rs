//! Course specification as submitted by clients
//!
//! [`ProcessRequest`] mirrors the JSON body of `POST /api/process` (and each
//! entry of a batch input file). Every field is optional at the serde level
//! so that a missing field is reported as a 400 with a readable message
//! rather than a deserialization failure. [`ProcessRequest::into_spec`]
//! performs the validation and yields a [`CourseSpec`] the pipeline accepts.

use serde::{Deserialize, Serialize};
use syllabus_common::{Error, Result};

/// Course duration as sent by clients: `"12 weeks"` or a bare `12`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Weeks(u64),
    Text(String),
}

impl DurationInput {
    /// Normalized duration text
    pub fn to_text(&self) -> String {
        match self {
            DurationInput::Weeks(weeks) => format!("{} weeks", weeks),
            DurationInput::Text(text) => text.trim().to_string(),
        }
    }
}

/// Raw request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    #[serde(default, alias = "title")]
    pub course_title: Option<String>,
    #[serde(default, alias = "description")]
    pub course_description: Option<String>,
    #[serde(default, alias = "scope")]
    pub course_scope: Option<String>,
    #[serde(default)]
    pub duration: Option<DurationInput>,
    #[serde(default)]
    pub num_modules: Option<u32>,
    #[serde(default)]
    pub outcomes_per_topic: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Validated course specification
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSpec {
    pub title: String,
    pub description: String,
    pub scope: String,
    pub duration: String,
    pub num_modules: Option<u32>,
    pub outcomes_per_topic: Option<u32>,
    pub seed: Option<u64>,
}

impl ProcessRequest {
    /// Validate required fields
    ///
    /// Every missing or blank field is listed in a single error message.
    pub fn into_spec(self) -> Result<CourseSpec> {
        let mut missing = Vec::new();

        let title = required(self.course_title, "course_title", &mut missing);
        let description = required(self.course_description, "course_description", &mut missing);
        let scope = required(self.course_scope, "course_scope", &mut missing);
        let duration = match self.duration.map(|d| d.to_text()) {
            Some(text) if !text.is_empty() => text,
            _ => {
                missing.push("duration");
                String::new()
            }
        };

        if !missing.is_empty() {
            return Err(Error::InvalidInput(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        if self.num_modules == Some(0) {
            return Err(Error::InvalidInput("num_modules must be at least 1".to_string()));
        }

        Ok(CourseSpec {
            title,
            description,
            scope,
            duration,
            num_modules: self.num_modules,
            outcomes_per_topic: self.outcomes_per_topic,
            seed: self.seed,
        })
    }
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}
