//! Assessment type catalogue and course type vocabulary
//!
//! The catalogue is fixed: six assessment kinds, each with a description,
//! a delivery format, the Bloom levels it is suited to, and a weight range
//! that depends on the detected course type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::BloomLevel;

/// Course character detected from extracted keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    Technical,
    Theoretical,
    Practical,
}

impl CourseType {
    /// Detection order; earlier entries win ties
    pub const ALL: [CourseType; 3] = [
        CourseType::Technical,
        CourseType::Theoretical,
        CourseType::Practical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CourseType::Technical => "technical",
            CourseType::Theoretical => "theoretical",
            CourseType::Practical => "practical",
        }
    }

    /// Keyword fragments indicating this course type
    pub fn indicators(self) -> &'static [&'static str] {
        match self {
            CourseType::Technical => &[
                "algorithm", "programming", "code", "software", "system", "data", "network",
                "database",
            ],
            CourseType::Theoretical => {
                &["theory", "concept", "principle", "framework", "model", "analysis"]
            }
            CourseType::Practical => &[
                "application", "implementation", "practice", "exercise", "lab", "project",
                "hands-on",
            ],
        }
    }

    /// Target share of course-level outcomes per Bloom level
    ///
    /// Indexed like [`BloomLevel::ALL`]; each row sums to 1.0.
    pub fn bloom_distribution(self) -> [f64; 6] {
        match self {
            CourseType::Technical => [0.10, 0.15, 0.35, 0.25, 0.10, 0.05],
            CourseType::Theoretical => [0.15, 0.30, 0.20, 0.25, 0.10, 0.00],
            CourseType::Practical => [0.05, 0.10, 0.40, 0.25, 0.10, 0.10],
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assessment component kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentKind {
    #[serde(rename = "Pre-Test")]
    PreTest,
    #[serde(rename = "Quizzes")]
    Quizzes,
    #[serde(rename = "Midterm Exam")]
    MidtermExam,
    #[serde(rename = "Labs/Assignments")]
    LabsAssignments,
    #[serde(rename = "Project")]
    Project,
    #[serde(rename = "Final Exam")]
    FinalExam,
}

impl AssessmentKind {
    pub fn name(self) -> &'static str {
        match self {
            AssessmentKind::PreTest => "Pre-Test",
            AssessmentKind::Quizzes => "Quizzes",
            AssessmentKind::MidtermExam => "Midterm Exam",
            AssessmentKind::LabsAssignments => "Labs/Assignments",
            AssessmentKind::Project => "Project",
            AssessmentKind::FinalExam => "Final Exam",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AssessmentKind::PreTest => "Diagnostic assessment to gauge prior knowledge",
            AssessmentKind::Quizzes => "Regular assessments of module comprehension",
            AssessmentKind::MidtermExam => "Comprehensive exam covering first half of course",
            AssessmentKind::LabsAssignments => "Hands-on practical exercises",
            AssessmentKind::Project => "Comprehensive project synthesizing course concepts",
            AssessmentKind::FinalExam => "Comprehensive final assessment",
        }
    }

    pub fn format(self) -> &'static str {
        match self {
            AssessmentKind::PreTest => "Multiple choice, True/False",
            AssessmentKind::Quizzes => "Mixed: MCQ, short answer",
            AssessmentKind::MidtermExam => "Mixed format",
            AssessmentKind::LabsAssignments => "Practical work, problem sets",
            AssessmentKind::Project => "Project deliverable + documentation",
            AssessmentKind::FinalExam => "Comprehensive exam",
        }
    }

    /// Bloom levels this kind of assessment can measure
    pub fn suitable_bloom(self) -> &'static [BloomLevel] {
        use BloomLevel::*;
        match self {
            AssessmentKind::PreTest => &[Remember, Understand],
            AssessmentKind::Quizzes => &[Remember, Understand, Apply],
            AssessmentKind::MidtermExam => &[Understand, Apply, Analyze],
            AssessmentKind::LabsAssignments => &[Apply, Analyze],
            AssessmentKind::Project => &[Analyze, Evaluate, Create],
            AssessmentKind::FinalExam => &BloomLevel::ALL,
        }
    }

    /// Inclusive weight range (percent) for this kind in a course of the given type
    pub fn weight_range(self, course_type: CourseType) -> (u32, u32) {
        match (course_type, self) {
            (CourseType::Technical, AssessmentKind::PreTest) => (0, 10),
            (CourseType::Technical, AssessmentKind::Quizzes) => (15, 25),
            (CourseType::Technical, AssessmentKind::MidtermExam) => (15, 20),
            (CourseType::Technical, AssessmentKind::LabsAssignments) => (30, 40),
            (CourseType::Technical, AssessmentKind::Project) => (15, 25),
            (CourseType::Technical, AssessmentKind::FinalExam) => (10, 20),

            (CourseType::Theoretical, AssessmentKind::PreTest) => (5, 10),
            (CourseType::Theoretical, AssessmentKind::Quizzes) => (20, 30),
            (CourseType::Theoretical, AssessmentKind::MidtermExam) => (20, 30),
            (CourseType::Theoretical, AssessmentKind::LabsAssignments) => (10, 20),
            (CourseType::Theoretical, AssessmentKind::Project) => (10, 15),
            (CourseType::Theoretical, AssessmentKind::FinalExam) => (20, 30),

            (CourseType::Practical, AssessmentKind::PreTest) => (0, 5),
            (CourseType::Practical, AssessmentKind::Quizzes) => (10, 20),
            (CourseType::Practical, AssessmentKind::MidtermExam) => (10, 15),
            (CourseType::Practical, AssessmentKind::LabsAssignments) => (35, 45),
            (CourseType::Practical, AssessmentKind::Project) => (20, 30),
            (CourseType::Practical, AssessmentKind::FinalExam) => (10, 15),
        }
    }

    /// Formative, spread-through-the-term assessment
    pub fn is_continuous(self) -> bool {
        matches!(self, AssessmentKind::Quizzes | AssessmentKind::LabsAssignments)
    }

    /// Single sitting exam carrying a large share of the grade
    pub fn is_high_stakes(self) -> bool {
        matches!(self, AssessmentKind::MidtermExam | AssessmentKind::FinalExam)
    }

    pub fn is_exam(self) -> bool {
        self.name().contains("Exam")
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distributions_sum_to_one() {
        for course_type in CourseType::ALL {
            let sum: f64 = course_type.bloom_distribution().iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{} sums to {}", course_type, sum);
        }
    }

    #[test]
    fn test_weight_ranges_are_ordered() {
        let kinds = [
            AssessmentKind::PreTest,
            AssessmentKind::Quizzes,
            AssessmentKind::MidtermExam,
            AssessmentKind::LabsAssignments,
            AssessmentKind::Project,
            AssessmentKind::FinalExam,
        ];
        for course_type in CourseType::ALL {
            for kind in kinds {
                let (min, max) = kind.weight_range(course_type);
                assert!(min <= max, "{} / {}", course_type, kind);
                assert!(max <= 100);
            }
        }
    }

    #[test]
    fn test_final_exam_covers_every_level() {
        assert_eq!(AssessmentKind::FinalExam.suitable_bloom(), &BloomLevel::ALL);
    }

    #[test]
    fn test_kind_serializes_to_display_name() {
        let json = serde_json::to_string(&AssessmentKind::LabsAssignments).unwrap();
        assert_eq!(json, "\"Labs/Assignments\"");
        let course = serde_json::to_string(&CourseType::Practical).unwrap();
        assert_eq!(course, "\"practical\"");
    }

    #[test]
    fn test_kind_groupings() {
        assert!(AssessmentKind::Quizzes.is_continuous());
        assert!(AssessmentKind::FinalExam.is_high_stakes());
        assert!(AssessmentKind::MidtermExam.is_exam());
        assert!(!AssessmentKind::Project.is_exam());
    }
}
