//! Pure GPA arithmetic: course averages, semester GPA on both scales and the
//! cumulative figure. Nothing in here performs I/O or reads ambient state.

pub mod conversion;
pub mod cumulative;
pub mod domain;
mod rounding;
pub mod score;
pub mod semester;
pub mod validation;

pub use conversion::{
    linear_to_four, linear_to_ten, semester_table_to_four, semester_table_to_ten, table_to_four,
    table_to_ten, ConversionPolicy, GradeBand, ParsePolicyError, TenPointEquivalent,
};
pub use cumulative::{compute_cumulative_gpa, total_credits};
pub use domain::{ComputedCourse, ComputedSemester, Course, GradeComponent, Semester, MAX_SCORE};
pub use score::compute_average;
pub use semester::{compute_semester_gpa, compute_semester_gpa_with};
pub use validation::{GradeInputError, InputViolation};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Whether out-of-contract input is computed as-is or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Permissive,
    Strict,
}

impl InputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Permissive => "permissive",
            InputMode::Strict => "strict",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "permissive" | "lenient" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown input mode '{other}'")),
        }
    }
}

/// Stateless engine carrying the caller's conversion policy and input mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpaEngine {
    policy: ConversionPolicy,
    mode: InputMode,
}

impl GpaEngine {
    pub fn new(policy: ConversionPolicy, mode: InputMode) -> Self {
        Self { policy, mode }
    }

    pub fn policy(&self) -> ConversionPolicy {
        self.policy
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn with_policy(self, policy: ConversionPolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn course_average(&self, course: &Course) -> Result<f64, GradeInputError> {
        self.check(std::slice::from_ref(course))?;
        Ok(compute_average(course))
    }

    pub fn semester(&self, courses: &[Course]) -> Result<ComputedSemester, GradeInputError> {
        self.check(courses)?;
        Ok(compute_semester_gpa_with(courses, self.policy))
    }

    /// Computes every semester, then the cumulative GPA over them.
    pub fn cumulative(
        &self,
        semesters: &[Semester],
    ) -> Result<(Vec<ComputedSemester>, f64), GradeInputError> {
        let computed = semesters
            .iter()
            .map(|semester| self.semester(&semester.courses))
            .collect::<Result<Vec<_>, _>>()?;
        let cumulative = compute_cumulative_gpa(&computed);
        Ok((computed, cumulative))
    }

    fn check(&self, courses: &[Course]) -> Result<(), GradeInputError> {
        if self.mode == InputMode::Permissive {
            return Ok(());
        }

        let violations = validation::validate_semester(courses);
        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "rejecting out-of-contract grade input");
            Err(GradeInputError::InvalidInput(violations))
        }
    }
}
