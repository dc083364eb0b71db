use serde::{Deserialize, Serialize};

/// Upper bound of the 10-point scale.
pub const MAX_SCORE: f64 = 10.0;

/// One graded piece of a course (midterm, lab, final exam).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeComponent {
    /// Score on the 10-point scale.
    pub score: f64,
    /// Share of the course total, in percent.
    pub weight: f64,
}

impl GradeComponent {
    pub fn new(score: f64, weight: f64) -> Self {
        Self { score, weight }
    }
}

/// Course snapshot handed to the engine.
///
/// `bonus` and `is_gpa` are optional in stored data; use [`Course::bonus`] and
/// [`Course::counts_toward_gpa`] to read them with their defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub credit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_gpa: Option<bool>,
    #[serde(default)]
    pub components: Vec<GradeComponent>,
}

impl Course {
    pub fn new(credit: u32, components: Vec<GradeComponent>) -> Self {
        Self {
            credit,
            bonus: None,
            is_gpa: None,
            components,
        }
    }

    pub fn with_bonus(mut self, bonus: f64) -> Self {
        self.bonus = Some(bonus);
        self
    }

    pub fn excluded_from_gpa(mut self) -> Self {
        self.is_gpa = Some(false);
        self
    }

    /// Additive adjustment applied once per course; `0` when absent.
    pub fn bonus(&self) -> f64 {
        self.bonus.unwrap_or(0.0)
    }

    /// Only an explicit `false` removes a course from the GPA totals.
    pub fn counts_toward_gpa(&self) -> bool {
        self.is_gpa != Some(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Semester {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }
}

/// A course together with its computed average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedCourse {
    #[serde(flatten)]
    pub course: Course,
    pub average_score: f64,
}

/// Semester-level aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedSemester {
    pub semester_gpa10: f64,
    pub semester_gpa4: f64,
    /// Credits that entered the weighted average (courses with `is_gpa` not `false`).
    pub gpa_credits: u64,
    pub processed_courses: Vec<ComputedCourse>,
}

impl ComputedSemester {
    pub fn empty() -> Self {
        Self {
            semester_gpa10: 0.0,
            semester_gpa4: 0.0,
            gpa_credits: 0,
            processed_courses: Vec::new(),
        }
    }
}
