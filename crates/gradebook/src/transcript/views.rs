use crate::gpa::ConversionPolicy;
use crate::records::{CourseId, SemesterId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseView {
    pub id: CourseId,
    pub name: String,
    pub credit: u32,
    pub bonus: f64,
    pub counts_toward_gpa: bool,
    pub component_count: usize,
    pub average_score: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterSummaryView {
    pub id: SemesterId,
    pub name: String,
    pub index_order: i32,
    pub semester_gpa10: f64,
    pub semester_gpa4: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_grade: Option<&'static str>,
    pub total_credits: u64,
    pub gpa_credits: u64,
    pub courses: Vec<CourseView>,
}

/// One point of the GPA trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub name: String,
    pub gpa10: f64,
    pub gpa4: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptReport {
    pub policy: ConversionPolicy,
    pub semesters: Vec<SemesterSummaryView>,
    pub cumulative_gpa10: f64,
    pub cumulative_gpa4: f64,
    pub total_credits: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_semester_gpa10: Option<f64>,
}
