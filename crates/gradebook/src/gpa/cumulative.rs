use super::domain::{ComputedSemester, Semester};
use super::rounding::round_hundredths;

/// Cumulative GPA on the 10-point scale.
///
/// This is the plain mean of each semester's GPA, not a credit-weighted
/// aggregate across semesters: a 12-credit semester counts as much as a
/// 20-credit one. Semesters with no GPA credits contribute their `0`.
pub fn compute_cumulative_gpa(semesters: &[ComputedSemester]) -> f64 {
    if semesters.is_empty() {
        return 0.0;
    }

    let sum = semesters
        .iter()
        .fold(0.0, |sum, semester| sum + semester.semester_gpa10);
    round_hundredths(sum / semesters.len() as f64)
}

/// Every course credit across all semesters, GPA-excluded courses included.
pub fn total_credits(semesters: &[Semester]) -> u64 {
    semesters
        .iter()
        .flat_map(|semester| semester.courses.iter())
        .map(|course| u64::from(course.credit))
        .sum()
}
