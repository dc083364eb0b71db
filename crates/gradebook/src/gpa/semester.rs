use super::conversion::ConversionPolicy;
use super::domain::{ComputedCourse, ComputedSemester, Course};
use super::rounding::round_hundredths;
use super::score::compute_average;

/// Credit-weighted semester GPA, converted with the semester table.
pub fn compute_semester_gpa(courses: &[Course]) -> ComputedSemester {
    compute_semester_gpa_with(courses, ConversionPolicy::SemesterTable)
}

/// Credit-weighted semester GPA with an explicit 4-point conversion policy.
///
/// Courses marked `is_gpa = false` are averaged and listed but never enter the totals.
pub fn compute_semester_gpa_with(courses: &[Course], policy: ConversionPolicy) -> ComputedSemester {
    let mut total_weighted_score = 0.0;
    let mut total_credits: u64 = 0;
    let mut processed_courses = Vec::with_capacity(courses.len());

    for course in courses {
        let average_score = compute_average(course);

        if course.counts_toward_gpa() {
            total_weighted_score += average_score * f64::from(course.credit);
            total_credits += u64::from(course.credit);
        }

        processed_courses.push(ComputedCourse {
            course: course.clone(),
            average_score,
        });
    }

    let semester_gpa10 = if total_credits > 0 {
        round_hundredths(total_weighted_score / total_credits as f64)
    } else {
        0.0
    };

    ComputedSemester {
        semester_gpa10,
        semester_gpa4: policy.gpa_to_four(semester_gpa10),
        gpa_credits: total_credits,
        processed_courses,
    }
}
