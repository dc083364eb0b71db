use super::domain::{Course, MAX_SCORE};
use super::rounding::round_tenths;

/// Average score of a course on the 10-point scale.
///
/// Components are summed as `score * weight / 100` in their given order, the
/// bonus is added once, the result is capped at 10 and rounded to one decimal.
/// There is no floor clamp and weights are not required to total 100.
pub fn compute_average(course: &Course) -> f64 {
    if course.components.is_empty() {
        return 0.0;
    }

    let weighted_sum = course
        .components
        .iter()
        .fold(0.0, |sum, component| {
            sum + component.score * component.weight / 100.0
        });

    let capped = (weighted_sum + course.bonus()).min(MAX_SCORE);
    round_tenths(capped)
}
