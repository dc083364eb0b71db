//! Opt-in input checks for [`InputMode::Strict`](super::InputMode::Strict).
//!
//! The arithmetic itself never rejects input; these checks only report values
//! that would make the aggregates meaningless.

use super::domain::{Course, MAX_SCORE};
use serde::Serialize;

/// A single contract violation. Positions are zero-based.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputViolation {
    #[error("course {course}: credit must be positive")]
    NonPositiveCredit { course: usize },
    #[error("course {course}: bonus {bonus} is negative")]
    NegativeBonus { course: usize, bonus: f64 },
    #[error("course {course}, component {component}: weight {weight} is negative")]
    NegativeWeight {
        course: usize,
        component: usize,
        weight: f64,
    },
    #[error("course {course}, component {component}: score {score} is outside 0-10")]
    ScoreOutOfRange {
        course: usize,
        component: usize,
        score: f64,
    },
}

/// Raised by the engine in strict mode when any violation is found.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeInputError {
    #[error("invalid grade input: {}", summarize(.0))]
    InvalidInput(Vec<InputViolation>),
}

impl GradeInputError {
    pub fn violations(&self) -> &[InputViolation] {
        match self {
            GradeInputError::InvalidInput(violations) => violations,
        }
    }
}

fn summarize(violations: &[InputViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn validate_course(position: usize, course: &Course) -> Vec<InputViolation> {
    let mut violations = Vec::new();

    if course.credit == 0 {
        violations.push(InputViolation::NonPositiveCredit { course: position });
    }

    if let Some(bonus) = course.bonus.filter(|bonus| *bonus < 0.0) {
        violations.push(InputViolation::NegativeBonus {
            course: position,
            bonus,
        });
    }

    for (index, component) in course.components.iter().enumerate() {
        if component.weight < 0.0 {
            violations.push(InputViolation::NegativeWeight {
                course: position,
                component: index,
                weight: component.weight,
            });
        }
        if !(0.0..=MAX_SCORE).contains(&component.score) {
            violations.push(InputViolation::ScoreOutOfRange {
                course: position,
                component: index,
                score: component.score,
            });
        }
    }

    violations
}

pub fn validate_semester(courses: &[Course]) -> Vec<InputViolation> {
    courses
        .iter()
        .enumerate()
        .flat_map(|(position, course)| validate_course(position, course))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::domain::GradeComponent;

    #[test]
    fn well_formed_course_has_no_violations() {
        let course = Course::new(3, vec![GradeComponent::new(8.0, 100.0)]).with_bonus(0.5);
        assert!(validate_course(0, &course).is_empty());
    }

    #[test]
    fn reports_every_violation_with_positions() {
        let courses = [
            Course::new(3, vec![GradeComponent::new(7.0, 100.0)]),
            Course::new(
                0,
                vec![
                    GradeComponent::new(11.0, 50.0),
                    GradeComponent::new(5.0, -10.0),
                ],
            )
            .with_bonus(-1.0),
        ];

        let violations = validate_semester(&courses);

        assert_eq!(
            violations,
            vec![
                InputViolation::NonPositiveCredit { course: 1 },
                InputViolation::NegativeBonus {
                    course: 1,
                    bonus: -1.0
                },
                InputViolation::ScoreOutOfRange {
                    course: 1,
                    component: 0,
                    score: 11.0
                },
                InputViolation::NegativeWeight {
                    course: 1,
                    component: 1,
                    weight: -10.0
                },
            ]
        );
    }

    #[test]
    fn nan_scores_are_out_of_range() {
        let course = Course::new(3, vec![GradeComponent::new(f64::NAN, 100.0)]);
        assert!(matches!(
            validate_course(2, &course).as_slice(),
            [InputViolation::ScoreOutOfRange { course: 2, component: 0, .. }]
        ));
    }

    #[test]
    fn error_message_lists_violations() {
        let error = GradeInputError::InvalidInput(vec![InputViolation::NonPositiveCredit {
            course: 4,
        }]);
        assert_eq!(
            error.to_string(),
            "invalid grade input: course 4: credit must be positive"
        );
        assert_eq!(error.violations().len(), 1);
    }
}
