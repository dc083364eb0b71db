use gradebook::gpa::{
    compute_average, compute_cumulative_gpa, compute_semester_gpa, compute_semester_gpa_with,
    ConversionPolicy, Course, GpaEngine, GradeComponent, InputMode, InputViolation, Semester,
};

fn graded(credit: u32, score: f64) -> Course {
    Course::new(credit, vec![GradeComponent::new(score, 100.0)])
}

#[test]
fn weighted_components_average_to_seven_point_six() {
    let course = Course::new(
        3,
        vec![GradeComponent::new(8.0, 60.0), GradeComponent::new(7.0, 40.0)],
    )
    .with_bonus(0.0);

    assert_eq!(compute_average(&course), 7.6);
}

#[test]
fn overweighted_course_with_bonus_caps_at_ten() {
    let course = Course::new(
        4,
        vec![GradeComponent::new(9.0, 50.0), GradeComponent::new(9.0, 60.0)],
    )
    .with_bonus(0.5);

    assert_eq!(compute_average(&course), 10.0);
}

#[test]
fn credit_weighted_semester_gpa() {
    let semester = compute_semester_gpa(&[graded(3, 7.6), graded(4, 8.2)]);

    assert_eq!(semester.semester_gpa10, 7.94);
    assert_eq!(semester.semester_gpa4, 3.0);
    assert_eq!(semester.gpa_credits, 7);
}

#[test]
fn cumulative_is_mean_of_semester_gpas() {
    let first = compute_semester_gpa(&[graded(3, 7.6), graded(4, 8.2)]);
    let second = compute_semester_gpa(&[graded(3, 8.5)]);
    assert_eq!(second.semester_gpa10, 8.5);

    assert_eq!(compute_cumulative_gpa(&[first, second]), 8.22);
}

#[test]
fn engine_reproduces_the_full_pipeline() {
    let semesters = vec![
        Semester::new(vec![
            Course::new(
                3,
                vec![GradeComponent::new(8.0, 60.0), GradeComponent::new(7.0, 40.0)],
            ),
            graded(4, 8.2),
        ]),
        Semester::new(vec![graded(3, 8.5), graded(2, 3.0).excluded_from_gpa()]),
    ];

    let (computed, cumulative) = GpaEngine::default()
        .cumulative(&semesters)
        .expect("permissive engine accepts input");

    assert_eq!(computed[0].semester_gpa10, 7.94);
    assert_eq!(computed[1].semester_gpa10, 8.5);
    assert_eq!(computed[1].processed_courses.len(), 2);
    assert_eq!(cumulative, 8.22);
}

#[test]
fn same_gpa_converts_differently_per_policy() {
    let courses = [graded(3, 8.7)];

    let standard = compute_semester_gpa_with(&courses, ConversionPolicy::StandardTable);
    let semester = compute_semester_gpa_with(&courses, ConversionPolicy::SemesterTable);
    let linear = compute_semester_gpa_with(&courses, ConversionPolicy::Linear);

    assert_eq!(standard.semester_gpa4, 4.0);
    assert_eq!(semester.semester_gpa4, 3.7);
    assert_eq!(linear.semester_gpa4, 3.48);
}

#[test]
fn strict_engine_lists_every_violation() {
    let engine = GpaEngine::new(ConversionPolicy::SemesterTable, InputMode::Strict);
    let courses = vec![
        Course::new(0, vec![GradeComponent::new(11.0, 100.0)]),
        Course::new(3, vec![GradeComponent::new(8.0, -10.0)]).with_bonus(-1.0),
    ];

    let err = engine.semester(&courses).expect_err("strict mode rejects");
    let violations = err.violations();

    assert_eq!(violations.len(), 4);
    assert!(violations
        .iter()
        .any(|v| matches!(v, InputViolation::NonPositiveCredit { course: 0 })));
    assert!(violations
        .iter()
        .any(|v| matches!(v, InputViolation::NegativeBonus { course: 1, .. })));

    let permissive = GpaEngine::default().semester(&courses).expect("permissive");
    assert_eq!(permissive.gpa_credits, 3);
}
