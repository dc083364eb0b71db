use chrono::{TimeZone, Utc};
use gradebook::gpa::{ConversionPolicy, GpaEngine, InputMode};
use gradebook::import::{TranscriptImportError, TranscriptImporter};
use gradebook::records::UserId;
use gradebook::transcript::TranscriptReport;

fn import_sample() -> Vec<gradebook::records::SemesterRecord> {
    let data = include_bytes!("../sample_transcript.csv");
    let imported_at = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
    TranscriptImporter::from_reader(&data[..], &UserId::new("student-42"), imported_at)
        .expect("sample transcript imports")
}

#[test]
fn importer_groups_rows_into_semesters_and_courses() {
    let semesters = import_sample();

    assert_eq!(semesters.len(), 3);
    let names: Vec<_> = semesters.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Fall 2023", "Spring 2024", "Fall 2024"]);

    let fall = &semesters[0];
    assert_eq!(fall.id.as_str(), "sem-001");
    assert_eq!(fall.courses.len(), 3);
    assert_eq!(fall.courses[1].name, "Introduction to Programming");
    assert_eq!(fall.courses[1].bonus, Some(0.5));
    assert_eq!(fall.courses[1].components.len(), 3);
    assert_eq!(fall.courses[2].is_gpa, Some(false));

    let seminar = &semesters[2].courses[1];
    assert_eq!(seminar.id.as_str(), "crs-003-02");
    assert!(seminar.components.is_empty());
    assert!(semesters
        .iter()
        .all(|semester| semester.user_id.as_str() == "student-42"));
}

#[test]
fn imported_transcript_produces_expected_gpas() {
    let semesters = import_sample();
    let report = TranscriptReport::build(&semesters, &GpaEngine::default()).expect("report");

    let gpas: Vec<_> = report
        .semesters
        .iter()
        .map(|semester| (semester.semester_gpa10, semester.semester_gpa4))
        .collect();
    assert_eq!(gpas, vec![(8.37, 3.5), (7.53, 3.0), (6.8, 2.5)]);

    let fall = &report.semesters[0];
    assert_eq!(fall.total_credits, 8);
    assert_eq!(fall.gpa_credits, 7);
    assert_eq!(fall.courses[0].average_score, 7.8);
    assert_eq!(fall.courses[1].average_score, 8.8);

    assert_eq!(report.cumulative_gpa10, 7.57);
    assert_eq!(report.cumulative_gpa4, 3.0);
    assert_eq!(report.total_credits, 22);
    assert_eq!(report.latest_semester_gpa10, Some(6.8));
}

#[test]
fn linear_policy_changes_only_the_four_point_figures() {
    let semesters = import_sample();
    let table = TranscriptReport::build(&semesters, &GpaEngine::default()).expect("report");
    let linear = TranscriptReport::build(
        &semesters,
        &GpaEngine::new(ConversionPolicy::Linear, InputMode::Permissive),
    )
    .expect("report");

    assert_eq!(table.cumulative_gpa10, linear.cumulative_gpa10);
    assert_eq!(linear.semesters[0].semester_gpa4, 3.35);
    assert!(linear.semesters[0].letter_grade.is_none());
}

#[test]
fn importer_reports_line_numbers_for_bad_rows() {
    let csv = "Semester,Order,Course,Credit,Bonus,Counts Toward GPA,Component,Weight,Score\n\
Fall,0,Calculus,3,,,Midterm,40,7\n\
Fall,0,Physics,three,,,Exam,100,8\n";

    let err = TranscriptImporter::from_reader(csv.as_bytes(), &UserId::new("u"), Utc::now())
        .expect_err("credit must be numeric");

    match err {
        TranscriptImportError::InvalidRow { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn importer_is_deterministic() {
    assert_eq!(import_sample(), import_sample());
}
