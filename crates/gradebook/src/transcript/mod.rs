//! Dashboard-style transcript built on top of the GPA engine.

pub mod views;

pub use views::{CourseView, SemesterSummaryView, TranscriptReport, TrendPoint};

use crate::gpa::{
    compute_cumulative_gpa, total_credits, ComputedSemester, GpaEngine, GradeInputError, Semester,
};
use crate::records::SemesterRecord;
use tracing::debug;

/// Averages at or above this mark count as a pass.
pub const PASSING_SCORE: f64 = 5.0;

impl TranscriptReport {
    /// Computes every semester in `index_order` and folds them into the cumulative figures.
    pub fn build(records: &[SemesterRecord], engine: &GpaEngine) -> Result<Self, GradeInputError> {
        let mut ordered: Vec<&SemesterRecord> = records.iter().collect();
        ordered.sort_by_key(|record| record.index_order);

        let mut computed = Vec::with_capacity(ordered.len());
        let mut snapshots = Vec::with_capacity(ordered.len());
        let mut semesters = Vec::with_capacity(ordered.len());

        for record in ordered {
            let snapshot = record.to_semester();
            let result = engine.semester(&snapshot.courses)?;
            debug!(
                semester = %record.id,
                gpa10 = result.semester_gpa10,
                gpa4 = result.semester_gpa4,
                "computed semester gpa"
            );

            semesters.push(summarize(record, &result, engine));
            snapshots.push(snapshot);
            computed.push(result);
        }

        let cumulative_gpa10 = compute_cumulative_gpa(&computed);

        Ok(Self {
            policy: engine.policy(),
            cumulative_gpa10,
            cumulative_gpa4: engine.policy().gpa_to_four(cumulative_gpa10),
            total_credits: total_credits(&snapshots),
            latest_semester_gpa10: computed.last().map(|semester| semester.semester_gpa10),
            semesters,
        })
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        self.semesters
            .iter()
            .map(|semester| TrendPoint {
                name: semester.name.clone(),
                gpa10: semester.semester_gpa10,
                gpa4: semester.semester_gpa4,
            })
            .collect()
    }
}

/// Summary view for a single semester, outside of a full transcript.
pub fn semester_summary(
    record: &SemesterRecord,
    engine: &GpaEngine,
) -> Result<SemesterSummaryView, GradeInputError> {
    let snapshot: Semester = record.to_semester();
    let result = engine.semester(&snapshot.courses)?;
    Ok(summarize(record, &result, engine))
}

fn summarize(
    record: &SemesterRecord,
    result: &ComputedSemester,
    engine: &GpaEngine,
) -> SemesterSummaryView {
    // The engine returns one computed entry per input course, in input order.
    debug_assert_eq!(record.courses.len(), result.processed_courses.len());
    let courses = record
        .courses
        .iter()
        .zip(&result.processed_courses)
        .map(|(course, computed)| CourseView {
            id: course.id.clone(),
            name: course.name.clone(),
            credit: course.credit,
            bonus: computed.course.bonus(),
            counts_toward_gpa: computed.course.counts_toward_gpa(),
            component_count: course.components.len(),
            average_score: computed.average_score,
            passed: computed.average_score >= PASSING_SCORE,
        })
        .collect();

    SemesterSummaryView {
        id: record.id.clone(),
        name: record.name.clone(),
        index_order: record.index_order,
        semester_gpa10: result.semester_gpa10,
        semester_gpa4: result.semester_gpa4,
        letter_grade: engine.policy().letter_grade(result.semester_gpa10),
        total_credits: record.total_credits(),
        gpa_credits: result.gpa_credits,
        courses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::{ConversionPolicy, InputMode};
    use crate::records::{
        ComponentId, ComponentRecord, CourseId, CourseRecord, SemesterId, UserId,
    };
    use chrono::{TimeZone, Utc};

    fn course(semester: &str, id: &str, credit: u32, score: f64) -> CourseRecord {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap();
        CourseRecord {
            id: CourseId::new(id),
            semester_id: SemesterId::new(semester),
            user_id: UserId::new("student-1"),
            name: format!("Course {id}"),
            credit,
            bonus: None,
            is_gpa: None,
            created_at,
            components: vec![ComponentRecord {
                id: ComponentId::new(format!("{id}-final")),
                course_id: CourseId::new(id),
                name: "Final".to_string(),
                weight: 100.0,
                score,
                created_at,
            }],
        }
    }

    fn semester(id: &str, index_order: i32, courses: Vec<CourseRecord>) -> SemesterRecord {
        SemesterRecord {
            id: SemesterId::new(id),
            user_id: UserId::new("student-1"),
            name: format!("Semester {id}"),
            index_order,
            created_at: Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap(),
            courses,
        }
    }

    fn records() -> Vec<SemesterRecord> {
        let mut physical_education = course("s2", "pe", 2, 4.0);
        physical_education.is_gpa = Some(false);
        vec![
            semester("s2", 1, vec![course("s2", "c3", 3, 8.5), physical_education]),
            semester("s1", 0, vec![course("s1", "c1", 3, 7.6), course("s1", "c2", 4, 8.2)]),
        ]
    }

    #[test]
    fn orders_semesters_and_aggregates() {
        let report = TranscriptReport::build(&records(), &GpaEngine::default()).expect("builds");

        let names: Vec<_> = report.semesters.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(names, vec!["s1", "s2"]);
        assert_eq!(report.semesters[0].semester_gpa10, 7.94);
        assert_eq!(report.semesters[1].semester_gpa10, 8.5);
        assert_eq!(report.semesters[1].semester_gpa4, 3.7);
        assert_eq!(report.semesters[1].letter_grade, Some("A"));
        assert_eq!(report.cumulative_gpa10, 8.22);
        assert_eq!(report.cumulative_gpa4, 3.5);
        assert_eq!(report.total_credits, 12);
        assert_eq!(report.latest_semester_gpa10, Some(8.5));
    }

    #[test]
    fn course_views_flag_exclusions_and_passes() {
        let report = TranscriptReport::build(&records(), &GpaEngine::default()).expect("builds");
        let pe = &report.semesters[1].courses[1];

        assert!(!pe.counts_toward_gpa);
        assert!(!pe.passed);
        assert_eq!(report.semesters[1].gpa_credits, 3);
        assert_eq!(report.semesters[1].total_credits, 5);
    }

    #[test]
    fn every_course_gets_a_view_in_record_order() {
        let mut excluded = course("s3", "x", u32::MAX, 2.0);
        excluded.is_gpa = Some(false);
        let record = semester(
            "s3",
            2,
            vec![course("s3", "a", u32::MAX, 9.0), excluded, course("s3", "b", 0, 5.0)],
        );

        let view = semester_summary(&record, &GpaEngine::default()).expect("summarizes");
        let ids: Vec<_> = view.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "x", "b"]);
        assert_eq!(view.courses[1].average_score, 2.0);
        assert_eq!(view.total_credits, 2 * u64::from(u32::MAX));
        assert_eq!(view.gpa_credits, u64::from(u32::MAX));
        assert_eq!(view.semester_gpa10, 9.0);
    }

    #[test]
    fn trend_follows_semester_order() {
        let engine = GpaEngine::default().with_policy(ConversionPolicy::Linear);
        let report = TranscriptReport::build(&records(), &engine).expect("builds");
        let trend = report.trend();

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].name, "Semester s1");
        assert_eq!(trend[0].gpa4, 3.18);
        assert_eq!(trend[1].gpa4, 3.4);
    }

    #[test]
    fn empty_transcript_has_no_latest_semester() {
        let report = TranscriptReport::build(&[], &GpaEngine::default()).expect("builds");
        assert_eq!(report.cumulative_gpa10, 0.0);
        assert_eq!(report.total_credits, 0);
        assert!(report.latest_semester_gpa10.is_none());
    }

    #[test]
    fn strict_engine_surfaces_violations() {
        let mut bad = records();
        bad[0].courses[0].components[0].score = 14.0;
        let engine = GpaEngine::new(ConversionPolicy::SemesterTable, InputMode::Strict);

        assert!(TranscriptReport::build(&bad, &engine).is_err());
    }
}
