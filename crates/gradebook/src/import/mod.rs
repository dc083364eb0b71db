//! Flat CSV transcript import.
//!
//! Expected headers (Order, Bonus and Counts Toward GPA may be omitted):
//!
//! ```text
//! Semester,Order,Course,Credit,Bonus,Counts Toward GPA,Component,Weight,Score
//! ```
//!
//! Each row carries one grade component. Rows are grouped into semesters by name
//! and into courses by (semester, course name), keeping first-seen order.

mod parser;

use crate::records::{
    ComponentId, ComponentRecord, CourseId, CourseRecord, SemesterId, SemesterRecord, UserId,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use parser::TranscriptLine;

#[derive(Debug)]
pub enum TranscriptImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, message: String },
}

impl std::fmt::Display for TranscriptImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptImportError::Io(err) => write!(f, "failed to read transcript export: {}", err),
            TranscriptImportError::Csv(err) => write!(f, "invalid transcript CSV data: {}", err),
            TranscriptImportError::InvalidRow { line, message } => {
                write!(f, "invalid transcript row on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for TranscriptImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranscriptImportError::Io(err) => Some(err),
            TranscriptImportError::Csv(err) => Some(err),
            TranscriptImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for TranscriptImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TranscriptImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct TranscriptImporter;

impl TranscriptImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        user_id: &UserId,
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<SemesterRecord>, TranscriptImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, user_id, imported_at)
    }

    /// Parses the export into semester records owned by `user_id`.
    ///
    /// Ids are derived from positions (`sem-001`, `crs-001-01`, `cmp-001-01-01`) so the
    /// same file always produces the same records. They are unique per user only, so
    /// repositories must scope them by owner.
    pub fn from_reader<R: Read>(
        reader: R,
        user_id: &UserId,
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<SemesterRecord>, TranscriptImportError> {
        let mut builder = TranscriptBuilder::new(user_id, imported_at);
        for line in parser::parse_lines(reader)? {
            builder.apply(line)?;
        }
        Ok(builder.finish())
    }
}

struct TranscriptBuilder<'a> {
    user_id: &'a UserId,
    imported_at: DateTime<Utc>,
    semesters: Vec<SemesterRecord>,
    semester_index: HashMap<String, usize>,
    course_index: HashMap<(usize, String), usize>,
}

impl<'a> TranscriptBuilder<'a> {
    fn new(user_id: &'a UserId, imported_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            imported_at,
            semesters: Vec::new(),
            semester_index: HashMap::new(),
            course_index: HashMap::new(),
        }
    }

    fn apply(&mut self, line: TranscriptLine) -> Result<(), TranscriptImportError> {
        let semester_slot = self.semester_slot(&line);
        let course_slot = self.course_slot(semester_slot, &line)?;

        if let Some(component) = line.component {
            let course = &mut self.semesters[semester_slot].courses[course_slot];
            let id = ComponentId::new(format!(
                "cmp-{:03}-{:02}-{:02}",
                semester_slot + 1,
                course_slot + 1,
                course.components.len() + 1
            ));
            course.components.push(ComponentRecord {
                id,
                course_id: course.id.clone(),
                name: component.name,
                weight: component.weight,
                score: component.score,
                created_at: self.imported_at,
            });
        }

        Ok(())
    }

    fn semester_slot(&mut self, line: &TranscriptLine) -> usize {
        if let Some(&slot) = self.semester_index.get(&line.semester) {
            return slot;
        }

        let slot = self.semesters.len();
        self.semesters.push(SemesterRecord {
            id: SemesterId::new(format!("sem-{:03}", slot + 1)),
            user_id: self.user_id.clone(),
            name: line.semester.clone(),
            index_order: line.order.unwrap_or(slot as i32),
            created_at: self.imported_at,
            courses: Vec::new(),
        });
        self.semester_index.insert(line.semester.clone(), slot);
        slot
    }

    fn course_slot(
        &mut self,
        semester_slot: usize,
        line: &TranscriptLine,
    ) -> Result<usize, TranscriptImportError> {
        let key = (semester_slot, line.course.clone());
        let semester = &mut self.semesters[semester_slot];

        if let Some(&slot) = self.course_index.get(&key) {
            let existing = &semester.courses[slot];
            if existing.credit != line.credit {
                return Err(TranscriptImportError::InvalidRow {
                    line: line.line,
                    message: format!(
                        "course '{}' was declared with {} credits, found {}",
                        line.course, existing.credit, line.credit
                    ),
                });
            }
            return Ok(slot);
        }

        let slot = semester.courses.len();
        semester.courses.push(CourseRecord {
            id: CourseId::new(format!("crs-{:03}-{:02}", semester_slot + 1, slot + 1)),
            semester_id: semester.id.clone(),
            user_id: self.user_id.clone(),
            name: line.course.clone(),
            credit: line.credit,
            bonus: line.bonus,
            is_gpa: line.is_gpa,
            created_at: self.imported_at,
            components: Vec::new(),
        });
        self.course_index.insert(key, slot);
        Ok(slot)
    }

    fn finish(self) -> Vec<SemesterRecord> {
        self.semesters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Cursor;

    fn imported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn groups_rows_into_semesters_and_courses() {
        let csv = "Semester,Order,Course,Credit,Bonus,Counts Toward GPA,Component,Weight,Score\n\
Fall 2024,0,Calculus,3,,,Midterm,60,8\n\
Fall 2024,0,Calculus,3,,,Final,40,7\n\
Fall 2024,0,Physical Education,2,,no,,,\n\
Spring 2025,1,Physics,4,0.5,yes,Final,100,8.2\n";

        let user = UserId::new("student-7");
        let semesters = TranscriptImporter::from_reader(Cursor::new(csv), &user, imported_at())
            .expect("import succeeds");

        assert_eq!(semesters.len(), 2);
        let fall = &semesters[0];
        assert_eq!(fall.id.as_str(), "sem-001");
        assert_eq!(fall.user_id, user);
        assert_eq!(fall.courses.len(), 2);
        assert_eq!(fall.courses[0].components.len(), 2);
        assert_eq!(fall.courses[0].components[1].id.as_str(), "cmp-001-01-02");
        assert_eq!(fall.courses[1].is_gpa, Some(false));
        assert!(fall.courses[1].components.is_empty());

        let spring = &semesters[1];
        assert_eq!(spring.index_order, 1);
        assert_eq!(spring.courses[0].id.as_str(), "crs-002-01");
        assert_eq!(spring.courses[0].bonus, Some(0.5));
        assert_eq!(spring.courses[0].semester_id, spring.id);
    }

    #[test]
    fn missing_order_defaults_to_first_seen_position() {
        let csv = "Semester,Course,Credit,Component,Weight,Score\n\
Year 1,Algebra,3,Final,100,6\n\
Year 2,Geometry,3,Final,100,7\n";

        let semesters =
            TranscriptImporter::from_reader(csv.as_bytes(), &UserId::new("u"), imported_at())
                .expect("import succeeds");

        assert_eq!(semesters[0].index_order, 0);
        assert_eq!(semesters[1].index_order, 1);
    }

    #[test]
    fn conflicting_credits_are_rejected() {
        let csv = "Semester,Course,Credit,Component,Weight,Score\n\
Year 1,Algebra,3,Midterm,50,6\n\
Year 1,Algebra,4,Final,50,7\n";

        let err = TranscriptImporter::from_reader(csv.as_bytes(), &UserId::new("u"), imported_at())
            .expect_err("credits conflict");
        assert!(err.to_string().contains("line 3"));
    }
}
