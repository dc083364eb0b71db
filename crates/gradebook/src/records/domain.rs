use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gpa::{Course, GradeComponent, Semester};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(
    /// Owner of a gradebook. Always passed explicitly; never read from a session.
    UserId
);
record_id!(SemesterId);
record_id!(CourseId);
record_id!(ComponentId);

/// Row of `semesters`, joined with its courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    pub id: SemesterId,
    pub user_id: UserId,
    pub name: String,
    pub index_order: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
}

impl SemesterRecord {
    pub fn to_semester(&self) -> Semester {
        Semester::new(self.courses.iter().map(CourseRecord::to_course).collect())
    }

    pub fn total_credits(&self) -> u64 {
        self.courses
            .iter()
            .map(|course| u64::from(course.credit))
            .sum()
    }
}

/// Row of `courses`, joined with its components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    pub semester_id: SemesterId,
    pub user_id: UserId,
    pub name: String,
    pub credit: u32,
    #[serde(default)]
    pub bonus: Option<f64>,
    #[serde(default)]
    pub is_gpa: Option<bool>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

impl CourseRecord {
    pub fn to_course(&self) -> Course {
        Course {
            credit: self.credit,
            bonus: self.bonus,
            is_gpa: self.is_gpa,
            components: self
                .components
                .iter()
                .map(|component| GradeComponent::new(component.score, component.weight))
                .collect(),
        }
    }
}

/// Row of `course_components`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    pub course_id: CourseId,
    pub name: String,
    pub weight: f64,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// New position of a semester after the user reorders the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterOrder {
    pub id: SemesterId,
    pub index_order: i32,
}
