//! Stored gradebook records and the service/HTTP layer that reads them.
//!
//! Records mirror the `semesters`, `courses` and `course_components` tables. The
//! storage itself lives behind [`GradebookRepository`]; the engine only ever sees
//! snapshots projected from these records.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    ComponentId, ComponentRecord, CourseId, CourseRecord, SemesterId, SemesterOrder,
    SemesterRecord, UserId,
};
pub use repository::{GradebookRepository, RepositoryError};
pub use router::gradebook_router;
pub use service::{GradebookService, GradebookServiceError};
