use std::io::Read;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{SemesterId, SemesterOrder, UserId};
use super::repository::{GradebookRepository, RepositoryError};
use crate::gpa::{GpaEngine, GradeInputError};
use crate::import::{TranscriptImportError, TranscriptImporter};
use crate::transcript::{semester_summary, SemesterSummaryView, TranscriptReport};

/// Service composing the repository with the GPA engine.
pub struct GradebookService<R> {
    repository: Arc<R>,
    engine: GpaEngine,
}

impl<R> GradebookService<R>
where
    R: GradebookRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: GpaEngine) -> Self {
        Self { repository, engine }
    }

    pub fn engine(&self) -> GpaEngine {
        self.engine
    }

    /// Full transcript for a user, recomputed from the current snapshot.
    pub fn transcript(&self, user_id: &UserId) -> Result<TranscriptReport, GradebookServiceError> {
        let records = self.repository.semesters_for(user_id)?;
        let report = TranscriptReport::build(&records, &self.engine)?;
        Ok(report)
    }

    pub fn semester_report(
        &self,
        user_id: &UserId,
        semester_id: &SemesterId,
    ) -> Result<SemesterSummaryView, GradebookServiceError> {
        let record = self
            .repository
            .semester(user_id, semester_id)?
            .ok_or(RepositoryError::NotFound)?;
        let view = semester_summary(&record, &self.engine)?;
        Ok(view)
    }

    /// Imports a CSV export and stores every semester it contains in one batch, so a failed
    /// import leaves the stored transcript untouched. Returns the count stored.
    pub fn import<Rd: Read>(
        &self,
        user_id: &UserId,
        reader: Rd,
        imported_at: DateTime<Utc>,
    ) -> Result<usize, GradebookServiceError> {
        let semesters = TranscriptImporter::from_reader(reader, user_id, imported_at)?;
        let count = semesters.len();
        self.repository.upsert_semesters(user_id, semesters)?;

        info!(user = %user_id, semesters = count, "imported transcript");
        Ok(count)
    }

    /// Persists a new semester order, e.g. after a drag-and-drop reorder.
    pub fn reorder(
        &self,
        user_id: &UserId,
        order: Vec<SemesterOrder>,
    ) -> Result<(), GradebookServiceError> {
        self.repository.update_order(user_id, &order)?;
        info!(user = %user_id, semesters = order.len(), "updated semester order");
        Ok(())
    }
}

/// Error raised by the gradebook service.
#[derive(Debug, thiserror::Error)]
pub enum GradebookServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Input(#[from] GradeInputError),
    #[error(transparent)]
    Import(#[from] TranscriptImportError),
}
