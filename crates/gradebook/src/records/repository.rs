use super::domain::{SemesterId, SemesterOrder, SemesterRecord, UserId};

/// Storage abstraction over the hosted database so the service can be exercised in isolation.
///
/// Every call is scoped by an explicit [`UserId`]; implementations must never return
/// another user's rows.
pub trait GradebookRepository: Send + Sync {
    /// All semesters of a user with nested courses and components, in any order.
    fn semesters_for(&self, user_id: &UserId) -> Result<Vec<SemesterRecord>, RepositoryError>;
    fn semester(
        &self,
        user_id: &UserId,
        semester_id: &SemesterId,
    ) -> Result<Option<SemesterRecord>, RepositoryError>;
    /// Inserts each semester for `user_id`, replacing any of that user's semesters with the
    /// same id. Ids are only unique per user. The batch is applied as a whole: a record owned
    /// by someone else fails the call with `Conflict` and nothing is written.
    fn upsert_semesters(
        &self,
        user_id: &UserId,
        records: Vec<SemesterRecord>,
    ) -> Result<(), RepositoryError>;
    /// Applies new `index_order` values. Fails with `NotFound` if any id is unknown.
    fn update_order(
        &self,
        user_id: &UserId,
        order: &[SemesterOrder],
    ) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
