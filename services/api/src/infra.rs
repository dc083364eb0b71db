use gradebook::gpa::ConversionPolicy;
use gradebook::records::{
    GradebookRepository, RepositoryError, SemesterId, SemesterOrder, SemesterRecord, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the hosted database. Rows are keyed by `(owner, semester id)`.
#[derive(Default, Clone)]
pub(crate) struct InMemoryGradebookRepository {
    semesters: Arc<Mutex<SemesterTable>>,
}

type SemesterTable = HashMap<UserId, Vec<SemesterRecord>>;

impl InMemoryGradebookRepository {
    fn table(&self) -> Result<MutexGuard<'_, SemesterTable>, RepositoryError> {
        self.semesters
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl GradebookRepository for InMemoryGradebookRepository {
    fn semesters_for(&self, user_id: &UserId) -> Result<Vec<SemesterRecord>, RepositoryError> {
        let guard = self.table()?;
        Ok(guard.get(user_id).cloned().unwrap_or_default())
    }

    fn semester(
        &self,
        user_id: &UserId,
        semester_id: &SemesterId,
    ) -> Result<Option<SemesterRecord>, RepositoryError> {
        let guard = self.table()?;
        Ok(guard
            .get(user_id)
            .and_then(|records| records.iter().find(|record| &record.id == semester_id))
            .cloned())
    }

    fn upsert_semesters(
        &self,
        user_id: &UserId,
        incoming: Vec<SemesterRecord>,
    ) -> Result<(), RepositoryError> {
        if incoming.iter().any(|record| &record.user_id != user_id) {
            return Err(RepositoryError::Conflict);
        }

        let mut guard = self.table()?;
        let records = guard.entry(user_id.clone()).or_default();
        for record in incoming {
            match records.iter_mut().find(|existing| existing.id == record.id) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }
        Ok(())
    }

    fn update_order(
        &self,
        user_id: &UserId,
        order: &[SemesterOrder],
    ) -> Result<(), RepositoryError> {
        let mut guard = self.table()?;
        let records = guard.get_mut(user_id).ok_or(RepositoryError::NotFound)?;

        let known = order
            .iter()
            .all(|entry| records.iter().any(|record| record.id == entry.id));
        if !known {
            return Err(RepositoryError::NotFound);
        }

        for entry in order {
            if let Some(record) = records.iter_mut().find(|record| record.id == entry.id) {
                record.index_order = entry.index_order;
            }
        }
        Ok(())
    }
}

pub(crate) fn parse_policy(raw: &str) -> Result<ConversionPolicy, String> {
    raw.parse::<ConversionPolicy>().map_err(|err| err.to_string())
}

pub(crate) fn deserialize_optional_policy<'de, D>(
    deserializer: D,
) -> Result<Option<ConversionPolicy>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_policy(&value).map_err(serde::de::Error::custom))
        .transpose()
}
