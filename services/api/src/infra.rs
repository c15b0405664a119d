use metrics_exporter_prometheus::PrometheusHandle;
use school_grading::results::{
    RepositoryError, StudentId, SubjectResultKey, SubjectResultRecord, SubjectResultRepository,
    TermFilter,
};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

type RecordMap = BTreeMap<SubjectResultKey, SubjectResultRecord>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store keyed by (student, subject, term, year); a later write for the same
/// key replaces the earlier one.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubjectResultRepository {
    records: Arc<Mutex<RecordMap>>,
}

impl InMemorySubjectResultRepository {
    fn lock(&self) -> Result<MutexGuard<'_, RecordMap>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("result store lock poisoned".to_string()))
    }
}

impl SubjectResultRepository for InMemorySubjectResultRepository {
    fn upsert(
        &self,
        mut record: SubjectResultRecord,
    ) -> Result<SubjectResultRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if let Some(existing) = guard.get(&record.key) {
            record.id = existing.id.clone();
        }
        guard.insert(record.key.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, key: &SubjectResultKey) -> Result<Option<SubjectResultRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(key).cloned())
    }

    fn for_student(
        &self,
        student_id: &StudentId,
        filter: &TermFilter,
    ) -> Result<Vec<SubjectResultRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .values()
            .filter(|record| &record.key.student_id == student_id && filter.matches(&record.key))
            .cloned()
            .collect())
    }
}
