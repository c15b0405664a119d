use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::results::domain::{
    ComponentKind, GradingRequest, MarkEntry, StudentId, SubjectId, SubjectResultKey, Term,
    TermFilter,
};
use crate::results::repository::{
    RepositoryError, SubjectResultRecord, SubjectResultRepository,
};
use crate::results::ResultService;

pub(super) fn coursework(score: f64, max: f64) -> MarkEntry {
    MarkEntry::new(ComponentKind::Coursework, score, max)
}

pub(super) fn examination(score: f64, max: f64) -> MarkEntry {
    MarkEntry::new(ComponentKind::Examination, score, max)
}

pub(super) fn paper(number: u8, score: f64) -> MarkEntry {
    MarkEntry::new(ComponentKind::Paper { number }, score, 100.0)
}

pub(super) fn request(
    student: &str,
    subject: &str,
    level: &str,
    marks: Vec<MarkEntry>,
) -> GradingRequest {
    GradingRequest {
        student_id: StudentId(student.to_string()),
        subject_id: SubjectId(subject.to_string()),
        level: level.to_string(),
        term: Term("Term 1".to_string()),
        year: 2025,
        marks,
    }
}

/// Lower-primary marks that land exactly on the A boundary.
pub(super) fn primary_request(student: &str) -> GradingRequest {
    request(
        student,
        "MATH-P",
        "P6",
        vec![coursework(12.0, 20.0), coursework(20.0, 20.0), examination(48.0, 60.0)],
    )
}

/// Three advanced-secondary papers coded 9, 9, 7.
pub(super) fn advanced_request(student: &str) -> GradingRequest {
    request(
        student,
        "PHY-A",
        "S6",
        vec![paper(3, 50.0), paper(1, 35.0), paper(2, 30.0)],
    )
}

pub(super) fn key_for(request: &GradingRequest) -> SubjectResultKey {
    request.key()
}

pub(super) fn build_service() -> (ResultService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ResultService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<BTreeMap<SubjectResultKey, SubjectResultRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }

    /// Overwrites a stored record directly, bypassing the service.
    pub(super) fn replace(&self, record: SubjectResultRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(record.key.clone(), record);
    }
}

impl SubjectResultRepository for MemoryRepository {
    fn upsert(
        &self,
        mut record: SubjectResultRecord,
    ) -> Result<SubjectResultRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if let Some(existing) = guard.get(&record.key) {
            record.id = existing.id.clone();
        }
        guard.insert(record.key.clone(), record.clone());
        Ok(record)
    }

    fn fetch(
        &self,
        key: &SubjectResultKey,
    ) -> Result<Option<SubjectResultRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn for_student(
        &self,
        student_id: &StudentId,
        filter: &TermFilter,
    ) -> Result<Vec<SubjectResultRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.key.student_id == student_id && filter.matches(&record.key))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl SubjectResultRepository for UnavailableRepository {
    fn upsert(
        &self,
        _record: SubjectResultRecord,
    ) -> Result<SubjectResultRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("primary down".to_string()))
    }

    fn fetch(
        &self,
        _key: &SubjectResultKey,
    ) -> Result<Option<SubjectResultRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("primary down".to_string()))
    }

    fn for_student(
        &self,
        _student_id: &StudentId,
        _filter: &TermFilter,
    ) -> Result<Vec<SubjectResultRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("primary down".to_string()))
    }
}
