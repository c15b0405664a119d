use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{MarkEntry, ResultId, StudentId, SubjectResultKey, TermFilter};
use crate::grading::{Curriculum, GradeResult, LetterGrade};

/// Persisted subject result: identifying keys, the raw marks it was computed from, and
/// the grade with its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectResultRecord {
    pub id: ResultId,
    pub key: SubjectResultKey,
    pub level: String,
    pub curriculum: Curriculum,
    pub raw_marks: Vec<MarkEntry>,
    pub grade: GradeResult,
    pub graded_at: DateTime<Utc>,
}

impl SubjectResultRecord {
    pub fn final_grade(&self) -> LetterGrade {
        self.grade.final_grade()
    }
}

/// Storage abstraction so the assembler can be exercised in isolation. Implementations own
/// the (student, subject, term, year) uniqueness constraint.
pub trait SubjectResultRepository: Send + Sync {
    /// Creates the record or replaces the one stored under the same key. A replaced record's
    /// id is kept, so the returned record carries the id actually stored.
    fn upsert(&self, record: SubjectResultRecord) -> Result<SubjectResultRecord, RepositoryError>;
    fn fetch(&self, key: &SubjectResultKey) -> Result<Option<SubjectResultRecord>, RepositoryError>;
    fn for_student(
        &self,
        student_id: &StudentId,
        filter: &TermFilter,
    ) -> Result<Vec<SubjectResultRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
