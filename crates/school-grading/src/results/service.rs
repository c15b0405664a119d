use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{GradingRequest, ResultId, StudentId, SubjectResultKey, TermFilter};
use super::marks::{merge_components, MarksError};
use super::repository::{RepositoryError, SubjectResultRecord, SubjectResultRepository};
use crate::grading::{select_grader, CurriculumGrader, GradingError, RuleVersionHash};

/// Assembler composing grader selection, mark merging and the result repository.
pub struct ResultService<R> {
    repository: Arc<R>,
}

static RESULT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_result_id() -> ResultId {
    let id = RESULT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResultId(format!("res-{id:06}"))
}

/// Whether a stored result was computed under the rule revision currently in force.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DriftStatus {
    Current {
        rule_version_hash: RuleVersionHash,
    },
    Stale {
        stored: RuleVersionHash,
        current: RuleVersionHash,
    },
}

impl<R> ResultService<R>
where
    R: SubjectResultRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Grade one subject for one student and persist the result, replacing any result
    /// already stored for the same student, subject, term and year.
    pub fn grade(
        &self,
        request: GradingRequest,
    ) -> Result<SubjectResultRecord, ResultServiceError> {
        let Some(grader) = select_grader(&request.level) else {
            warn!(level = %request.level, subject = %request.subject_id, "no grader for level");
            return Err(ResultServiceError::UnknownLevel(request.level));
        };
        let curriculum = grader.curriculum();

        let input = merge_components(curriculum, &request.marks).map_err(|error| {
            warn!(
                student = %request.student_id,
                subject = %request.subject_id,
                %error,
                "rejected recorded marks"
            );
            error
        })?;
        let grade = grader.grade(&input)?;

        let record = SubjectResultRecord {
            id: next_result_id(),
            key: request.key(),
            level: request.level.trim().to_ascii_uppercase(),
            curriculum,
            raw_marks: request.marks,
            grade,
            graded_at: Utc::now(),
        };

        let stored = self.repository.upsert(record)?;
        info!(
            result_id = %stored.id.0,
            student = %stored.key.student_id,
            subject = %stored.key.subject_id,
            %curriculum,
            grade = %stored.final_grade(),
            "subject result graded"
        );
        Ok(stored)
    }

    /// Fetch a stored result.
    pub fn get(&self, key: &SubjectResultKey) -> Result<SubjectResultRecord, ResultServiceError> {
        let record = self
            .repository
            .fetch(key)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn results_for_student(
        &self,
        student_id: &StudentId,
        filter: &TermFilter,
    ) -> Result<Vec<SubjectResultRecord>, ResultServiceError> {
        Ok(self.repository.for_student(student_id, filter)?)
    }

    /// Compare a stored result's rule fingerprint with the one its curriculum uses today.
    pub fn check_drift(&self, key: &SubjectResultKey) -> Result<DriftStatus, ResultServiceError> {
        let record = self.get(key)?;
        let current = record.curriculum.rule_version().fingerprint();
        let stored = record.grade.rule_version_hash().clone();

        debug!(result_id = %record.id.0, %stored, %current, "checked rule drift");
        if stored == current {
            Ok(DriftStatus::Current {
                rule_version_hash: current,
            })
        } else {
            Ok(DriftStatus::Stale { stored, current })
        }
    }

    /// Recompute a stored result from its stored raw marks under the current rules.
    pub fn regrade(
        &self,
        key: &SubjectResultKey,
    ) -> Result<SubjectResultRecord, ResultServiceError> {
        let mut record = self.get(key)?;
        let grader = record.curriculum.grader();
        let input = merge_components(record.curriculum, &record.raw_marks)?;
        let previous = record.final_grade();

        record.grade = grader.grade(&input)?;
        record.graded_at = Utc::now();

        let stored = self.repository.upsert(record)?;
        info!(
            result_id = %stored.id.0,
            %previous,
            grade = %stored.final_grade(),
            "subject result regraded"
        );
        Ok(stored)
    }
}

/// Error raised by the result service.
#[derive(Debug, thiserror::Error)]
pub enum ResultServiceError {
    #[error("no grader for level {0}")]
    UnknownLevel(String),
    #[error(transparent)]
    Marks(#[from] MarksError),
    #[error(transparent)]
    Grading(#[from] GradingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
