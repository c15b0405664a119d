//! Subject result assembly: merges recorded marks, grades them with the curriculum's
//! grader, and hands the stamped result to the persistence collaborator.

pub mod domain;
pub mod marks;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ComponentKind, GradingRequest, MarkEntry, ResultId, StudentId, SubjectId,
    SubjectResultKey, Term, TermFilter,
};
pub use marks::{merge_components, MarksError};
pub use repository::{RepositoryError, SubjectResultRecord, SubjectResultRepository};
pub use router::result_router;
pub use service::{DriftStatus, ResultService, ResultServiceError};
