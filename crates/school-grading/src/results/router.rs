use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{GradingRequest, StudentId, SubjectId, SubjectResultKey, Term, TermFilter};
use super::repository::{RepositoryError, SubjectResultRepository};
use super::service::{ResultService, ResultServiceError};

/// Router builder exposing HTTP endpoints for grading and result lookup.
pub fn result_router<R>(service: Arc<ResultService<R>>) -> Router
where
    R: SubjectResultRepository + 'static,
{
    Router::new()
        .route("/api/v1/results", post(grade_handler::<R>))
        .route("/api/v1/results/drift", get(drift_handler::<R>))
        .route(
            "/api/v1/students/:student_id/results",
            get(student_results_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TermQuery {
    pub(crate) term: Option<String>,
    pub(crate) year: Option<i32>,
}

impl From<TermQuery> for TermFilter {
    fn from(query: TermQuery) -> Self {
        TermFilter {
            term: query.term.map(Term),
            year: query.year,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultKeyQuery {
    pub(crate) student_id: String,
    pub(crate) subject_id: String,
    pub(crate) term: String,
    pub(crate) year: i32,
}

impl From<ResultKeyQuery> for SubjectResultKey {
    fn from(query: ResultKeyQuery) -> Self {
        SubjectResultKey {
            student_id: StudentId(query.student_id),
            subject_id: SubjectId(query.subject_id),
            term: Term(query.term),
            year: query.year,
        }
    }
}

pub(crate) async fn grade_handler<R>(
    State(service): State<Arc<ResultService<R>>>,
    axum::Json(request): axum::Json<GradingRequest>,
) -> Response
where
    R: SubjectResultRepository + 'static,
{
    match service.grade(request) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn student_results_handler<R>(
    State(service): State<Arc<ResultService<R>>>,
    Path(student_id): Path<String>,
    Query(query): Query<TermQuery>,
) -> Response
where
    R: SubjectResultRepository + 'static,
{
    let student_id = StudentId(student_id);
    match service.results_for_student(&student_id, &query.into()) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn drift_handler<R>(
    State(service): State<Arc<ResultService<R>>>,
    Query(query): Query<ResultKeyQuery>,
) -> Response
where
    R: SubjectResultRepository + 'static,
{
    match service.check_drift(&query.into()) {
        Ok(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ResultServiceError) -> Response {
    let status = match &error {
        ResultServiceError::UnknownLevel(_)
        | ResultServiceError::Marks(_)
        | ResultServiceError::Grading(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ResultServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ResultServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
