use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::results::router::grade_handler;
use crate::results::{result_router, ResultService};

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(uri: &str, payload: &impl serde::Serialize) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serializes")))
        .expect("request builds")
}

#[tokio::test]
async fn grade_route_returns_the_stored_record() {
    let (service, _) = build_service();
    let router = result_router(Arc::new(service));

    let response = router
        .oneshot(post_json("/api/v1/results", &primary_request("stu-http")))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["grade"]["final_grade"], "A");
    assert_eq!(body["curriculum"], "lower_primary");
    assert_eq!(body["key"]["student_id"], "stu-http");
    assert!(body["grade"].get("paper_codes").is_none());
}

#[tokio::test]
async fn grade_route_exposes_paper_codes() {
    let (service, _) = build_service();
    let router = result_router(Arc::new(service));

    let response = router
        .oneshot(post_json("/api/v1/results", &advanced_request("stu-papers")))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["grade"]["final_grade"], "E");
    assert_eq!(body["grade"]["paper_codes"]["Paper3"], 7);
}

#[tokio::test]
async fn grade_handler_returns_unprocessable_for_unknown_level() {
    let (service, _) = build_service();
    let request = request(
        "stu-bad-level",
        "MATH",
        "Form 9",
        vec![coursework(10.0, 20.0), examination(10.0, 20.0)],
    );

    let response = grade_handler::<MemoryRepository>(State(Arc::new(service)), axum::Json(request))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "no grader for level Form 9");
}

#[tokio::test]
async fn grade_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(ResultService::new(Arc::new(UnavailableRepository)));

    let response =
        grade_handler::<UnavailableRepository>(State(service), axum::Json(primary_request("x")))
            .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn student_route_lists_filtered_results() {
    let (service, _) = build_service();
    service
        .grade(primary_request("stu-route"))
        .expect("grades");
    service
        .grade(advanced_request("stu-route"))
        .expect("grades");
    let router = result_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/students/stu-route/results")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let response = router
        .oneshot(
            Request::get("/api/v1/students/stu-route/results?term=Term%201&year=2024")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    let body = json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn drift_route_reports_status_or_not_found() {
    let (service, _) = build_service();
    service
        .grade(primary_request("stu-drift-route"))
        .expect("grades");
    let router = result_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(
            Request::get(
                "/api/v1/results/drift?student_id=stu-drift-route&subject_id=MATH-P&term=Term%201&year=2025",
            )
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "current");

    let response = router
        .oneshot(
            Request::get(
                "/api/v1/results/drift?student_id=nobody&subject_id=MATH-P&term=Term%201&year=2025",
            )
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
