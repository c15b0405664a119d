use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySubjectResultRepository};
use crate::routes::with_result_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use school_grading::config::AppConfig;
use school_grading::error::AppError;
use school_grading::results::ResultService;
use school_grading::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySubjectResultRepository::default());
    let result_service = Arc::new(ResultService::new(repository));

    let app = with_result_routes(result_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "grading service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
