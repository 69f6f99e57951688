use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

/// Health check endpoint
///
/// The service holds no connections or state to probe; if the process is
/// serving requests it is healthy.
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            service: "PII Redaction API",
        }),
    )
}
