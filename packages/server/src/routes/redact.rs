//! The redaction endpoint: accept an uploaded image, return it redacted.

use axum::{
    extract::{Extension, Multipart},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Redact PII from an uploaded image.
///
/// Accepts multipart/form-data with a `file` field containing the image and
/// responds with the redacted image bytes (PNG). Missing or empty uploads
/// are a 400; pipeline failures are a 500 with a JSON error body.
pub async fn redact_handler(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut file_bytes: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    match field.bytes().await {
                        Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                        Err(e) => {
                            return error_response(
                                StatusCode::BAD_REQUEST,
                                format!("Failed to read file: {e}"),
                            );
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid multipart request: {e}"),
                );
            }
        }
    }

    let Some(file_bytes) = file_bytes else {
        return error_response(StatusCode::BAD_REQUEST, "No file part in the request");
    };

    if file_bytes.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Empty file");
    }

    tracing::info!(bytes = file_bytes.len(), "processing uploaded image");

    match state.pipeline.redact(&file_bytes).await {
        Ok(redacted) => {
            tracing::info!(bytes = redacted.content.len(), "redaction succeeded");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, redacted.content_type)],
                redacted.content,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "redaction failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {e}"),
            )
        }
    }
}
