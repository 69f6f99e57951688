//! Application setup: pipeline construction and router wiring.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use redaction::{
    AzureLanguageDetector, AzureReadExtractor, OpenAiDetector, PiiDetector, PngRasterizer,
    RedactionPipeline,
};

use crate::config::{Config, DetectorProvider};
use crate::routes::{health_handler, redact_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: RedactionPipeline,
}

/// Create the PII detector selected by configuration.
pub fn create_detector(config: &Config) -> Result<Arc<dyn PiiDetector>> {
    match config.detector_provider {
        DetectorProvider::Azure => {
            let endpoint = config
                .azure_language_endpoint
                .as_ref()
                .context("AZURE_LANGUAGE_ENDPOINT missing")?;
            let key = config
                .azure_language_key
                .as_ref()
                .context("AZURE_LANGUAGE_KEY missing")?;

            tracing::info!("PII detection via Azure Language Service");
            Ok(Arc::new(AzureLanguageDetector::new(
                endpoint.as_str(),
                key.as_str(),
            )))
        }
        DetectorProvider::OpenAi => {
            let key = config
                .openai_api_key
                .as_ref()
                .context("OPENAI_API_KEY missing")?;

            tracing::info!("PII detection via OpenAI");
            Ok(Arc::new(OpenAiDetector::new(key.as_str())))
        }
    }
}

/// Assemble the redaction pipeline from configuration.
///
/// Collaborators are constructed explicitly at process start; there is no
/// container or global state. The pipeline is stateless and shared across
/// requests.
pub fn build_pipeline(config: &Config) -> Result<RedactionPipeline> {
    let extractor = Arc::new(AzureReadExtractor::new(
        config.document_intelligence_endpoint.as_str(),
        config.document_intelligence_key.as_str(),
    ));
    let detector = create_detector(config)?;
    let rasterizer = Arc::new(PngRasterizer::new());

    Ok(RedactionPipeline::new(extractor, detector, rasterizer))
}

/// Build the Axum application router
pub fn build_app(pipeline: RedactionPipeline, max_upload_bytes: usize) -> Router {
    let state = AppState { pipeline };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/redact-pii", post(redact_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
