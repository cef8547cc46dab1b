//! HTTP surface of the resolver service

use crate::error::ExtractError;
use crate::media::DownloadData;
use crate::pipeline::ExtractionPipeline;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ExtractionPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<ExtractionPipeline>) -> Self {
        Self { pipeline }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        Self {
            status: StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: err.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Success envelope of the download endpoint.
#[derive(Debug, Serialize)]
pub struct ApiSuccess {
    pub success: bool,
    pub data: DownloadData,
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DownloadBody {
    url: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/download", get(download_get).post(download_post))
        .with_state(state)
}

async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Instagram Reel Resolver API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "API documentation",
            "GET /health": "Health check",
            "GET /download": "Resolve a reel (with url parameter)",
            "POST /download": "Resolve a reel (JSON body with url field)",
        },
        "usage": {
            "GET": "/download?url=https://www.instagram.com/reel/...",
            "POST": {"url": "https://www.instagram.com/reel/..."},
        },
        "supported_paths": ["/reel/", "/p/", "/tv/"],
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "Reel resolver API is running",
    }))
}

async fn download_get(
    State(state): State<AppState>,
    Query(params): Query<DownloadQuery>,
) -> ApiResult<Json<ApiSuccess>> {
    resolve(&state, params.url, "URL parameter is required").await
}

async fn download_post(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<ApiSuccess>> {
    // Parsed by hand so a malformed body still gets the contract's 400
    // envelope instead of the framework's rejection shape.
    let url = serde_json::from_str::<DownloadBody>(&body)
        .ok()
        .and_then(|b| b.url);
    resolve(&state, url, "URL is required in request body").await
}

async fn resolve(
    state: &AppState,
    url: Option<String>,
    missing_message: &str,
) -> ApiResult<Json<ApiSuccess>> {
    let url = match url {
        Some(u) if !u.trim().is_empty() => u.trim().to_string(),
        _ => return Err(ApiError::bad_request(missing_message)),
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("download", %request_id);
    let result = async {
        info!("resolving {}", url);
        state.pipeline.extract(&url).await
    }
    .instrument(span)
    .await;

    match result {
        Ok(data) => Ok(Json(ApiSuccess {
            success: true,
            data,
        })),
        Err(err) => {
            info!(%request_id, "extraction failed: {}", err);
            Err(ApiError::from(err))
        }
    }
}
