//! HTTP request handlers for the Directory Proxy.
//!
//! Implements the directory lookup pass-through and a health check using axum.

use crate::upstream::{DirectoryUpstream, UpstreamError};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Client for the hosted directory
    pub upstream: Arc<DirectoryUpstream>,
}

/// Query parameters for a directory lookup
#[derive(Debug, Default)]
pub struct LookupParams {
    /// FID to look up, forwarded without numeric validation
    pub fid: Option<String>,
}

impl LookupParams {
    /// Build from raw query pairs; the first `fid` wins when repeated
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            fid: pairs
                .into_iter()
                .find(|(key, _)| key == "fid")
                .map(|(_, value)| value),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Directory endpoint lookups are forwarded to
    pub upstream: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The `fid` query parameter was absent or empty
    MissingParameter,
    /// The directory answered with an error status
    Upstream {
        /// Status forwarded to the caller
        status: StatusCode,
        /// Reason phrase from the directory
        status_text: String,
    },
    /// The directory could not be reached or returned garbage
    Transport(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingParameter => {
                (StatusCode::BAD_REQUEST, "Missing FID parameter".to_string())
            }
            AppError::Upstream {
                status,
                status_text,
            } => (
                status,
                format!("Failed to fetch data from directory: {}", status_text),
            ),
            AppError::Transport(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data from directory".to_string(),
            ),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Status {
                status,
                status_text,
            } => AppError::Upstream {
                status,
                status_text,
            },
            UpstreamError::Transport(e) => AppError::Transport(e.to_string()),
        }
    }
}

/// GET /api/farcaster?fid=<fid> - Relay a directory lookup
///
/// The upstream JSON is returned unchanged on success.
async fn lookup_proofs(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, AppError> {
    let fid = match LookupParams::from_pairs(pairs).fid {
        Some(fid) if !fid.is_empty() => fid,
        _ => return Err(AppError::MissingParameter),
    };

    info!("Directory lookup for FID {}", fid);

    match state.upstream.fetch(&fid).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            let app_error = AppError::from(e);
            match &app_error {
                AppError::Transport(reason) => {
                    error!("Error fetching FID {} from directory: {}", fid, reason)
                }
                _ => warn!("Directory rejected lookup for FID {}: {:?}", fid, app_error),
            }
            Err(app_error)
        }
    }
}

/// GET /health - Liveness check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        upstream: state.upstream.base_url().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/farcaster", get(lookup_proofs))
        .route("/health", get(health_check))
        .with_state(state)
}
