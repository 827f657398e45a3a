use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the liveness endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Crate version of the running binary
    pub version: String,
}

impl HealthResponse {
    fn alive() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Reports that the analysis server answers requests.
///
/// Analyses run in memory with nothing to connect to, so answering at all
/// is the whole check.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Server answers requests", body = HealthResponse)
    )
)]
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::alive()))
}
