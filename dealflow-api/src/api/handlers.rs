//! Shared handler plumbing plus health and settings endpoints

use crate::api::server::AppContext;
use crate::error::Error;
use axum::{extract::State, http::StatusCode, Json};
use dealflow_common::db::models::Setting;
use serde::{Deserialize, Serialize};
use tracing::error;

// ============================================================================
// Shared Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Error tuple returned by all fallible handlers
pub type ApiError = (StatusCode, Json<StatusResponse>);

/// Map a module error to its HTTP representation, logging server faults
pub fn error_response(e: Error) -> ApiError {
    let status = e.status_code();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", e);
    }
    (
        status,
        Json(StatusResponse {
            status: format!("error: {}", e),
        }),
    )
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "dealflow-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Settings Endpoints
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AllSettingsResponse {
    settings: Vec<Setting>,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    settings: Vec<Setting>,
}

/// GET /settings/all - List every settings row
pub async fn get_all_settings(
    State(ctx): State<AppContext>,
) -> Result<Json<AllSettingsResponse>, ApiError> {
    match crate::db::settings::get_all_settings(&ctx.db_pool).await {
        Ok(settings) => Ok(Json(AllSettingsResponse { settings })),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /settings/bulk_update - Upsert a batch of settings rows
pub async fn bulk_update_settings(
    State(ctx): State<AppContext>,
    Json(req): Json<BulkUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    for setting in &req.settings {
        if let Err(e) =
            crate::db::settings::set_setting(&ctx.db_pool, &setting.key, &setting.value).await
        {
            return Err(error_response(e));
        }
    }
    Ok(StatusCode::OK)
}
