//! Lead CRUD and status-transition endpoints

use crate::api::handlers::{error_response, ApiError};
use crate::api::server::AppContext;
use crate::db::leads::{self, LeadInput};
use crate::error::Error;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use dealflow_common::db::models::{Lead, LeadStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeadListResponse {
    pub leads: Vec<Lead>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// GET /leads - List leads, optionally filtered by status
pub async fn list_leads(
    State(ctx): State<AppContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<LeadListResponse>, ApiError> {
    // Reject unknown status filters rather than silently matching nothing
    if let Some(status) = &query.status {
        if status.parse::<LeadStatus>().is_err() {
            return Err(error_response(Error::BadRequest(format!(
                "unknown lead status: {}",
                status
            ))));
        }
    }
    match leads::list(&ctx.db_pool, query.status.as_deref()).await {
        Ok(list) => Ok(Json(LeadListResponse { leads: list })),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /leads - Create a lead (status starts at `new`)
pub async fn create_lead(
    State(ctx): State<AppContext>,
    Json(input): Json<LeadInput>,
) -> Result<(StatusCode, Json<Lead>), ApiError> {
    if input.owner_name.trim().is_empty() {
        return Err(error_response(Error::BadRequest(
            "owner_name is required".to_string(),
        )));
    }
    match leads::insert(&ctx.db_pool, &input).await {
        Ok(lead) => {
            info!("Created lead {} for {}", lead.id, lead.owner_name);
            Ok((StatusCode::CREATED, Json(lead)))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// GET /leads/:id - Fetch one lead
pub async fn get_lead(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Lead>, ApiError> {
    match leads::get(&ctx.db_pool, &id).await {
        Ok(lead) => Ok(Json(lead)),
        Err(e) => Err(error_response(e)),
    }
}

/// PUT /leads/:id - Update a lead's contact and assignment fields
pub async fn update_lead(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(input): Json<LeadInput>,
) -> Result<Json<Lead>, ApiError> {
    match leads::update(&ctx.db_pool, &id, &input).await {
        Ok(lead) => Ok(Json(lead)),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /leads/:id/status - Manual status transition
pub async fn set_lead_status(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<Lead>, ApiError> {
    let status: LeadStatus = match req.status.parse() {
        Ok(status) => status,
        Err(msg) => return Err(error_response(Error::BadRequest(msg))),
    };
    match leads::set_status(&ctx.db_pool, &id, status).await {
        Ok(lead) => {
            info!("Lead {} moved to {}", id, status);
            Ok(Json(lead))
        }
        Err(e) => Err(error_response(e)),
    }
}
