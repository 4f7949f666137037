//! Campaign CRUD and activity endpoints

use crate::api::handlers::{error_response, ApiError};
use crate::api::server::AppContext;
use crate::db::campaigns::{self, CampaignInput};
use crate::error::Error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use dealflow_common::db::models::{Campaign, CampaignStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct CampaignListResponse {
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCampaignRequest {
    #[serde(flatten)]
    pub input: CampaignInput,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityRequest {
    #[serde(default)]
    pub sent: i64,
    #[serde(default)]
    pub responses: i64,
}

/// GET /campaigns - List campaigns
pub async fn list_campaigns(
    State(ctx): State<AppContext>,
) -> Result<Json<CampaignListResponse>, ApiError> {
    match campaigns::list(&ctx.db_pool).await {
        Ok(list) => Ok(Json(CampaignListResponse { campaigns: list })),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /campaigns - Create a campaign in draft status
pub async fn create_campaign(
    State(ctx): State<AppContext>,
    Json(input): Json<CampaignInput>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    if input.name.trim().is_empty() {
        return Err(error_response(Error::BadRequest(
            "campaign name is required".to_string(),
        )));
    }
    match campaigns::insert(&ctx.db_pool, &input).await {
        Ok(campaign) => {
            info!("Created campaign {} ({})", campaign.id, campaign.name);
            Ok((StatusCode::CREATED, Json(campaign)))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// GET /campaigns/:id - Fetch one campaign
pub async fn get_campaign(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Campaign>, ApiError> {
    match campaigns::get(&ctx.db_pool, &id).await {
        Ok(campaign) => Ok(Json(campaign)),
        Err(e) => Err(error_response(e)),
    }
}

/// PUT /campaigns/:id - Update fields and optionally transition status
pub async fn update_campaign(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, ApiError> {
    let status = match &req.status {
        Some(raw) => match raw.parse::<CampaignStatus>() {
            Ok(status) => Some(status),
            Err(msg) => return Err(error_response(Error::BadRequest(msg))),
        },
        None => None,
    };
    match campaigns::update(&ctx.db_pool, &id, &req.input, status).await {
        Ok(campaign) => Ok(Json(campaign)),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /campaigns/:id/activity - Bump sent/response counters
pub async fn record_campaign_activity(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(req): Json<ActivityRequest>,
) -> Result<Json<Campaign>, ApiError> {
    if req.sent < 0 || req.responses < 0 {
        return Err(error_response(Error::BadRequest(
            "activity counters must be non-negative".to_string(),
        )));
    }
    match campaigns::record_activity(&ctx.db_pool, &id, req.sent, req.responses).await {
        Ok(campaign) => Ok(Json(campaign)),
        Err(e) => Err(error_response(e)),
    }
}
