//! Communication log endpoints

use crate::api::handlers::{error_response, ApiError};
use crate::api::server::AppContext;
use crate::db::communications::{self, CommunicationInput};
use crate::error::Error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use dealflow_common::db::models::Communication;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct CommunicationListResponse {
    pub communications: Vec<Communication>,
}

/// GET /communications - All logged communications
pub async fn list_communications(
    State(ctx): State<AppContext>,
) -> Result<Json<CommunicationListResponse>, ApiError> {
    match communications::list(&ctx.db_pool).await {
        Ok(list) => Ok(Json(CommunicationListResponse {
            communications: list,
        })),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /leads/:id/communications - History for one lead
pub async fn list_lead_communications(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<CommunicationListResponse>, ApiError> {
    // Surface a 404 for unknown leads instead of an empty history
    if let Err(e) = crate::db::leads::get(&ctx.db_pool, &id).await {
        return Err(error_response(e));
    }
    match communications::list_for_lead(&ctx.db_pool, &id).await {
        Ok(list) => Ok(Json(CommunicationListResponse {
            communications: list,
        })),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /communications - Log a communication against a lead
pub async fn log_communication(
    State(ctx): State<AppContext>,
    Json(input): Json<CommunicationInput>,
) -> Result<(StatusCode, Json<Communication>), ApiError> {
    match input.direction.as_str() {
        "inbound" | "outbound" => {}
        other => {
            return Err(error_response(Error::BadRequest(format!(
                "unknown direction: {}",
                other
            ))))
        }
    }
    match input.channel.as_str() {
        "call" | "sms" | "email" | "mail" => {}
        other => {
            return Err(error_response(Error::BadRequest(format!(
                "unknown channel: {}",
                other
            ))))
        }
    }
    if let Err(e) = crate::db::leads::get(&ctx.db_pool, &input.lead_id).await {
        return Err(error_response(e));
    }

    match communications::insert(&ctx.db_pool, &input).await {
        Ok(communication) => {
            info!(
                "Logged {} {} for lead {}",
                communication.direction, communication.channel, communication.lead_id
            );
            Ok((StatusCode::CREATED, Json(communication)))
        }
        Err(e) => Err(error_response(e)),
    }
}
