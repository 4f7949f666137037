//! Property CRUD endpoints

use crate::api::handlers::{error_response, ApiError, StatusResponse};
use crate::api::server::AppContext;
use crate::db::properties::{self, PropertyInput};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use dealflow_common::db::models::{Property, PropertyStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PropertyListResponse {
    pub properties: Vec<Property>,
}

/// GET /properties - List properties, optionally filtered by status
pub async fn list_properties(
    State(ctx): State<AppContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PropertyListResponse>, ApiError> {
    match properties::list(&ctx.db_pool, query.status.as_deref()).await {
        Ok(list) => Ok(Json(PropertyListResponse { properties: list })),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /properties - Create a property
pub async fn create_property(
    State(ctx): State<AppContext>,
    Json(input): Json<PropertyInput>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    match properties::insert(&ctx.db_pool, &input).await {
        Ok(property) => {
            info!("Created property {} at {}", property.id, property.address);
            Ok((StatusCode::CREATED, Json(property)))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// GET /properties/:id - Fetch one property
pub async fn get_property(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    match properties::get(&ctx.db_pool, &id).await {
        Ok(property) => Ok(Json(property)),
        Err(e) => Err(error_response(e)),
    }
}

/// PUT /properties/:id - Update a property's fields
pub async fn update_property(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(input): Json<PropertyInput>,
) -> Result<Json<Property>, ApiError> {
    match properties::update(&ctx.db_pool, &id, &input).await {
        Ok(property) => Ok(Json(property)),
        Err(e) => Err(error_response(e)),
    }
}

/// DELETE /properties/:id - Soft-delete by marking the record inactive
///
/// Records are never removed so analysis history stays resolvable.
pub async fn deactivate_property(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    match properties::set_status(&ctx.db_pool, &id, PropertyStatus::Inactive).await {
        Ok(()) => {
            info!("Deactivated property {}", id);
            Ok(Json(StatusResponse {
                status: "inactive".to_string(),
            }))
        }
        Err(e) => Err(error_response(e)),
    }
}
