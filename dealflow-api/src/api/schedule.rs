//! Appointment scheduling endpoints

use crate::api::handlers::{error_response, ApiError};
use crate::api::server::AppContext;
use crate::db::schedule::{self, AppointmentInput};
use crate::error::Error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use dealflow_common::db::models::{Appointment, AppointmentStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentRequest {
    #[serde(flatten)]
    pub input: AppointmentInput,
    pub status: Option<String>,
}

/// GET /appointments - List appointments in schedule order
pub async fn list_appointments(
    State(ctx): State<AppContext>,
) -> Result<Json<AppointmentListResponse>, ApiError> {
    match schedule::list(&ctx.db_pool).await {
        Ok(list) => Ok(Json(AppointmentListResponse { appointments: list })),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /appointments - Schedule an appointment with a lead
pub async fn create_appointment(
    State(ctx): State<AppContext>,
    Json(input): Json<AppointmentInput>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    if let Err(e) = crate::db::leads::get(&ctx.db_pool, &input.lead_id).await {
        return Err(error_response(e));
    }
    match schedule::insert(&ctx.db_pool, &input).await {
        Ok(appointment) => {
            info!(
                "Scheduled appointment {} for lead {}",
                appointment.id, appointment.lead_id
            );
            Ok((StatusCode::CREATED, Json(appointment)))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// GET /appointments/:id - Fetch one appointment
pub async fn get_appointment(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, ApiError> {
    match schedule::get(&ctx.db_pool, &id).await {
        Ok(appointment) => Ok(Json(appointment)),
        Err(e) => Err(error_response(e)),
    }
}

/// PUT /appointments/:id - Update fields and optionally transition status
pub async fn update_appointment(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let status = match &req.status {
        Some(raw) => match raw.parse::<AppointmentStatus>() {
            Ok(status) => Some(status),
            Err(msg) => return Err(error_response(Error::BadRequest(msg))),
        },
        None => None,
    };
    match schedule::update(&ctx.db_pool, &id, &req.input, status).await {
        Ok(appointment) => Ok(Json(appointment)),
        Err(e) => Err(error_response(e)),
    }
}
