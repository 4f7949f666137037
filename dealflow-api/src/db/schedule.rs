//! Appointment database queries

use crate::error::{Error, Result};
use dealflow_common::db::models::{Appointment, AppointmentStatus};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = "id, lead_id, title, notes, scheduled_at, \
     duration_minutes, status, created_at, updated_at";

/// Fields accepted when creating or updating an appointment
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AppointmentInput {
    pub lead_id: String,
    pub title: String,
    pub notes: Option<String>,
    pub scheduled_at: String,
    pub duration_minutes: Option<i64>,
}

/// Schedule a new appointment; returns the stored record
pub async fn insert(db: &Pool<Sqlite>, input: &AppointmentInput) -> Result<Appointment> {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO appointments (
            id, lead_id, title, notes, scheduled_at, duration_minutes,
            status, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&input.lead_id)
    .bind(&input.title)
    .bind(&input.notes)
    .bind(&input.scheduled_at)
    .bind(input.duration_minutes.unwrap_or(30))
    .bind(AppointmentStatus::Scheduled.as_str())
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    get(db, &id).await
}

/// Get an appointment by id
pub async fn get(db: &Pool<Sqlite>, id: &str) -> Result<Appointment> {
    let sql = format!(
        "SELECT {} FROM appointments WHERE id = ?",
        APPOINTMENT_COLUMNS
    );
    sqlx::query_as::<_, Appointment>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("appointment {}", id)))
}

/// List appointments in schedule order
pub async fn list(db: &Pool<Sqlite>) -> Result<Vec<Appointment>> {
    let sql = format!(
        "SELECT {} FROM appointments ORDER BY scheduled_at ASC",
        APPOINTMENT_COLUMNS
    );
    let appointments = sqlx::query_as::<_, Appointment>(&sql).fetch_all(db).await?;
    Ok(appointments)
}

/// Update an appointment's fields and status; returns the stored record
pub async fn update(
    db: &Pool<Sqlite>,
    id: &str,
    input: &AppointmentInput,
    status: Option<AppointmentStatus>,
) -> Result<Appointment> {
    let now = chrono::Utc::now().to_rfc3339();
    let current = get(db, id).await?;
    let status = status.map(|s| s.as_str().to_string()).unwrap_or(current.status);

    sqlx::query(
        r#"
        UPDATE appointments SET
            lead_id = ?, title = ?, notes = ?, scheduled_at = ?,
            duration_minutes = ?, status = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.lead_id)
    .bind(&input.title)
    .bind(&input.notes)
    .bind(&input.scheduled_at)
    .bind(input.duration_minutes.unwrap_or(current.duration_minutes))
    .bind(&status)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?;

    get(db, id).await
}
