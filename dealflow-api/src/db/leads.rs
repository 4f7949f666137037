//! Lead database queries

use crate::error::{Error, Result};
use dealflow_common::db::models::{Lead, LeadStatus};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

const LEAD_COLUMNS: &str = "id, property_id, owner_name, owner_phone, owner_email, \
     status, lead_score, assigned_to, notes, created_at, updated_at";

/// Fields accepted when creating or updating a lead
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct LeadInput {
    pub property_id: Option<String>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub owner_email: Option<String>,
    pub lead_score: Option<i64>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

/// Insert a new lead with status `new`; returns the stored record
pub async fn insert(db: &Pool<Sqlite>, input: &LeadInput) -> Result<Lead> {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO leads (
            id, property_id, owner_name, owner_phone, owner_email,
            status, lead_score, assigned_to, notes, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&input.property_id)
    .bind(&input.owner_name)
    .bind(&input.owner_phone)
    .bind(&input.owner_email)
    .bind(LeadStatus::New.as_str())
    .bind(input.lead_score)
    .bind(&input.assigned_to)
    .bind(&input.notes)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    get(db, &id).await
}

/// Get a lead by id
pub async fn get(db: &Pool<Sqlite>, id: &str) -> Result<Lead> {
    let sql = format!("SELECT {} FROM leads WHERE id = ?", LEAD_COLUMNS);
    sqlx::query_as::<_, Lead>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("lead {}", id)))
}

/// List leads, newest first, optionally filtered by status
pub async fn list(db: &Pool<Sqlite>, status: Option<&str>) -> Result<Vec<Lead>> {
    let leads = match status {
        Some(status) => {
            let sql = format!(
                "SELECT {} FROM leads WHERE status = ? ORDER BY created_at DESC",
                LEAD_COLUMNS
            );
            sqlx::query_as::<_, Lead>(&sql)
                .bind(status)
                .fetch_all(db)
                .await?
        }
        None => {
            let sql = format!("SELECT {} FROM leads ORDER BY created_at DESC", LEAD_COLUMNS);
            sqlx::query_as::<_, Lead>(&sql).fetch_all(db).await?
        }
    };
    Ok(leads)
}

/// Update a lead's editable fields; returns the stored record
pub async fn update(db: &Pool<Sqlite>, id: &str, input: &LeadInput) -> Result<Lead> {
    let now = chrono::Utc::now().to_rfc3339();
    let result = sqlx::query(
        r#"
        UPDATE leads SET
            property_id = ?, owner_name = ?, owner_phone = ?, owner_email = ?,
            lead_score = ?, assigned_to = ?, notes = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.property_id)
    .bind(&input.owner_name)
    .bind(&input.owner_phone)
    .bind(&input.owner_email)
    .bind(input.lead_score)
    .bind(&input.assigned_to)
    .bind(&input.notes)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("lead {}", id)));
    }
    get(db, id).await
}

/// Transition a lead to a new status
pub async fn set_status(db: &Pool<Sqlite>, id: &str, status: LeadStatus) -> Result<Lead> {
    let now = chrono::Utc::now().to_rfc3339();
    let result = sqlx::query("UPDATE leads SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(&now)
        .bind(id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("lead {}", id)));
    }
    get(db, id).await
}
