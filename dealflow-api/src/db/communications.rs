//! Communication log database queries

use crate::error::{Error, Result};
use dealflow_common::db::models::Communication;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

const COMMUNICATION_COLUMNS: &str =
    "id, lead_id, direction, channel, subject, body, outcome, occurred_at";

/// Fields accepted when logging a communication
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CommunicationInput {
    pub lead_id: String,
    pub direction: String,
    pub channel: String,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub outcome: Option<String>,
    /// Defaults to now when absent
    pub occurred_at: Option<String>,
}

/// Log a communication; returns the stored record
pub async fn insert(db: &Pool<Sqlite>, input: &CommunicationInput) -> Result<Communication> {
    let id = Uuid::new_v4().to_string();
    let occurred_at = input
        .occurred_at
        .clone()
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    sqlx::query(
        r#"
        INSERT INTO communications (
            id, lead_id, direction, channel, subject, body, outcome, occurred_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&input.lead_id)
    .bind(&input.direction)
    .bind(&input.channel)
    .bind(&input.subject)
    .bind(&input.body)
    .bind(&input.outcome)
    .bind(&occurred_at)
    .execute(db)
    .await?;

    get(db, &id).await
}

/// Get a communication by id
pub async fn get(db: &Pool<Sqlite>, id: &str) -> Result<Communication> {
    let sql = format!(
        "SELECT {} FROM communications WHERE id = ?",
        COMMUNICATION_COLUMNS
    );
    sqlx::query_as::<_, Communication>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("communication {}", id)))
}

/// List all communications, most recent first
pub async fn list(db: &Pool<Sqlite>) -> Result<Vec<Communication>> {
    let sql = format!(
        "SELECT {} FROM communications ORDER BY occurred_at DESC",
        COMMUNICATION_COLUMNS
    );
    let communications = sqlx::query_as::<_, Communication>(&sql)
        .fetch_all(db)
        .await?;
    Ok(communications)
}

/// Communication history for one lead, most recent first
pub async fn list_for_lead(db: &Pool<Sqlite>, lead_id: &str) -> Result<Vec<Communication>> {
    let sql = format!(
        "SELECT {} FROM communications WHERE lead_id = ? ORDER BY occurred_at DESC",
        COMMUNICATION_COLUMNS
    );
    let communications = sqlx::query_as::<_, Communication>(&sql)
        .bind(lead_id)
        .fetch_all(db)
        .await?;
    Ok(communications)
}
