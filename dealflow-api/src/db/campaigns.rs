//! Campaign database queries

use crate::error::{Error, Result};
use dealflow_common::db::models::{Campaign, CampaignStatus};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

const CAMPAIGN_COLUMNS: &str = "id, name, campaign_type, status, target_criteria, \
     message_template, sent_count, response_count, created_at, updated_at";

/// Fields accepted when creating or updating a campaign
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CampaignInput {
    pub name: String,
    pub campaign_type: String,
    pub target_criteria: Option<String>,
    pub message_template: Option<String>,
}

/// Insert a new campaign in draft status; returns the stored record
pub async fn insert(db: &Pool<Sqlite>, input: &CampaignInput) -> Result<Campaign> {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO campaigns (
            id, name, campaign_type, status, target_criteria,
            message_template, sent_count, response_count, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&input.name)
    .bind(&input.campaign_type)
    .bind(CampaignStatus::Draft.as_str())
    .bind(&input.target_criteria)
    .bind(&input.message_template)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    get(db, &id).await
}

/// Get a campaign by id
pub async fn get(db: &Pool<Sqlite>, id: &str) -> Result<Campaign> {
    let sql = format!("SELECT {} FROM campaigns WHERE id = ?", CAMPAIGN_COLUMNS);
    sqlx::query_as::<_, Campaign>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("campaign {}", id)))
}

/// List campaigns, newest first
pub async fn list(db: &Pool<Sqlite>) -> Result<Vec<Campaign>> {
    let sql = format!(
        "SELECT {} FROM campaigns ORDER BY created_at DESC",
        CAMPAIGN_COLUMNS
    );
    let campaigns = sqlx::query_as::<_, Campaign>(&sql).fetch_all(db).await?;
    Ok(campaigns)
}

/// Update a campaign's editable fields and status; returns the stored record
pub async fn update(
    db: &Pool<Sqlite>,
    id: &str,
    input: &CampaignInput,
    status: Option<CampaignStatus>,
) -> Result<Campaign> {
    let now = chrono::Utc::now().to_rfc3339();
    let current = get(db, id).await?;
    let status = status.map(|s| s.as_str().to_string()).unwrap_or(current.status);

    sqlx::query(
        r#"
        UPDATE campaigns SET
            name = ?, campaign_type = ?, status = ?, target_criteria = ?,
            message_template = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.campaign_type)
    .bind(&status)
    .bind(&input.target_criteria)
    .bind(&input.message_template)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?;

    get(db, id).await
}

/// Record campaign activity counters
pub async fn record_activity(
    db: &Pool<Sqlite>,
    id: &str,
    sent_delta: i64,
    response_delta: i64,
) -> Result<Campaign> {
    let now = chrono::Utc::now().to_rfc3339();
    let result = sqlx::query(
        "UPDATE campaigns SET sent_count = sent_count + ?, \
         response_count = response_count + ?, updated_at = ? WHERE id = ?",
    )
    .bind(sent_delta)
    .bind(response_delta)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("campaign {}", id)));
    }
    get(db, id).await
}
