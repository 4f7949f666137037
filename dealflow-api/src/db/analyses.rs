//! Persisted valuation-run queries

use crate::error::{Error, Result};
use dealflow_common::db::models::AnalysisRecord;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

const ANALYSIS_COLUMNS: &str =
    "id, property_id, estimated_value, confidence_score, comp_count, strategy, created_at";

/// Persist one valuation run; returns the stored record
pub async fn insert(
    db: &Pool<Sqlite>,
    property_id: &str,
    estimated_value: f64,
    confidence_score: f64,
    comp_count: i64,
    strategy: Option<&str>,
) -> Result<AnalysisRecord> {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO analyses (
            id, property_id, estimated_value, confidence_score,
            comp_count, strategy, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(property_id)
    .bind(estimated_value)
    .bind(confidence_score)
    .bind(comp_count)
    .bind(strategy)
    .bind(&now)
    .execute(db)
    .await?;

    get(db, &id).await
}

/// Get an analysis record by id
pub async fn get(db: &Pool<Sqlite>, id: &str) -> Result<AnalysisRecord> {
    let sql = format!("SELECT {} FROM analyses WHERE id = ?", ANALYSIS_COLUMNS);
    sqlx::query_as::<_, AnalysisRecord>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("analysis {}", id)))
}

/// Valuation history for one property, most recent first
pub async fn list_for_property(db: &Pool<Sqlite>, property_id: &str) -> Result<Vec<AnalysisRecord>> {
    let sql = format!(
        "SELECT {} FROM analyses WHERE property_id = ? ORDER BY created_at DESC",
        ANALYSIS_COLUMNS
    );
    let records = sqlx::query_as::<_, AnalysisRecord>(&sql)
        .bind(property_id)
        .fetch_all(db)
        .await?;
    Ok(records)
}
