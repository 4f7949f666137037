//! Settings database access
//!
//! Read/write settings from the settings table (key-value store).
//! All settings are global/system-wide.

use crate::error::{Error, Result};
use dealflow_common::db::models::Setting;
use dealflow_common::valuation::CompConfig;
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// Generic setting getter
pub async fn get_setting<T: FromStr>(db: &Pool<Sqlite>, key: &str) -> Result<Option<T>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await?;

    match value {
        Some(s) => match s.parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(Error::Config(format!(
                "Failed to parse setting '{}' value: {}",
                key, s
            ))),
        },
        None => Ok(None),
    }
}

/// Generic setting setter
///
/// Inserts or updates the setting in the database.
pub async fn set_setting<T: ToString>(db: &Pool<Sqlite>, key: &str, value: T) -> Result<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(db)
    .await?;
    Ok(())
}

/// List all settings
pub async fn get_all_settings(db: &Pool<Sqlite>) -> Result<Vec<Setting>> {
    let settings = sqlx::query_as::<_, Setting>("SELECT key, value FROM settings ORDER BY key")
        .fetch_all(db)
        .await?;
    Ok(settings)
}

/// Comparable-search configuration from the settings table
///
/// Missing keys fall back to the engine defaults.
pub async fn get_comp_config(db: &Pool<Sqlite>) -> Result<CompConfig> {
    let defaults = CompConfig::default();
    Ok(CompConfig {
        max_distance_miles: get_setting::<f64>(db, "comp_max_distance_miles")
            .await?
            .unwrap_or(defaults.max_distance_miles),
        max_age_days: get_setting::<i64>(db, "comp_max_age_days")
            .await?
            .unwrap_or(defaults.max_age_days),
        min_comps: get_setting::<usize>(db, "comp_min_count")
            .await?
            .unwrap_or(defaults.min_comps),
    })
}
