//! Database initialization
//!
//! Creates the SQLite database on first run with the full schema and
//! seeded default settings. All `CREATE TABLE` statements are idempotent
//! so initialization is safe to run on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_and_migrate(&pool).await?;

    Ok(pool)
}

/// Initialize an in-memory database (test support)
pub async fn init_database_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    configure_and_migrate(&pool).await?;
    Ok(pool)
}

async fn configure_and_migrate(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    // Schema creation (idempotent)
    create_properties_table(pool).await?;
    create_leads_table(pool).await?;
    create_campaigns_table(pool).await?;
    create_communications_table(pool).await?;
    create_appointments_table(pool).await?;
    create_analyses_table(pool).await?;
    create_settings_table(pool).await?;

    init_default_settings(pool).await?;

    Ok(())
}

async fn create_properties_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS properties (
            id TEXT PRIMARY KEY,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            zip TEXT NOT NULL,
            latitude REAL,
            longitude REAL,
            property_type TEXT,
            bedrooms INTEGER,
            bathrooms REAL,
            square_feet REAL,
            lot_size REAL,
            year_built INTEGER,
            garage_spaces INTEGER,
            listing_price REAL,
            sale_price REAL,
            sale_date TEXT,
            listed_date TEXT,
            assessed_value REAL,
            tax_amount REAL,
            condition_score REAL,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_leads_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leads (
            id TEXT PRIMARY KEY,
            property_id TEXT REFERENCES properties(id),
            owner_name TEXT NOT NULL,
            owner_phone TEXT,
            owner_email TEXT,
            status TEXT NOT NULL DEFAULT 'new',
            lead_score INTEGER,
            assigned_to TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_campaigns_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campaigns (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            campaign_type TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'draft',
            target_criteria TEXT,
            message_template TEXT,
            sent_count INTEGER NOT NULL DEFAULT 0,
            response_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_communications_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS communications (
            id TEXT PRIMARY KEY,
            lead_id TEXT NOT NULL REFERENCES leads(id),
            direction TEXT NOT NULL,
            channel TEXT NOT NULL,
            subject TEXT,
            body TEXT,
            outcome TEXT,
            occurred_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_appointments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id TEXT PRIMARY KEY,
            lead_id TEXT NOT NULL REFERENCES leads(id),
            title TEXT NOT NULL,
            notes TEXT,
            scheduled_at TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL DEFAULT 30,
            status TEXT NOT NULL DEFAULT 'scheduled',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_analyses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analyses (
            id TEXT PRIMARY KEY,
            property_id TEXT NOT NULL REFERENCES properties(id),
            estimated_value REAL NOT NULL,
            confidence_score REAL NOT NULL,
            comp_count INTEGER NOT NULL,
            strategy TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Seed default settings on first run
///
/// `INSERT OR IGNORE` leaves existing values untouched so operator
/// overrides survive restarts.
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    let defaults: &[(&str, &str)] = &[
        ("comp_max_distance_miles", "2.0"),
        ("comp_max_age_days", "180"),
        ("comp_min_count", "3"),
    ];

    for (key, value) in defaults {
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(pool)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_init_creates_schema_and_defaults() {
        let pool = init_database_in_memory().await.unwrap();

        // Schema exists
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        for expected in [
            "analyses",
            "appointments",
            "campaigns",
            "communications",
            "leads",
            "properties",
            "settings",
        ] {
            assert!(names.contains(&expected), "missing table {}", expected);
        }

        // Defaults seeded
        let (value,): (String,) =
            sqlx::query_as("SELECT value FROM settings WHERE key = 'comp_max_distance_miles'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(value, "2.0");
    }

    #[tokio::test]
    async fn on_disk_init_creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("dealflow.db");
        let _pool = init_database(&db_path).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let pool = init_database_in_memory().await.unwrap();
        // Running migration again must not fail or clobber settings
        sqlx::query("UPDATE settings SET value = '5.0' WHERE key = 'comp_max_distance_miles'")
            .execute(&pool)
            .await
            .unwrap();
        configure_and_migrate(&pool).await.unwrap();
        let (value,): (String,) =
            sqlx::query_as("SELECT value FROM settings WHERE key = 'comp_max_distance_miles'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(value, "5.0");
    }
}
