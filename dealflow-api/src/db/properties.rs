//! Property database queries

use crate::error::{Error, Result};
use dealflow_common::db::models::{Property, PropertyStatus};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

const PROPERTY_COLUMNS: &str = "id, address, city, state, zip, latitude, longitude, \
     property_type, bedrooms, bathrooms, square_feet, lot_size, year_built, garage_spaces, \
     listing_price, sale_price, sale_date, listed_date, assessed_value, tax_amount, \
     condition_score, status, created_at, updated_at";

/// Fields accepted when creating or updating a property
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PropertyInput {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<f64>,
    pub lot_size: Option<f64>,
    pub year_built: Option<i64>,
    pub garage_spaces: Option<i64>,
    pub listing_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub sale_date: Option<String>,
    pub listed_date: Option<String>,
    pub assessed_value: Option<f64>,
    pub tax_amount: Option<f64>,
    pub condition_score: Option<f64>,
}

/// Insert a new property; returns the stored record
pub async fn insert(db: &Pool<Sqlite>, input: &PropertyInput) -> Result<Property> {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO properties (
            id, address, city, state, zip, latitude, longitude,
            property_type, bedrooms, bathrooms, square_feet, lot_size,
            year_built, garage_spaces, listing_price, sale_price, sale_date,
            listed_date, assessed_value, tax_amount, condition_score,
            status, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&input.address)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.zip)
    .bind(input.latitude)
    .bind(input.longitude)
    .bind(&input.property_type)
    .bind(input.bedrooms)
    .bind(input.bathrooms)
    .bind(input.square_feet)
    .bind(input.lot_size)
    .bind(input.year_built)
    .bind(input.garage_spaces)
    .bind(input.listing_price)
    .bind(input.sale_price)
    .bind(&input.sale_date)
    .bind(&input.listed_date)
    .bind(input.assessed_value)
    .bind(input.tax_amount)
    .bind(input.condition_score)
    .bind(PropertyStatus::Active.as_str())
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    get(db, &id).await
}

/// Get a property by id
pub async fn get(db: &Pool<Sqlite>, id: &str) -> Result<Property> {
    let sql = format!("SELECT {} FROM properties WHERE id = ?", PROPERTY_COLUMNS);
    sqlx::query_as::<_, Property>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("property {}", id)))
}

/// List properties, newest first, optionally filtered by status
pub async fn list(db: &Pool<Sqlite>, status: Option<&str>) -> Result<Vec<Property>> {
    let properties = match status {
        Some(status) => {
            let sql = format!(
                "SELECT {} FROM properties WHERE status = ? ORDER BY created_at DESC",
                PROPERTY_COLUMNS
            );
            sqlx::query_as::<_, Property>(&sql)
                .bind(status)
                .fetch_all(db)
                .await?
        }
        None => {
            let sql = format!(
                "SELECT {} FROM properties ORDER BY created_at DESC",
                PROPERTY_COLUMNS
            );
            sqlx::query_as::<_, Property>(&sql).fetch_all(db).await?
        }
    };
    Ok(properties)
}

/// Update a property's editable fields; returns the stored record
pub async fn update(db: &Pool<Sqlite>, id: &str, input: &PropertyInput) -> Result<Property> {
    let now = chrono::Utc::now().to_rfc3339();
    let result = sqlx::query(
        r#"
        UPDATE properties SET
            address = ?, city = ?, state = ?, zip = ?, latitude = ?, longitude = ?,
            property_type = ?, bedrooms = ?, bathrooms = ?, square_feet = ?,
            lot_size = ?, year_built = ?, garage_spaces = ?, listing_price = ?,
            sale_price = ?, sale_date = ?, listed_date = ?, assessed_value = ?,
            tax_amount = ?, condition_score = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.address)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.zip)
    .bind(input.latitude)
    .bind(input.longitude)
    .bind(&input.property_type)
    .bind(input.bedrooms)
    .bind(input.bathrooms)
    .bind(input.square_feet)
    .bind(input.lot_size)
    .bind(input.year_built)
    .bind(input.garage_spaces)
    .bind(input.listing_price)
    .bind(input.sale_price)
    .bind(&input.sale_date)
    .bind(&input.listed_date)
    .bind(input.assessed_value)
    .bind(input.tax_amount)
    .bind(input.condition_score)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("property {}", id)));
    }
    get(db, id).await
}

/// Set a property's lifecycle status
///
/// Properties are never hard-deleted; API delete requests land here with
/// `PropertyStatus::Inactive`.
pub async fn set_status(db: &Pool<Sqlite>, id: &str, status: PropertyStatus) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let result = sqlx::query("UPDATE properties SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(&now)
        .bind(id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("property {}", id)));
    }
    Ok(())
}

/// Fetch comparable candidate rows for a subject property
///
/// Returns priced properties (sale or listing) with coordinates,
/// excluding the subject itself. Distance and sale-age filtering happens
/// in the analysis handler where the subject's coordinates are in hand.
pub async fn candidate_rows(db: &Pool<Sqlite>, exclude_id: &str) -> Result<Vec<Property>> {
    let sql = format!(
        "SELECT {} FROM properties \
         WHERE id != ? \
           AND (sale_price IS NOT NULL OR listing_price IS NOT NULL) \
           AND latitude IS NOT NULL AND longitude IS NOT NULL \
         ORDER BY created_at ASC",
        PROPERTY_COLUMNS
    );
    let rows = sqlx::query_as::<_, Property>(&sql)
        .bind(exclude_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}
