//! Bulk sample-data load
//!
//! Seeds a small fixed neighborhood of properties so a fresh install has
//! something to render and value. Idempotence is the caller's concern:
//! every call inserts a fresh batch.

use crate::api::handlers::{error_response, ApiError};
use crate::api::server::AppContext;
use crate::db::properties::{self, PropertyInput};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct SampleLoadResponse {
    pub inserted: usize,
    pub property_ids: Vec<String>,
}

/// POST /properties/sample - Insert the sample property set
pub async fn load_sample_properties(
    State(ctx): State<AppContext>,
) -> Result<(StatusCode, Json<SampleLoadResponse>), ApiError> {
    let mut property_ids = Vec::new();
    for input in sample_properties() {
        match properties::insert(&ctx.db_pool, &input).await {
            Ok(property) => property_ids.push(property.id),
            Err(e) => return Err(error_response(e)),
        }
    }

    info!("Loaded {} sample properties", property_ids.len());
    Ok((
        StatusCode::CREATED,
        Json(SampleLoadResponse {
            inserted: property_ids.len(),
            property_ids,
        }),
    ))
}

/// A small Denver-area neighborhood: one subject-style listing plus
/// recently sold comparables within a couple of miles
fn sample_properties() -> Vec<PropertyInput> {
    let recent = |days: i64| {
        (chrono::Utc::now() - chrono::Duration::days(days))
            .date_naive()
            .to_string()
    };

    vec![
        PropertyInput {
            address: "1420 Larimer St".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            zip: "80202".to_string(),
            latitude: Some(39.7480),
            longitude: Some(-104.9990),
            property_type: Some("single_family".to_string()),
            bedrooms: Some(3),
            bathrooms: Some(2.0),
            square_feet: Some(1850.0),
            lot_size: Some(6200.0),
            year_built: Some(1978),
            garage_spaces: Some(2),
            listing_price: Some(485_000.0),
            assessed_value: Some(452_000.0),
            tax_amount: Some(2_710.0),
            condition_score: Some(0.7),
            ..Default::default()
        },
        PropertyInput {
            address: "1515 Blake St".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            zip: "80202".to_string(),
            latitude: Some(39.7505),
            longitude: Some(-105.0008),
            property_type: Some("single_family".to_string()),
            bedrooms: Some(3),
            bathrooms: Some(2.5),
            square_feet: Some(1980.0),
            lot_size: Some(5800.0),
            year_built: Some(1982),
            garage_spaces: Some(2),
            sale_price: Some(512_000.0),
            sale_date: Some(recent(45)),
            listed_date: Some(recent(90)),
            condition_score: Some(0.8),
            ..Default::default()
        },
        PropertyInput {
            address: "1660 Wynkoop St".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            zip: "80202".to_string(),
            latitude: Some(39.7528),
            longitude: Some(-105.0021),
            property_type: Some("single_family".to_string()),
            bedrooms: Some(2),
            bathrooms: Some(1.0),
            square_feet: Some(1410.0),
            lot_size: Some(4400.0),
            year_built: Some(1965),
            garage_spaces: Some(1),
            sale_price: Some(398_000.0),
            sale_date: Some(recent(120)),
            listed_date: Some(recent(160)),
            condition_score: Some(0.5),
            ..Default::default()
        },
        PropertyInput {
            address: "2001 Market St".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            zip: "80205".to_string(),
            latitude: Some(39.7555),
            longitude: Some(-104.9940),
            property_type: Some("single_family".to_string()),
            bedrooms: Some(4),
            bathrooms: Some(3.0),
            square_feet: Some(2320.0),
            lot_size: Some(7100.0),
            year_built: Some(1994),
            garage_spaces: Some(2),
            sale_price: Some(565_000.0),
            sale_date: Some(recent(30)),
            listed_date: Some(recent(55)),
            condition_score: Some(0.9),
            ..Default::default()
        },
        PropertyInput {
            address: "2240 Curtis St".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            zip: "80205".to_string(),
            latitude: Some(39.7540),
            longitude: Some(-104.9860),
            property_type: Some("single_family".to_string()),
            bedrooms: Some(3),
            bathrooms: Some(2.0),
            square_feet: Some(1790.0),
            lot_size: Some(6000.0),
            year_built: Some(1971),
            garage_spaces: None,
            listing_price: Some(468_000.0),
            listed_date: Some(recent(20)),
            condition_score: Some(0.6),
            ..Default::default()
        },
    ]
}
