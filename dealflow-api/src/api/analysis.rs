//! Valuation and strategy analysis endpoints
//!
//! Pulls candidate comparables from the store, applies the distance/age
//! prefilter the engine expects its callers to perform, runs the
//! comparable valuation engine, and persists the resulting estimate.
//! Configuration validation happens here at the boundary; the engine
//! itself never rejects input.

use crate::api::handlers::{error_response, ApiError};
use crate::api::server::AppContext;
use crate::error::Error;
use axum::{
    extract::{Path, State},
    Json,
};
use dealflow_common::db::models::{AnalysisRecord, Property};
use dealflow_common::valuation::{
    self, CompConfig, CompSort, ComparableCandidate, ScoredComparable, StrategyAssumptions,
    StrategyKind, StrategyMetrics, SubjectProperty, ValuationEstimate,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ComparablesRequest {
    /// Subject property id in the store
    pub property_id: String,
    /// Candidate override; when absent, candidates come from the store
    pub candidates: Option<Vec<ComparableCandidate>>,
    pub max_distance_miles: Option<f64>,
    pub max_age_days: Option<i64>,
    pub min_comps: Option<usize>,
    #[serde(default)]
    pub sort: CompSort,
}

#[derive(Debug, Serialize)]
pub struct ComparablesResponse {
    pub property_id: String,
    pub comparables: Vec<ScoredComparable>,
    pub estimate: ValuationEstimate,
    pub comp_count: usize,
    /// True when fewer candidates survived filtering than min_comps
    pub below_min_comps: bool,
}

#[derive(Debug, Deserialize)]
pub struct StrategyRequest {
    pub strategy: String,
    /// Purchase price; when absent, taken from the referenced property
    pub purchase_price: Option<f64>,
    pub property_id: Option<String>,
    #[serde(default)]
    pub assumptions: StrategyAssumptions,
}

#[derive(Debug, Serialize)]
pub struct StrategyResponse {
    pub purchase_price: f64,
    pub metrics: StrategyMetrics,
}

#[derive(Debug, Serialize)]
pub struct AnalysisListResponse {
    pub analyses: Vec<AnalysisRecord>,
}

// ============================================================================
// Comparables Endpoint
// ============================================================================

/// POST /analysis/comparables - Run the comparable valuation engine
pub async fn find_comparables(
    State(ctx): State<AppContext>,
    Json(req): Json<ComparablesRequest>,
) -> Result<Json<ComparablesResponse>, ApiError> {
    let stored = match crate::db::settings::get_comp_config(&ctx.db_pool).await {
        Ok(config) => config,
        Err(e) => return Err(error_response(e)),
    };
    let config = CompConfig {
        max_distance_miles: req.max_distance_miles.unwrap_or(stored.max_distance_miles),
        max_age_days: req.max_age_days.unwrap_or(stored.max_age_days),
        min_comps: req.min_comps.unwrap_or(stored.min_comps),
    };
    if config.max_distance_miles <= 0.0 {
        return Err(error_response(Error::BadRequest(
            "max_distance_miles must be positive".to_string(),
        )));
    }
    if config.max_age_days <= 0 {
        return Err(error_response(Error::BadRequest(
            "max_age_days must be positive".to_string(),
        )));
    }

    let property = match crate::db::properties::get(&ctx.db_pool, &req.property_id).await {
        Ok(property) => property,
        Err(e) => return Err(error_response(e)),
    };
    let subject = subject_from_property(&property);

    let candidates = match req.candidates {
        Some(candidates) => candidates,
        None => match candidates_from_store(&ctx, &property, &config).await {
            Ok(candidates) => candidates,
            Err(e) => return Err(error_response(e)),
        },
    };

    let result = valuation::find_comparables(&subject, &candidates, &config, req.sort);
    let comp_count = result.comparables.len();
    let below_min_comps = comp_count < config.min_comps;
    if below_min_comps {
        warn!(
            "Property {}: only {} comparables (min {})",
            req.property_id, comp_count, config.min_comps
        );
    }

    // Persist the run so the dashboard can show valuation history
    if let Err(e) = crate::db::analyses::insert(
        &ctx.db_pool,
        &req.property_id,
        result.estimate.estimated_value,
        result.estimate.confidence_score,
        comp_count as i64,
        None,
    )
    .await
    {
        return Err(error_response(e));
    }

    info!(
        "Valued property {}: ${:.0} at confidence {:.2} from {} comps",
        req.property_id,
        result.estimate.estimated_value,
        result.estimate.confidence_score,
        comp_count
    );

    Ok(Json(ComparablesResponse {
        property_id: req.property_id,
        comparables: result.comparables,
        estimate: result.estimate,
        comp_count,
        below_min_comps,
    }))
}

/// GET /properties/:id/analyses - Persisted valuation history
pub async fn list_property_analyses(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisListResponse>, ApiError> {
    if let Err(e) = crate::db::properties::get(&ctx.db_pool, &id).await {
        return Err(error_response(e));
    }
    match crate::db::analyses::list_for_property(&ctx.db_pool, &id).await {
        Ok(analyses) => Ok(Json(AnalysisListResponse { analyses })),
        Err(e) => Err(error_response(e)),
    }
}

// ============================================================================
// Strategy Endpoint
// ============================================================================

/// POST /analysis/strategy - Run a financial-strategy calculator
pub async fn analyze_strategy(
    State(ctx): State<AppContext>,
    Json(req): Json<StrategyRequest>,
) -> Result<Json<StrategyResponse>, ApiError> {
    let kind: StrategyKind = match req.strategy.parse() {
        Ok(kind) => kind,
        Err(msg) => return Err(error_response(Error::BadRequest(msg))),
    };

    let purchase_price = match (req.purchase_price, &req.property_id) {
        (Some(price), _) => price,
        (None, Some(property_id)) => {
            let property = match crate::db::properties::get(&ctx.db_pool, property_id).await {
                Ok(property) => property,
                Err(e) => return Err(error_response(e)),
            };
            match property.listing_price.or(property.assessed_value) {
                Some(price) => price,
                None => {
                    return Err(error_response(Error::BadRequest(format!(
                        "property {} has no listing price or assessed value",
                        property_id
                    ))))
                }
            }
        }
        (None, None) => {
            return Err(error_response(Error::BadRequest(
                "purchase_price or property_id is required".to_string(),
            )))
        }
    };
    if purchase_price < 0.0 {
        return Err(error_response(Error::BadRequest(
            "purchase_price must be non-negative".to_string(),
        )));
    }

    let metrics = valuation::analyze_strategy(kind, purchase_price, &req.assumptions);

    // Attach the run to the property's history when one was referenced
    if let Some(property_id) = &req.property_id {
        let strategy_json = serde_json::to_string(&metrics)
            .map_err(|e| error_response(Error::Internal(e.to_string())))?;
        if let Err(e) = crate::db::analyses::insert(
            &ctx.db_pool,
            property_id,
            purchase_price,
            0.0,
            0,
            Some(&strategy_json),
        )
        .await
        {
            return Err(error_response(e));
        }
    }

    Ok(Json(StrategyResponse {
        purchase_price,
        metrics,
    }))
}

// ============================================================================
// Candidate Derivation
// ============================================================================

fn subject_from_property(property: &Property) -> SubjectProperty {
    SubjectProperty {
        bedrooms: property.bedrooms.map(|b| b as f64),
        bathrooms: property.bathrooms,
        square_feet: property.square_feet,
        garage_spaces: property.garage_spaces.map(|g| g as f64),
    }
}

/// Pull priced properties from the store and apply the distance/age
/// prefilter around the subject
async fn candidates_from_store(
    ctx: &AppContext,
    subject: &Property,
    config: &CompConfig,
) -> crate::error::Result<Vec<ComparableCandidate>> {
    let (subject_lat, subject_lon) = match (subject.latitude, subject.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(Error::BadRequest(format!(
                "property {} has no coordinates; cannot search for comparables",
                subject.id
            )))
        }
    };

    let rows = crate::db::properties::candidate_rows(&ctx.db_pool, &subject.id).await?;
    let now = chrono::Utc::now();

    let mut candidates = Vec::new();
    for row in rows {
        let (lat, lon) = match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => continue,
        };
        let distance = haversine_miles(subject_lat, subject_lon, lat, lon);
        if distance > config.max_distance_miles {
            continue;
        }

        let days_since_sale = row.sale_date.as_deref().and_then(|d| days_since(d, now));
        if let Some(days) = days_since_sale {
            if days > config.max_age_days as f64 {
                continue;
            }
        }
        let days_on_market = match (row.listed_date.as_deref(), row.sale_date.as_deref()) {
            (Some(listed), Some(sold)) => days_between(listed, sold),
            (Some(listed), None) => days_since(listed, now),
            _ => None,
        };

        candidates.push(ComparableCandidate {
            address: Some(row.address),
            bedrooms: row.bedrooms.map(|b| b as f64),
            bathrooms: row.bathrooms,
            square_feet: row.square_feet,
            garage_spaces: row.garage_spaces.map(|g| g as f64),
            sale_price: row.sale_price,
            listing_price: row.listing_price,
            distance_miles: Some(distance),
            days_since_sale,
            days_on_market,
        });
    }

    Ok(candidates)
}

/// Great-circle distance between two coordinates, in miles
fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_MILES: f64 = 3958.8;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Whole days from an ISO-8601 date/datetime to `now`; None if unparseable
fn days_since(date: &str, now: chrono::DateTime<chrono::Utc>) -> Option<f64> {
    parse_date(date).map(|d| (now.date_naive() - d).num_days() as f64)
}

/// Whole days between two ISO-8601 dates; None if either is unparseable
fn days_between(start: &str, end: &str) -> Option<f64> {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => Some((e - s).num_days() as f64),
        _ => None,
    }
}

fn parse_date(raw: &str) -> Option<chrono::NaiveDate> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_distance() {
        assert_eq!(haversine_miles(39.7392, -104.9903, 39.7392, -104.9903), 0.0);
    }

    #[test]
    fn haversine_known_distance() {
        // Denver to Colorado Springs is roughly 63 miles
        let d = haversine_miles(39.7392, -104.9903, 38.8339, -104.8214);
        assert!((60.0..70.0).contains(&d), "distance = {}", d);
    }

    #[test]
    fn parse_date_accepts_both_formats() {
        assert!(parse_date("2026-05-01").is_some());
        assert!(parse_date("2026-05-01T12:30:00+00:00").is_some());
        assert!(parse_date("May 1st").is_none());
    }

    #[test]
    fn days_between_ordered_dates() {
        assert_eq!(days_between("2026-01-01", "2026-01-31"), Some(30.0));
    }
}
