//! HTTP server setup and routing
//!
//! Sets up the Axum router with all feature-area routes. Authentication
//! is deliberately absent: the service runs behind the operator's own
//! perimeter and the dashboard talks to it directly.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::{Pool, Sqlite};
use tower_http::cors::CorsLayer;

/// Shared application context passed to all handlers
///
/// **Note:** AppContext implements Clone, which gives us `FromRef<AppContext>`
/// for free via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub db_pool: Pool<Sqlite>,
}

/// Create the API router
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(super::handlers::health))

        // Properties
        .route("/properties", get(super::properties::list_properties))
        .route("/properties", post(super::properties::create_property))
        .route("/properties/sample", post(super::sample_data::load_sample_properties))
        .route("/properties/:id", get(super::properties::get_property))
        .route("/properties/:id", put(super::properties::update_property))
        .route("/properties/:id", delete(super::properties::deactivate_property))
        .route("/properties/:id/analyses", get(super::analysis::list_property_analyses))

        // Leads
        .route("/leads", get(super::leads::list_leads))
        .route("/leads", post(super::leads::create_lead))
        .route("/leads/:id", get(super::leads::get_lead))
        .route("/leads/:id", put(super::leads::update_lead))
        .route("/leads/:id/status", post(super::leads::set_lead_status))
        .route("/leads/:id/communications", get(super::communications::list_lead_communications))

        // Campaigns
        .route("/campaigns", get(super::campaigns::list_campaigns))
        .route("/campaigns", post(super::campaigns::create_campaign))
        .route("/campaigns/:id", get(super::campaigns::get_campaign))
        .route("/campaigns/:id", put(super::campaigns::update_campaign))
        .route("/campaigns/:id/activity", post(super::campaigns::record_campaign_activity))

        // Communications
        .route("/communications", get(super::communications::list_communications))
        .route("/communications", post(super::communications::log_communication))

        // Schedule
        .route("/appointments", get(super::schedule::list_appointments))
        .route("/appointments", post(super::schedule::create_appointment))
        .route("/appointments/:id", get(super::schedule::get_appointment))
        .route("/appointments/:id", put(super::schedule::update_appointment))

        // Valuation and strategy analysis
        .route("/analysis/comparables", post(super::analysis::find_comparables))
        .route("/analysis/strategy", post(super::analysis::analyze_strategy))

        // Settings management
        .route("/settings/all", get(super::handlers::get_all_settings))
        .route("/settings/bulk_update", post(super::handlers::bulk_update_settings))

        // Attach application context
        .with_state(ctx)

        // Enable CORS for dashboard access
        .layer(CorsLayer::permissive())
}
