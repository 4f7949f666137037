//! Integration tests for the valuation and strategy endpoints
//!
//! Runs the comparable engine end-to-end through the router: sample-data
//! load, candidate prefiltering from the store, adjustment arithmetic in
//! the response, persisted analysis history, and boundary validation.

use axum::http::StatusCode;
use serde_json::{json, Value};

use dealflow_api::api::{create_router, AppContext};

async fn setup_test_app() -> axum::Router {
    let db_pool = dealflow_common::db::init::init_database_in_memory()
        .await
        .expect("Failed to initialize in-memory database");
    create_router(AppContext { db_pool })
}

async fn make_request(
    app: &axum::Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Option<Value>) {
    use axum::body::Body;
    use http::{Method, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let method = match method {
        "GET" => Method::GET,
        "POST" => Method::POST,
        _ => panic!("Unsupported method"),
    };

    let mut request = Request::builder().method(method).uri(path);
    let request = if let Some(json_body) = body {
        request = request.header("content-type", "application/json");
        request.body(Body::from(json_body.to_string())).unwrap()
    } else {
        request.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).ok();
    (status, value)
}

/// Load the sample neighborhood and return the subject property id
/// (the first sample is the active listing)
async fn load_samples(app: &axum::Router) -> String {
    let (status, body) = make_request(app, "POST", "/properties/sample", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert!(body["inserted"].as_u64().unwrap() >= 5);
    body["property_ids"][0].as_str().unwrap().to_string()
}

#[tokio::test]
async fn comparables_end_to_end_over_sample_data() {
    let app = setup_test_app().await;
    let subject_id = load_samples(&app).await;

    let (status, body) = make_request(
        &app,
        "POST",
        "/analysis/comparables",
        Some(json!({ "property_id": subject_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();

    let comparables = body["comparables"].as_array().unwrap();
    assert!(!comparables.is_empty(), "sample comps within 2 miles expected");
    assert_eq!(body["comp_count"].as_u64().unwrap() as usize, comparables.len());

    let confidence = body["estimate"]["confidence_score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
    assert!(body["estimate"]["estimated_value"].as_f64().unwrap() > 0.0);

    for comp in comparables {
        // Score invariant
        let similarity = comp["similarity_score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&similarity));

        // Arithmetic consistency: adjusted = price + sum(adjustments)
        let price = comp["effective_price"].as_f64().unwrap();
        let total: f64 = comp["adjustments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["amount"].as_f64().unwrap())
            .sum();
        let adjusted = comp["adjusted_value"].as_f64().unwrap();
        assert!((adjusted - (price + total)).abs() < 1e-9);
    }

    // Default sort is similarity descending
    let scores: Vec<f64> = comparables
        .iter()
        .map(|c| c["similarity_score"].as_f64().unwrap())
        .collect();
    for pair in scores.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[tokio::test]
async fn comparables_run_is_persisted_in_history() {
    let app = setup_test_app().await;
    let subject_id = load_samples(&app).await;

    let (_, _) = make_request(
        &app,
        "POST",
        "/analysis/comparables",
        Some(json!({ "property_id": subject_id })),
    )
    .await;

    let (status, body) = make_request(
        &app,
        "GET",
        &format!("/properties/{}/analyses", subject_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let analyses = body.unwrap();
    let rows = analyses["analyses"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["comp_count"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn explicit_candidates_bypass_the_store() {
    let app = setup_test_app().await;
    let subject_id = load_samples(&app).await;

    let (status, body) = make_request(
        &app,
        "POST",
        "/analysis/comparables",
        Some(json!({
            "property_id": subject_id,
            "candidates": [
                {
                    "square_feet": 1650.0,
                    "bedrooms": 3.0,
                    "bathrooms": 2.0,
                    "sale_price": 300000.0,
                    "distance_miles": 0.5,
                    "days_since_sale": 150.0
                }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["comp_count"], 1);
    assert_eq!(body["below_min_comps"], true);

    // Subject is 1850 sqft: (1850-1650)*100 = 20000; 150 days stale:
    // floor(150/30)*500 = 2500; 0.5 miles: no distance row
    let comp = &body["comparables"][0];
    let adjustments = comp["adjustments"].as_array().unwrap();
    let amount = |factor: &str| -> Option<f64> {
        adjustments
            .iter()
            .find(|a| a["factor"] == factor)
            .and_then(|a| a["amount"].as_f64())
    };
    assert_eq!(amount("square_footage"), Some(20_000.0));
    assert_eq!(amount("market_appreciation"), Some(2_500.0));
    assert_eq!(amount("distance"), None);
}

#[tokio::test]
async fn empty_candidate_list_degrades_to_zero_confidence() {
    let app = setup_test_app().await;
    let subject_id = load_samples(&app).await;

    let (status, body) = make_request(
        &app,
        "POST",
        "/analysis/comparables",
        Some(json!({ "property_id": subject_id, "candidates": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["comp_count"], 0);
    assert_eq!(body["estimate"]["confidence_score"], 0.0);
    assert_eq!(body["below_min_comps"], true);
}

#[tokio::test]
async fn malformed_config_is_rejected_at_the_boundary() {
    let app = setup_test_app().await;
    let subject_id = load_samples(&app).await;

    let (status, _) = make_request(
        &app,
        "POST",
        "/analysis/comparables",
        Some(json!({ "property_id": subject_id, "max_distance_miles": -1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = make_request(
        &app,
        "POST",
        "/analysis/comparables",
        Some(json!({ "property_id": subject_id, "max_age_days": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comparables_for_unknown_property_is_404() {
    let app = setup_test_app().await;
    let (status, _) = make_request(
        &app,
        "POST",
        "/analysis/comparables",
        Some(json!({ "property_id": "missing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn strategy_endpoint_computes_rental_metrics() {
    let app = setup_test_app().await;

    let (status, body) = make_request(
        &app,
        "POST",
        "/analysis/strategy",
        Some(json!({
            "strategy": "rental",
            "purchase_price": 250000.0,
            "assumptions": { "down_payment_pct": 100.0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    let metrics = &body["metrics"];
    assert_eq!(metrics["strategy"], "rental");
    // 1% rule rent, 40% expenses, no mortgage on a cash purchase
    assert_eq!(metrics["monthly_rent"], 2500.0);
    assert_eq!(metrics["monthly_payment"], 0.0);
    assert_eq!(metrics["monthly_cash_flow"], 1500.0);
}

#[tokio::test]
async fn strategy_can_price_from_a_stored_property() {
    let app = setup_test_app().await;
    let subject_id = load_samples(&app).await;

    let (status, body) = make_request(
        &app,
        "POST",
        "/analysis/strategy",
        Some(json!({ "strategy": "wholesale", "property_id": subject_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    // Sample subject lists at 485k
    assert_eq!(body["purchase_price"], 485000.0);
    assert_eq!(body["metrics"]["strategy"], "wholesale");

    // The run lands in the property's analysis history with metrics JSON
    let (_, body) = make_request(
        &app,
        "GET",
        &format!("/properties/{}/analyses", subject_id),
        None,
    )
    .await;
    let analyses = body.unwrap();
    let rows = analyses["analyses"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["strategy"].as_str().unwrap().contains("wholesale"));
}

#[tokio::test]
async fn unknown_strategy_kind_is_rejected() {
    let app = setup_test_app().await;
    let (status, _) = make_request(
        &app,
        "POST",
        "/analysis/strategy",
        Some(json!({ "strategy": "airbnb", "purchase_price": 100000.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
