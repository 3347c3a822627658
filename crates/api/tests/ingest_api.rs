//! Integration tests for the ingestion pipeline: scoring, classification,
//! validation, and the shared-secret check.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_json_with_key};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: a clean reading with no history classifies OK
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn clean_reading_with_no_history_is_ok(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/ingest",
        json!({
            "device_id": "node-001",
            "ts": "2025-06-01T12:00:00Z",
            "tvoc_ppb": 50.0,
            "eco2_ppm": 400.0
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body["score"].as_f64().unwrap() < 50.0);
    assert_eq!(body["status"], "OK");
}

// ---------------------------------------------------------------------------
// Test: a sustained eCO2 rise escalates to HIGH via the trend term
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn rising_eco2_trend_escalates_to_high(pool: PgPool) {
    let app = common::build_test_app(pool);

    // The same final concentration with no history only reaches WARN...
    let control = post_json(
        app.clone(),
        "/api/v1/ingest",
        json!({
            "device_id": "control-node",
            "ts": "2025-06-01T12:00:00Z",
            "eco2_ppm": 1800.0
        }),
    )
    .await;
    let control_body = body_json(control).await;
    assert_eq!(control_body["status"], "WARN");

    // ...but five readings climbing 400 -> 1800 one minute apart carry
    // enough trend contribution to reach HIGH.
    let mut last_body = serde_json::Value::Null;
    for (i, eco2) in [400.0, 750.0, 1100.0, 1450.0, 1800.0].iter().enumerate() {
        let response = post_json(
            app.clone(),
            "/api/v1/ingest",
            json!({
                "device_id": "node-001",
                "ts": format!("2025-06-01T12:{:02}:00Z", i),
                "eco2_ppm": eco2
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        last_body = body_json(response).await;
    }

    assert_eq!(last_body["status"], "HIGH");
    assert!(last_body["score"].as_f64().unwrap() >= 90.0);
}

// ---------------------------------------------------------------------------
// Test: readings without pollutant channels still get a defined score
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_pollutant_channels_score_neutral(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/ingest",
        json!({
            "device_id": "node-001",
            "ts": "2025-06-01T12:00:00Z",
            "temp_c": 21.0
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["score"], 0.0);
    assert_eq!(body["status"], "OK");
}

// ---------------------------------------------------------------------------
// Test: extreme pollutant values clamp instead of overflowing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn extreme_pollutant_values_clamp_to_bounds(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/ingest",
        json!({
            "device_id": "node-001",
            "ts": "2025-06-01T12:00:00Z",
            "tvoc_ppb": 1e9,
            "eco2_ppm": 1e9
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["score"], 100.0);
    assert_eq!(body["status"], "HIGH");
}

// ---------------------------------------------------------------------------
// Test: blank device_id is rejected before anything is stored
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_device_id_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/ingest",
        json!({ "device_id": "  ", "eco2_ppm": 400.0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Nothing reached the store.
    let latest = get(app, "/api/v1/latest?device_id=%20%20").await;
    let latest_body = body_json(latest).await;
    assert_eq!(latest_body["found"], false);
}

// ---------------------------------------------------------------------------
// Test: missing ts defaults to the server clock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_ts_defaults_to_server_clock(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/ingest",
        json!({ "device_id": "node-001", "eco2_ppm": 500.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let latest = get(app, "/api/v1/latest?device_id=node-001").await;
    let body = body_json(latest).await;
    assert_eq!(body["found"], true);
    assert!(body["data"]["ts"].is_string());
}

// ---------------------------------------------------------------------------
// Test: duplicate timestamps append distinct rows (no upsert)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_timestamps_append_distinct_rows(pool: PgPool) {
    let app = common::build_test_app(pool);

    let payload = json!({
        "device_id": "node-001",
        "ts": "2025-06-01T12:00:00Z",
        "eco2_ppm": 600.0
    });

    let first = body_json(post_json(app.clone(), "/api/v1/ingest", payload.clone()).await).await;
    let second = body_json(post_json(app.clone(), "/api/v1/ingest", payload).await).await;
    assert_ne!(first["id"], second["id"]);

    let history = get(app, "/api/v1/history?device_id=node-001").await;
    let body = body_json(history).await;
    assert_eq!(body["count"], 2);
}

// ---------------------------------------------------------------------------
// Test: configured API key gates ingestion but not reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn configured_api_key_gates_ingestion(pool: PgPool) {
    let config = aqsense_api::config::ServerConfig {
        api_key: Some("sensor-secret".to_string()),
        ..common::test_config()
    };
    let app = common::build_app_with_config(pool, config);

    let payload = json!({ "device_id": "node-001", "eco2_ppm": 500.0 });

    let missing = post_json(app.clone(), "/api/v1/ingest", payload.clone()).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(missing).await;
    assert_eq!(body["code"], "UNAUTHORIZED");

    let wrong =
        post_json_with_key(app.clone(), "/api/v1/ingest", payload.clone(), "nope").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let correct =
        post_json_with_key(app.clone(), "/api/v1/ingest", payload, "sensor-secret").await;
    assert_eq!(correct.status(), StatusCode::CREATED);

    // Read paths stay public.
    let latest = get(app, "/api/v1/latest?device_id=node-001").await;
    assert_eq!(latest.status(), StatusCode::OK);
}
