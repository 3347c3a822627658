//! Read handlers for latest, history, and alert lookups.
//!
//! "Device has never reported" is a normal outcome on every read path: the
//! responses carry an explicit `found` flag rather than a 404, matching what
//! the dashboard polls for.

use aqsense_core::types::Timestamp;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use aqsense_db::models::measurement::Measurement;
use aqsense_db::repositories::MeasurementRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// History page size bounds; requests outside them are rejected.
const MIN_HISTORY_LIMIT: i64 = 1;
const MAX_HISTORY_LIMIT: i64 = 5000;
const DEFAULT_HISTORY_LIMIT: i64 = 500;

/// Query parameter for single-device read endpoints.
#[derive(Debug, Deserialize)]
pub struct DeviceQuery {
    pub device_id: String,
}

/// Query parameters for the history endpoint. Bounds are inclusive.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub device_id: String,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub limit: Option<i64>,
}

/// Response for `GET /latest`.
#[derive(Debug, Serialize)]
pub struct LatestResponse {
    pub found: bool,
    pub data: Option<Measurement>,
}

/// Response for `GET /history`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub device_id: String,
    pub count: usize,
    pub items: Vec<Measurement>,
}

/// Response for `GET /alerts/latest`: the most recent derived state plus the
/// pollutant pair it was computed from.
#[derive(Debug, Default, Serialize)]
pub struct AlertLatestResponse {
    pub found: bool,
    pub device_id: Option<String>,
    pub ts: Option<Timestamp>,
    pub score: Option<f64>,
    pub status: Option<String>,
    pub tvoc_ppb: Option<f64>,
    pub eco2_ppm: Option<f64>,
}

/// GET /latest?device_id=
pub async fn latest(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> AppResult<Json<LatestResponse>> {
    let measurement = MeasurementRepo::latest(&state.pool, &query.device_id).await?;
    Ok(Json(LatestResponse {
        found: measurement.is_some(),
        data: measurement,
    }))
}

/// GET /history?device_id=&start=&end=&limit=
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if !(MIN_HISTORY_LIMIT..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(AppError::BadRequest(format!(
            "limit must be between {MIN_HISTORY_LIMIT} and {MAX_HISTORY_LIMIT}"
        )));
    }

    let items =
        MeasurementRepo::history(&state.pool, &query.device_id, query.start, query.end, limit)
            .await?;
    Ok(Json(HistoryResponse {
        device_id: query.device_id,
        count: items.len(),
        items,
    }))
}

/// GET /alerts/latest?device_id=
pub async fn alerts_latest(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> AppResult<Json<AlertLatestResponse>> {
    let Some(m) = MeasurementRepo::latest(&state.pool, &query.device_id).await? else {
        return Ok(Json(AlertLatestResponse::default()));
    };

    Ok(Json(AlertLatestResponse {
        found: true,
        device_id: Some(m.device_id),
        ts: Some(m.ts),
        score: Some(m.score),
        status: Some(m.status),
        tvoc_ppb: m.tvoc_ppb,
        eco2_ppm: m.eco2_ppm,
    }))
}
