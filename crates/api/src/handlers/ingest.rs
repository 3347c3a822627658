//! Ingestion pipeline: validate, score, classify, append.
//!
//! The derived `score` and `status` are computed exactly once here, from the
//! reading's pollutant channels plus the device's committed history strictly
//! before the reading's timestamp, then stored in the same INSERT as the raw
//! fields. Replaying the same ingestion sequence reproduces identical derived
//! fields.

use aqsense_core::error::CoreError;
use aqsense_core::scoring::{
    classify_with_previous, score, BaselineContext, PollutantReading, PriorReading,
};
use aqsense_core::status::AlertStatus;
use aqsense_core::types::{DbId, Timestamp};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use aqsense_db::models::measurement::CreateMeasurement;
use aqsense_db::repositories::MeasurementRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireApiKey;
use crate::state::AppState;

/// Maximum accepted length of an external device identifier.
const MAX_DEVICE_ID_LEN: usize = 64;

/// Inbound reading pushed by a field node or the LoRa gateway.
///
/// All sensor channels are independently optional — an absent channel is
/// reported as null, never zero. A missing `ts` means "now, server clock".
#[derive(Debug, Deserialize)]
pub struct IngestPayload {
    pub device_id: String,
    pub ts: Option<Timestamp>,
    pub temp_c: Option<f64>,
    pub hum_rh: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub tvoc_ppb: Option<f64>,
    pub eco2_ppm: Option<f64>,
    pub rssi: Option<f64>,
    pub snr: Option<f64>,
}

/// Response to a successful ingestion: the persisted row's surrogate id plus
/// the two derived fields.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ok: bool,
    pub id: DbId,
    pub score: f64,
    pub status: AlertStatus,
}

/// POST /ingest
///
/// Persist a reading with its derived risk score and alert status.
pub async fn ingest(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Json(payload): Json<IngestPayload>,
) -> AppResult<(StatusCode, Json<IngestResponse>)> {
    validate_payload(&payload)?;

    let ts = payload.ts.unwrap_or_else(Utc::now);
    let scoring = &state.config.scoring;

    // Baseline context: committed rows strictly before this reading's
    // timestamp. A device with no history gets an empty context and is
    // scored on absolute thresholds alone.
    let prior = MeasurementRepo::recent_before(
        &state.pool,
        &payload.device_id,
        ts,
        scoring.baseline_window as i64,
    )
    .await?;
    let context = BaselineContext::from_rows(
        prior.iter().map(|m| PriorReading {
            ts: m.ts,
            tvoc_ppb: m.tvoc_ppb,
            eco2_ppm: m.eco2_ppm,
        }),
        ts,
        scoring,
    );

    let reading = PollutantReading {
        tvoc_ppb: payload.tvoc_ppb,
        eco2_ppm: payload.eco2_ppm,
    };
    let risk = score(&reading, &context, scoring);

    // The scorer contract guarantees a finite score in [0, 100] for any
    // input. A violation is a programming defect: fail the call, store
    // nothing.
    if !risk.is_finite() || !(0.0..=100.0).contains(&risk) {
        return Err(AppError::Core(CoreError::Internal(format!(
            "scorer produced out-of-range score {risk} for device {}",
            payload.device_id
        ))));
    }

    // Hysteresis reads the previous persisted status — the newest row
    // strictly before this reading's timestamp, i.e. the head of the
    // baseline query. Keeping it strictly-before preserves replay
    // determinism, and durable state means concurrent replicas need no
    // coordination. The row may be older than the trend window; it is still
    // the operative previous state.
    let previous = prior
        .first()
        .and_then(|m| AlertStatus::parse(&m.status));
    let status = classify_with_previous(risk, previous, scoring);

    let create = CreateMeasurement {
        device_id: payload.device_id,
        ts,
        temp_c: payload.temp_c,
        hum_rh: payload.hum_rh,
        pressure_hpa: payload.pressure_hpa,
        tvoc_ppb: payload.tvoc_ppb,
        eco2_ppm: payload.eco2_ppm,
        rssi: payload.rssi,
        snr: payload.snr,
        score: risk,
        status: status.as_str().to_string(),
    };
    let stored = MeasurementRepo::insert(&state.pool, &create).await?;

    tracing::debug!(
        device_id = %stored.device_id,
        score = stored.score,
        status = %status,
        context_len = context.len(),
        "Measurement ingested"
    );

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            ok: true,
            id: stored.id,
            score: stored.score,
            status,
        }),
    ))
}

/// Reject malformed identity fields before anything reaches the scorer.
fn validate_payload(payload: &IngestPayload) -> AppResult<()> {
    if payload.device_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "device_id is required".to_string(),
        )));
    }
    if payload.device_id.len() > MAX_DEVICE_ID_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "device_id must be at most {MAX_DEVICE_ID_LEN} characters"
        ))));
    }
    Ok(())
}
