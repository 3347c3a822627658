//! Measurement entity model and DTOs (append-only time-series).

use aqsense_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A single stored sensor reading with its derived risk score and status.
///
/// `score` and `status` are computed exactly once at ingestion from the
/// pollutant channels and the device's history strictly before `ts`; they are
/// never mutated afterward.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Measurement {
    pub id: DbId,
    pub device_id: String,
    pub ts: Timestamp,
    pub temp_c: Option<f64>,
    pub hum_rh: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub tvoc_ppb: Option<f64>,
    pub eco2_ppm: Option<f64>,
    pub rssi: Option<f64>,
    pub snr: Option<f64>,
    pub score: f64,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a measurement whose derived fields are already computed.
///
/// Built by the ingestion pipeline, never deserialized from the wire — the
/// inbound payload must not be able to smuggle in its own score or status.
#[derive(Debug, Clone)]
pub struct CreateMeasurement {
    pub device_id: String,
    pub ts: Timestamp,
    pub temp_c: Option<f64>,
    pub hum_rh: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub tvoc_ppb: Option<f64>,
    pub eco2_ppm: Option<f64>,
    pub rssi: Option<f64>,
    pub snr: Option<f64>,
    pub score: f64,
    pub status: String,
}
