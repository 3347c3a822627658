//! Repository for the `measurements` table (append-only time-series).

use aqsense_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::measurement::{CreateMeasurement, Measurement};

/// Column list for `measurements` SELECT queries (includes `id` and `created_at`).
const COLUMNS: &str = "\
    id, device_id, ts, temp_c, hum_rh, pressure_hpa, \
    tvoc_ppb, eco2_ppm, rssi, snr, score, status, created_at";

/// Column list for `measurements` INSERT statements (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    device_id, ts, temp_c, hum_rh, pressure_hpa, \
    tvoc_ppb, eco2_ppm, rssi, snr, score, status";

/// Provides query operations for measurements.
pub struct MeasurementRepo;

impl MeasurementRepo {
    /// Insert a single measurement row.
    ///
    /// The single INSERT commits raw and derived fields together, so a store
    /// failure can never leave a half-written row. Duplicate (device_id, ts)
    /// pairs are accepted as distinct rows; ingestion is append-only, not
    /// idempotent.
    pub async fn insert(
        pool: &PgPool,
        measurement: &CreateMeasurement,
    ) -> Result<Measurement, sqlx::Error> {
        let query = format!(
            "INSERT INTO measurements ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Measurement>(&query)
            .bind(&measurement.device_id)
            .bind(measurement.ts)
            .bind(measurement.temp_c)
            .bind(measurement.hum_rh)
            .bind(measurement.pressure_hpa)
            .bind(measurement.tvoc_ppb)
            .bind(measurement.eco2_ppm)
            .bind(measurement.rssi)
            .bind(measurement.snr)
            .bind(measurement.score)
            .bind(&measurement.status)
            .fetch_one(pool)
            .await
    }

    /// The most recent measurement for a device, or `None` if it has never
    /// reported. Timestamp ties break toward the highest surrogate id.
    pub async fn latest(
        pool: &PgPool,
        device_id: &str,
    ) -> Result<Option<Measurement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM measurements \
             WHERE device_id = $1 \
             ORDER BY ts DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Measurement>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// Measurement history for a device, ascending by timestamp.
    ///
    /// Bounds are inclusive when provided; `start > end` simply matches
    /// nothing. The caller validates `limit` against the 1..=5000 contract.
    pub async fn history(
        pool: &PgPool,
        device_id: &str,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
        limit: i64,
    ) -> Result<Vec<Measurement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM measurements \
             WHERE device_id = $1 \
               AND ($2::timestamptz IS NULL OR ts >= $2) \
               AND ($3::timestamptz IS NULL OR ts <= $3) \
             ORDER BY ts ASC, id ASC \
             LIMIT $4"
        );
        sqlx::query_as::<_, Measurement>(&query)
            .bind(device_id)
            .bind(start)
            .bind(end)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The most recent rows strictly before `before`, most-recent-first.
    ///
    /// Feeds the baseline context for scoring: only committed rows with
    /// `ts < before` are visible, so a replay of ingestion reproduces the
    /// same derived fields.
    pub async fn recent_before(
        pool: &PgPool,
        device_id: &str,
        before: Timestamp,
        limit: i64,
    ) -> Result<Vec<Measurement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM measurements \
             WHERE device_id = $1 AND ts < $2 \
             ORDER BY ts DESC, id DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, Measurement>(&query)
            .bind(device_id)
            .bind(before)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The latest measurement per device.
    ///
    /// Uses `DISTINCT ON` to efficiently select the most recent row per
    /// device in one round trip; used for map point assembly.
    pub async fn latest_per_device(pool: &PgPool) -> Result<Vec<Measurement>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (device_id) {COLUMNS} FROM measurements \
             ORDER BY device_id, ts DESC, id DESC"
        );
        sqlx::query_as::<_, Measurement>(&query)
            .fetch_all(pool)
            .await
    }
}
