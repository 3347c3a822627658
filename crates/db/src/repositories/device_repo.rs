//! Repository for the `devices` registry table.

use sqlx::PgPool;

use crate::models::device::{CreateDevice, Device};

/// Column list for `devices` SELECT queries.
const COLUMNS: &str = "id, device_id, name, lat, lon, city, district, created_at";

/// Provides query operations for registered devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Register a new device. Fails with a unique violation if the external
    /// `device_id` is already taken.
    pub async fn create(pool: &PgPool, device: &CreateDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (device_id, name, lat, lon, city, district) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&device.device_id)
            .bind(&device.name)
            .bind(device.lat)
            .bind(device.lon)
            .bind(&device.city)
            .bind(&device.district)
            .fetch_one(pool)
            .await
    }

    /// Look up a device by its external identifier.
    pub async fn get_by_device_id(
        pool: &PgPool,
        device_id: &str,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE device_id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// All registered devices.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices ORDER BY device_id");
        sqlx::query_as::<_, Device>(&query).fetch_all(pool).await
    }

    /// Devices in a city.
    pub async fn list_by_city(pool: &PgPool, city: &str) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE city = $1 ORDER BY device_id");
        sqlx::query_as::<_, Device>(&query)
            .bind(city)
            .fetch_all(pool)
            .await
    }

    /// Devices in a district of a city.
    pub async fn list_by_district(
        pool: &PgPool,
        city: &str,
        district: &str,
    ) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM devices WHERE city = $1 AND district = $2 ORDER BY device_id"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(city)
            .bind(district)
            .fetch_all(pool)
            .await
    }

    /// Distinct non-empty cities with at least one device, sorted.
    pub async fn list_cities(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT city FROM devices WHERE city <> '' ORDER BY city",
        )
        .fetch_all(pool)
        .await
    }

    /// Distinct non-empty districts of a city, sorted.
    pub async fn list_districts(pool: &PgPool, city: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT district FROM devices \
             WHERE city = $1 AND district <> '' \
             ORDER BY district",
        )
        .bind(city)
        .fetch_all(pool)
        .await
    }
}
