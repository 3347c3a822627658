//! Device registry entity model and DTOs.

use aqsense_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered field sensor node with its map placement.
///
/// Created once at registration; read-only afterward.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    pub device_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub district: String,
    pub created_at: Timestamp,
}

/// DTO for registering a new device.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDevice {
    pub device_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub district: String,
}
