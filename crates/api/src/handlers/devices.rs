//! Handlers for the device registry endpoints.

use aqsense_core::error::CoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use aqsense_db::models::device::{CreateDevice, Device};
use aqsense_db::repositories::DeviceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireApiKey;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_DEVICE_ID_LEN: usize = 64;
const MAX_NAME_LEN: usize = 256;

/// POST /devices/register
///
/// Register a new field device. The external `device_id` is immutable and
/// globally unique; re-registering it is a conflict.
pub async fn register(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Json(payload): Json<CreateDevice>,
) -> AppResult<(StatusCode, Json<DataResponse<Device>>)> {
    validate_device(&payload)?;

    if DeviceRepo::get_by_device_id(&state.pool, &payload.device_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Device already exists: {}",
            payload.device_id
        ))));
    }

    let device = DeviceRepo::create(&state.pool, &payload).await?;
    tracing::info!(device_id = %device.device_id, city = %device.city, "Device registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: device })))
}

/// GET /devices/{device_id}
pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<Json<DataResponse<Device>>> {
    let device = DeviceRepo::get_by_device_id(&state.pool, &device_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "device",
            id: device_id,
        }))?;
    Ok(Json(DataResponse { data: device }))
}

/// Validate registration input: identity, name, and coordinate ranges.
fn validate_device(device: &CreateDevice) -> AppResult<()> {
    if device.device_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "device_id is required".to_string(),
        )));
    }
    if device.device_id.len() > MAX_DEVICE_ID_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "device_id must be at most {MAX_DEVICE_ID_LEN} characters"
        ))));
    }
    if device.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name is required".to_string(),
        )));
    }
    if device.name.len() > MAX_NAME_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        ))));
    }
    if !(-90.0..=90.0).contains(&device.lat) {
        return Err(AppError::Core(CoreError::Validation(
            "lat must be between -90 and 90".to_string(),
        )));
    }
    if !(-180.0..=180.0).contains(&device.lon) {
        return Err(AppError::Core(CoreError::Validation(
            "lon must be between -180 and 180".to_string(),
        )));
    }
    Ok(())
}
