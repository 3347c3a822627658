//! Route definitions for the device registry.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::devices;
use crate::state::AppState;

/// Registry routes mounted at `/devices`.
///
/// ```text
/// POST /register      -> register (x-api-key)
/// GET  /{device_id}   -> get_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(devices::register))
        .route("/{device_id}", get(devices::get_device))
}
