pub mod devices;
pub mod health;
pub mod ingest;
pub mod map;
pub mod measurements;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ingest                     ingest a reading (POST, x-api-key)
///
/// /latest                     latest measurement for a device
/// /history                    measurement history (start/end/limit)
/// /alerts/latest              most recent score/status/pollutant pair
///
/// /devices/register           register a device (POST, x-api-key)
/// /devices/{device_id}        device metadata
///
/// /locations/cities           distinct cities with devices
/// /locations/districts        districts of a city (?city=)
///
/// /map/points                 devices + latest reading (?city=&district=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Measurement ingestion.
        .merge(ingest::router())
        // Latest / history / alert read endpoints.
        .merge(measurements::router())
        // Device registry.
        .nest("/devices", devices::router())
        // City/district lookups for the map filters.
        .nest("/locations", map::locations_router())
        // Map overlay points.
        .nest("/map", map::map_router())
}
