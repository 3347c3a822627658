//! Route definitions for map overlay and location lookup endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::map;
use crate::state::AppState;

/// Map routes mounted at `/map`.
///
/// ```text
/// GET /points -> map_points (?city=&district=)
/// ```
pub fn map_router() -> Router<AppState> {
    Router::new().route("/points", get(map::map_points))
}

/// Location lookup routes mounted at `/locations`.
///
/// ```text
/// GET /cities    -> cities
/// GET /districts -> districts (?city=)
/// ```
pub fn locations_router() -> Router<AppState> {
    Router::new()
        .route("/cities", get(map::cities))
        .route("/districts", get(map::districts))
}
