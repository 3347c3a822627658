//! Route definitions for measurement read endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::measurements;
use crate::state::AppState;

/// Read routes mounted at the API root.
///
/// ```text
/// GET /latest         -> latest
/// GET /history        -> history
/// GET /alerts/latest  -> alerts_latest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/latest", get(measurements::latest))
        .route("/history", get(measurements::history))
        .route("/alerts/latest", get(measurements::alerts_latest))
}
