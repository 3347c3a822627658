//! Route definition for measurement ingestion.

use axum::routing::post;
use axum::Router;

use crate::handlers::ingest;
use crate::state::AppState;

/// Ingestion route mounted at the API root.
///
/// ```text
/// POST /ingest -> ingest
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/ingest", post(ingest::ingest))
}
