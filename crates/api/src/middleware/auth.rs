//! Static shared-secret authentication for mutating endpoints.

use aqsense_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that enforces the `x-api-key` shared secret.
///
/// Use as an extractor parameter in any handler that mutates state:
///
/// ```ignore
/// async fn my_handler(_auth: RequireApiKey) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
///
/// When no `API_KEY` is configured the check is disabled, so local
/// development and tests run without credentials.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.api_key.as_deref() else {
            return Ok(RequireApiKey);
        };

        let provided = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok());

        if provided == Some(expected) {
            Ok(RequireApiKey)
        } else {
            Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )))
        }
    }
}
