//! JWT-based editor-identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use drawtrack_core::error::CoreError;
use drawtrack_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Resolved editor identity extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that writes on
/// behalf of an editor:
///
/// ```ignore
/// async fn my_handler(editor: AuthEditor) -> AppResult<Json<()>> {
///     tracing::info!(editor_id = editor.editor_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthEditor {
    /// The editor's internal database id (from `claims.sub`).
    pub editor_id: DbId,
    /// The editor's display name (from `claims.name`).
    pub editor_name: String,
}

impl FromRequestParts<AppState> for AuthEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthEditor {
            editor_id: claims.sub,
            editor_name: claims.name,
        })
    }
}
