//! Handler for the release-status gate.
//!
//! The gate is a two-value domain rather than a rich machine: any defined
//! or absent state may transition to either defined state, but nothing
//! outside the domain is ever written.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use drawtrack_core::error::CoreError;
use drawtrack_core::status::ReleaseStatus;
use drawtrack_core::types::DbId;
use drawtrack_db::repositories::DrawingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthEditor;
use crate::state::AppState;

/// Request body for the release-status update.
#[derive(Debug, Deserialize)]
pub struct UpdateReleaseStatusBody {
    #[serde(rename = "releaseStatus")]
    pub release_status: Option<String>,
}

/// Response body for a successful release-status update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReleaseStatusResponse {
    pub success: bool,
    pub release_status: &'static str,
}

/// PATCH /drawings/{id}/release-status
///
/// Validates the value against the two-string domain (case-sensitive
/// exact match) before any write, then overwrites the stored value. No
/// history of prior release statuses is kept.
pub async fn update_release_status(
    editor: AuthEditor,
    State(state): State<AppState>,
    Path(drawing_id): Path<DbId>,
    Json(body): Json<UpdateReleaseStatusBody>,
) -> AppResult<Json<UpdateReleaseStatusResponse>> {
    let raw = body.release_status.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "releaseStatus field is required".into(),
        ))
    })?;
    let status = ReleaseStatus::from_str(&raw).map_err(AppError::Core)?;

    let updated = DrawingRepo::set_release_status(&state.pool, drawing_id, status).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            key: drawing_id.to_string(),
        }));
    }

    tracing::info!(
        drawing_id,
        release_status = status.as_str(),
        editor_id = editor.editor_id,
        "Release status updated"
    );

    Ok(Json(UpdateReleaseStatusResponse {
        success: true,
        release_status: status.as_str(),
    }))
}
