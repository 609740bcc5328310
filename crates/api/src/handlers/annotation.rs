//! Handlers for annotated-PDF revision save and latest-revision lookup.
//!
//! A save is four effects in a fixed order with asymmetric failure
//! semantics: blob write and revision insert are authoritative (either
//! failing fails the request), while the denormalized snapshot on the
//! owning drawing is best-effort and never fails a save that already has
//! its revision row.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;

use drawtrack_core::annotation::parse_annotations;
use drawtrack_core::blob::revision_object_name;
use drawtrack_core::error::CoreError;
use drawtrack_core::types::DbId;
use drawtrack_db::models::drawing::RevisionSnapshot;
use drawtrack_db::models::revision::NewDrawingRevision;
use drawtrack_db::repositories::{DrawingRepo, RevisionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthEditor;
use crate::state::AppState;

/// Revision status recorded when the caller supplies none.
const DEFAULT_REVISION_STATUS: &str = "REVISION";

/// Revision number recorded when the caller supplies none. Numbers are
/// caller-owned and not validated for monotonicity or uniqueness.
const DEFAULT_REVISION_NUMBER: i32 = 1;

/// Response body for a successful revision save.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAnnotationsResponse {
    pub success: bool,
    pub pdf_url: String,
    pub revision_number: i32,
}

/// Response body for the latest-revision lookup. Defaults to
/// `{[], null, 0}` when the drawing has no revisions yet -- that is an
/// empty state, not an error.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestAnnotationsResponse {
    pub annotations: serde_json::Value,
    pub pdf_url: Option<String>,
    pub revision_number: i32,
}

/// Multipart fields accepted by the save endpoint.
struct SaveFields {
    annotations: Option<String>,
    pdf: Option<Vec<u8>>,
    revision_number: Option<i32>,
    revision_status: Option<String>,
}

/// POST /drawings/{id}/annotations
///
/// Persist a new revision of an annotated drawing: store the rendered
/// PDF, insert the revision row, and refresh the owning drawing's
/// denormalized snapshot.
pub async fn save_annotations(
    editor: AuthEditor,
    State(state): State<AppState>,
    Path(drawing_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<SaveAnnotationsResponse>> {
    let fields = read_save_fields(multipart).await?;

    // Validate everything before touching any store.
    let annotations_raw = fields.annotations.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "annotations field is required".into(),
        ))
    })?;
    let annotations = parse_annotations(&annotations_raw).map_err(AppError::Core)?;

    let pdf = fields.pdf.ok_or_else(|| {
        AppError::Core(CoreError::Validation("pdfBlob field is required".into()))
    })?;
    if pdf.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "pdfBlob must not be empty".into(),
        )));
    }

    if !DrawingRepo::exists(&state.pool, drawing_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            key: drawing_id.to_string(),
        }));
    }

    let revision_number = fields.revision_number.unwrap_or(DEFAULT_REVISION_NUMBER);
    let revision_status = fields
        .revision_status
        .unwrap_or_else(|| DEFAULT_REVISION_STATUS.to_string());

    // Effect 1+2: store the binary and obtain its durable URL. Failure
    // aborts the save before any metadata exists.
    let object_name = revision_object_name(drawing_id, revision_number);
    let pdf_url = state
        .blob_store
        .put(&object_name, &pdf, "application/pdf")
        .await
        .map_err(AppError::Core)?;

    // Effect 3: the authoritative revision row. A failure here leaves an
    // orphaned blob; it is logged for manual reconciliation, not cleaned
    // up (retrying could duplicate blobs).
    let revision = RevisionRepo::insert(
        &state.pool,
        drawing_id,
        &NewDrawingRevision {
            revision_number,
            revision_status: revision_status.clone(),
            annotations,
            pdf_url: pdf_url.clone(),
            editor_id: editor.editor_id,
            editor_name: editor.editor_name.clone(),
        },
    )
    .await
    .map_err(|e| {
        tracing::error!(
            drawing_id,
            blob = %object_name,
            error = %e,
            "Revision insert failed after blob write; blob is orphaned"
        );
        AppError::Core(CoreError::Persistence(format!(
            "inserting revision for drawing {drawing_id}: {e}"
        )))
    })?;

    // Effect 4: best-effort snapshot on the owning drawing. The revision
    // row is the source of truth, so a stale snapshot is acceptable.
    let snapshot = RevisionSnapshot {
        revision_status,
        revision_number,
        pdf_path: pdf_url.clone(),
        editor_id: editor.editor_id,
        editor_name: editor.editor_name.clone(),
        updated_at: revision.corrected_date,
    };
    match DrawingRepo::update_revision_snapshot(&state.pool, drawing_id, &snapshot).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(drawing_id, "Revision snapshot update matched no drawing row");
        }
        Err(e) => {
            tracing::warn!(drawing_id, error = %e, "Revision snapshot update failed");
        }
    }

    tracing::info!(
        drawing_id,
        revision_id = revision.id,
        revision_number,
        editor_id = editor.editor_id,
        "Drawing revision saved"
    );

    Ok(Json(SaveAnnotationsResponse {
        success: true,
        pdf_url,
        revision_number,
    }))
}

/// GET /drawings/{id}/annotations
///
/// Latest revision by creation time. Caller-supplied revision numbers
/// are not consulted for ordering.
pub async fn get_latest_annotations(
    State(state): State<AppState>,
    Path(drawing_id): Path<DbId>,
) -> AppResult<Json<LatestAnnotationsResponse>> {
    let latest = RevisionRepo::latest_by_drawing(&state.pool, drawing_id).await?;

    let response = match latest {
        Some(revision) => LatestAnnotationsResponse {
            annotations: revision.annotations,
            pdf_url: Some(revision.pdf_url),
            revision_number: revision.revision_number,
        },
        None => LatestAnnotationsResponse {
            annotations: serde_json::Value::Array(vec![]),
            pdf_url: None,
            revision_number: 0,
        },
    };

    Ok(Json(response))
}

/// Drain the multipart body into [`SaveFields`]. Unknown fields are
/// ignored so viewer-side additions do not break older servers.
async fn read_save_fields(mut multipart: Multipart) -> Result<SaveFields, AppError> {
    let mut fields = SaveFields {
        annotations: None,
        pdf: None,
        revision_number: None,
        revision_status: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "annotations" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                fields.annotations = Some(text);
            }
            "pdfBlob" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                fields.pdf = Some(data.to_vec());
            }
            "revisionNumber" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let number: i32 = text.trim().parse().map_err(|_| {
                    AppError::Core(CoreError::Validation(format!(
                        "revisionNumber '{text}' is not a valid integer"
                    )))
                })?;
                if number < 1 {
                    return Err(AppError::Core(CoreError::Validation(
                        "revisionNumber must be a positive integer".into(),
                    )));
                }
                fields.revision_number = Some(number);
            }
            "revisionStatus" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                fields.revision_status = Some(text);
            }
            _ => {}
        }
    }

    Ok(fields)
}
