//! Drawing revision model and DTOs.

use drawtrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `drawing_revisions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DrawingRevision {
    pub id: DbId,
    pub drawing_id: DbId,
    pub revision_number: i32,
    pub revision_status: String,
    pub annotations: serde_json::Value,
    pub pdf_url: String,
    pub corrected_date: Timestamp,
    pub editor_id: DbId,
    pub editor_name: String,
}

/// Input for inserting a new revision.
///
/// `revision_number` is caller-supplied and deliberately not checked
/// against existing revisions; ordering is creation time only.
#[derive(Debug, Clone)]
pub struct NewDrawingRevision {
    pub revision_number: i32,
    pub revision_status: String,
    pub annotations: serde_json::Value,
    pub pdf_url: String,
    pub editor_id: DbId,
    pub editor_name: String,
}
