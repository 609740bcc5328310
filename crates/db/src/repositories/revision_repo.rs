//! Repository for the append-only `drawing_revisions` table.

use drawtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::revision::{DrawingRevision, NewDrawingRevision};

/// Column list for drawing_revisions queries.
const COLUMNS: &str = "id, drawing_id, revision_number, revision_status, \
    annotations, pdf_url, corrected_date, editor_id, editor_name";

/// Provides insert and latest-revision lookup. There is no update or
/// delete: revisions are immutable once written.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Insert a new revision, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        drawing_id: DbId,
        input: &NewDrawingRevision,
    ) -> Result<DrawingRevision, sqlx::Error> {
        let query = format!(
            "INSERT INTO drawing_revisions
                (drawing_id, revision_number, revision_status, annotations,
                 pdf_url, editor_id, editor_name)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DrawingRevision>(&query)
            .bind(drawing_id)
            .bind(input.revision_number)
            .bind(&input.revision_status)
            .bind(&input.annotations)
            .bind(&input.pdf_url)
            .bind(input.editor_id)
            .bind(&input.editor_name)
            .fetch_one(pool)
            .await
    }

    /// Most recently created revision for a drawing, or None when the
    /// drawing has no revisions yet.
    ///
    /// Ordering is creation time, not revision number: caller-supplied
    /// numbers may repeat or go backwards. The id tie-break keeps the
    /// result deterministic when two saves land in the same instant.
    pub async fn latest_by_drawing(
        pool: &PgPool,
        drawing_id: DbId,
    ) -> Result<Option<DrawingRevision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drawing_revisions
             WHERE drawing_id = $1
             ORDER BY corrected_date DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, DrawingRevision>(&query)
            .bind(drawing_id)
            .fetch_optional(pool)
            .await
    }
}
