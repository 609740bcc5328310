//! Repository for the three drawing collections.
//!
//! Fetches return the skew-free [`SourceRow`] shape; the per-table column
//! naming differences live entirely inside the queries here.

use drawtrack_core::aggregate::SourceRow;
use drawtrack_core::status::ReleaseStatus;
use drawtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::drawing::{DrawingLogRow, RevisionSnapshot, YetToReleaseRow, YetToReturnRow};

/// Column list for drawing_log reads.
const LOG_COLUMNS: &str = "id, dwg, status, description, total_weight, \
    latest_submitted_date, project_id, pdf_path, release_status";

/// Column list for yet_to_release reads.
const YET_TO_RELEASE_COLUMNS: &str = "id, dwg_no, description, total_weight_tons, \
    latest_submitted_date, project_id, pdf_path";

/// Column list for yet_to_return reads.
const YET_TO_RETURN_COLUMNS: &str = "id, dwg_no, status, description, total_weight_tons, \
    latest_submitted_date, project_id, pdf_path";

/// Provides reads over the three drawing collections and the two writes
/// (release status, revision snapshot) that target the canonical
/// `drawing_log` table.
pub struct DrawingRepo;

impl DrawingRepo {
    /// Fetch every row of the drawing log.
    pub async fn fetch_log(pool: &PgPool) -> Result<Vec<SourceRow>, sqlx::Error> {
        let query = format!("SELECT {LOG_COLUMNS} FROM drawing_log ORDER BY id");
        let rows = sqlx::query_as::<_, DrawingLogRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SourceRow::from).collect())
    }

    /// Fetch every row of the yet-to-release collection.
    pub async fn fetch_yet_to_release(pool: &PgPool) -> Result<Vec<SourceRow>, sqlx::Error> {
        let query = format!("SELECT {YET_TO_RELEASE_COLUMNS} FROM yet_to_release ORDER BY id");
        let rows = sqlx::query_as::<_, YetToReleaseRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SourceRow::from).collect())
    }

    /// Fetch every row of the yet-to-return collection.
    pub async fn fetch_yet_to_return(pool: &PgPool) -> Result<Vec<SourceRow>, sqlx::Error> {
        let query = format!("SELECT {YET_TO_RETURN_COLUMNS} FROM yet_to_return ORDER BY id");
        let rows = sqlx::query_as::<_, YetToReturnRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SourceRow::from).collect())
    }

    /// Case-insensitive exact drawing-number lookup in the drawing log.
    ///
    /// Drawing numbers are not guaranteed unique within a collection;
    /// the lowest id wins, matching the feed's insertion order.
    pub async fn find_log_by_dwg_no(
        pool: &PgPool,
        normalized_dwg_no: &str,
    ) -> Result<Option<SourceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM drawing_log
             WHERE UPPER(TRIM(dwg)) = $1
             ORDER BY id
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, DrawingLogRow>(&query)
            .bind(normalized_dwg_no)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SourceRow::from))
    }

    /// Case-insensitive exact drawing-number lookup in yet-to-release.
    pub async fn find_yet_to_release_by_dwg_no(
        pool: &PgPool,
        normalized_dwg_no: &str,
    ) -> Result<Option<SourceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {YET_TO_RELEASE_COLUMNS} FROM yet_to_release
             WHERE UPPER(TRIM(dwg_no)) = $1
             ORDER BY id
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, YetToReleaseRow>(&query)
            .bind(normalized_dwg_no)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SourceRow::from))
    }

    /// Case-insensitive exact drawing-number lookup in yet-to-return.
    pub async fn find_yet_to_return_by_dwg_no(
        pool: &PgPool,
        normalized_dwg_no: &str,
    ) -> Result<Option<SourceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {YET_TO_RETURN_COLUMNS} FROM yet_to_return
             WHERE UPPER(TRIM(dwg_no)) = $1
             ORDER BY id
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, YetToReturnRow>(&query)
            .bind(normalized_dwg_no)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SourceRow::from))
    }

    /// Whether a drawing-log row with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM drawing_log WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Overwrite a drawing's release status. Returns false when the id is
    /// unknown. No history of prior values is kept.
    pub async fn set_release_status(
        pool: &PgPool,
        id: DbId,
        status: ReleaseStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE drawing_log
             SET release_status = $1, updated_at = now()
             WHERE id = $2",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write the denormalized latest-revision snapshot onto the owning
    /// drawing. Returns false when the id is unknown.
    ///
    /// Callers treat this as best-effort: the revision row is the source
    /// of truth and a failure here must not fail the save.
    pub async fn update_revision_snapshot(
        pool: &PgPool,
        id: DbId,
        snapshot: &RevisionSnapshot,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE drawing_log
             SET revision_status = $1,
                 revision_number = $2,
                 pdf_path = $3,
                 corrected_by_id = $4,
                 corrected_by_name = $5,
                 updated_at = $6
             WHERE id = $7",
        )
        .bind(&snapshot.revision_status)
        .bind(snapshot.revision_number)
        .bind(&snapshot.pdf_path)
        .bind(snapshot.editor_id)
        .bind(&snapshot.editor_name)
        .bind(snapshot.updated_at)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
