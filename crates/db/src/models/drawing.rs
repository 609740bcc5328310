//! Row models for the three drawing collections.
//!
//! The collections do not share a schema: the legacy drawing log names its
//! columns `dwg` / `total_weight` while the yet-to-* feeds use `dwg_no` /
//! `total_weight_tons`. Each row type converts into
//! [`drawtrack_core::aggregate::SourceRow`] so the naming skew stops here.

use drawtrack_core::aggregate::SourceRow;
use drawtrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `drawing_log` table (the canonical collection).
#[derive(Debug, Clone, FromRow)]
pub struct DrawingLogRow {
    pub id: DbId,
    pub dwg: String,
    pub status: Option<String>,
    pub description: Option<String>,
    pub total_weight: Option<f64>,
    pub latest_submitted_date: Option<String>,
    pub project_id: Option<DbId>,
    pub pdf_path: Option<String>,
    pub release_status: Option<String>,
}

impl From<DrawingLogRow> for SourceRow {
    fn from(row: DrawingLogRow) -> Self {
        SourceRow {
            id: row.id,
            dwg_no: row.dwg,
            status: row.status,
            description: row.description,
            total_weight_tons: row.total_weight,
            latest_submitted_date: row.latest_submitted_date,
            project_id: row.project_id,
            pdf_path: row.pdf_path,
            release_status: row.release_status,
        }
    }
}

/// A row from the `yet_to_release` table. Carries no status column; rows
/// are surfaced as `FFU` by policy.
#[derive(Debug, Clone, FromRow)]
pub struct YetToReleaseRow {
    pub id: DbId,
    pub dwg_no: String,
    pub description: Option<String>,
    pub total_weight_tons: Option<f64>,
    pub latest_submitted_date: Option<String>,
    pub project_id: Option<DbId>,
    pub pdf_path: Option<String>,
}

impl From<YetToReleaseRow> for SourceRow {
    fn from(row: YetToReleaseRow) -> Self {
        SourceRow {
            id: row.id,
            dwg_no: row.dwg_no,
            status: None,
            description: row.description,
            total_weight_tons: row.total_weight_tons,
            latest_submitted_date: row.latest_submitted_date,
            project_id: row.project_id,
            pdf_path: row.pdf_path,
            release_status: None,
        }
    }
}

/// A row from the `yet_to_return` table. Any raw status is ignored by the
/// aggregator; rows are surfaced as `PND` by policy.
#[derive(Debug, Clone, FromRow)]
pub struct YetToReturnRow {
    pub id: DbId,
    pub dwg_no: String,
    pub status: Option<String>,
    pub description: Option<String>,
    pub total_weight_tons: Option<f64>,
    pub latest_submitted_date: Option<String>,
    pub project_id: Option<DbId>,
    pub pdf_path: Option<String>,
}

impl From<YetToReturnRow> for SourceRow {
    fn from(row: YetToReturnRow) -> Self {
        SourceRow {
            id: row.id,
            dwg_no: row.dwg_no,
            status: row.status,
            description: row.description,
            total_weight_tons: row.total_weight_tons,
            latest_submitted_date: row.latest_submitted_date,
            project_id: row.project_id,
            pdf_path: row.pdf_path,
            release_status: None,
        }
    }
}

/// Denormalized latest-revision snapshot written onto the owning
/// `drawing_log` row after each revision save.
#[derive(Debug, Clone)]
pub struct RevisionSnapshot {
    pub revision_status: String,
    pub revision_number: i32,
    pub pdf_path: String,
    pub editor_id: DbId,
    pub editor_name: String,
    pub updated_at: Timestamp,
}
