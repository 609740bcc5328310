//! Aggregation of the three heterogeneous drawing collections into one
//! normalized view.
//!
//! The repository layer converts each collection's rows into the skew-free
//! [`SourceRow`] shape, so the column-name differences between the legacy
//! drawing log (`dwg` / `total_weight`) and the two yet-to-* collections
//! (`dwg_no` / `total_weight_tons`) never leak past the database boundary.
//! Everything in this module is a pure, synchronous pass over
//! already-fetched data.

use serde::Serialize;

use crate::aging::{parse_submitted_date, weeks_since};
use crate::error::CoreError;
use crate::status::DrawingStatus;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Source collections
// ---------------------------------------------------------------------------

/// The originating collection of a drawing row.
///
/// Ids are only unique within one collection, so the source tag is part of
/// a record's identity. The declaration order here is also the fixed
/// priority order used to break ties during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingSource {
    Log,
    YetToRelease,
    YetToReturn,
}

impl DrawingSource {
    /// Return the source as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::YetToRelease => "yet_to_release",
            Self::YetToReturn => "yet_to_return",
        }
    }
}

/// A drawing row after per-source column-name normalization.
///
/// Every field that any of the three collections may omit is optional
/// here; [`map_source_row`] applies the defaulting rules.
#[derive(Debug, Clone)]
pub struct SourceRow {
    pub id: DbId,
    pub dwg_no: String,
    pub status: Option<String>,
    pub description: Option<String>,
    pub total_weight_tons: Option<f64>,
    pub latest_submitted_date: Option<String>,
    pub project_id: Option<DbId>,
    pub pdf_path: Option<String>,
    pub release_status: Option<String>,
}

// ---------------------------------------------------------------------------
// Canonical record
// ---------------------------------------------------------------------------

/// The canonical post-aggregation drawing record served to the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingRecord {
    pub id: DbId,
    pub source: DrawingSource,
    pub dwg_no: String,
    pub status: DrawingStatus,
    pub description: String,
    pub total_weight_tons: f64,
    /// Raw submitted-date string as delivered by the source; may be empty.
    pub latest_submitted_date: String,
    pub weeks_since_sent: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<String>,
}

/// Map one normalized source row onto the canonical record.
///
/// Status derivation is a fixed policy of the source system:
/// yet-to-release rows are always `FFU` and yet-to-return rows always
/// `PND`, regardless of any raw status the row carries. Only drawing-log
/// rows go through the raw-code mapping table.
pub fn map_source_row(source: DrawingSource, row: SourceRow, now: Timestamp) -> DrawingRecord {
    let status = match source {
        DrawingSource::Log => DrawingStatus::from_raw(row.status.as_deref()),
        DrawingSource::YetToRelease => DrawingStatus::Ffu,
        DrawingSource::YetToReturn => DrawingStatus::Pnd,
    };

    let latest_submitted_date = row.latest_submitted_date.unwrap_or_default();
    let weeks_since_sent = weeks_since(&latest_submitted_date, now);

    DrawingRecord {
        id: row.id,
        source,
        dwg_no: row.dwg_no,
        status,
        description: row.description.unwrap_or_default(),
        total_weight_tons: row.total_weight_tons.unwrap_or(0.0),
        latest_submitted_date,
        weeks_since_sent,
        release_status: row.release_status,
        project_id: row.project_id,
        project_name: None,
        pdf_path: row.pdf_path,
    }
}

/// Merge the three fetched collections into one sorted canonical list.
///
/// Concatenation order is log, yet-to-release, yet-to-return; the combined
/// list is then sorted by parsed submitted date descending. Rows with a
/// missing or unparseable date sort as the oldest. No deduplication
/// happens here: ids are source-scoped and the same drawing number may
/// legitimately appear in more than one collection.
pub fn merge_and_sort(
    log: Vec<SourceRow>,
    yet_to_release: Vec<SourceRow>,
    yet_to_return: Vec<SourceRow>,
    now: Timestamp,
) -> Vec<DrawingRecord> {
    let mut records: Vec<DrawingRecord> = Vec::with_capacity(
        log.len() + yet_to_release.len() + yet_to_return.len(),
    );
    records.extend(
        log.into_iter()
            .map(|row| map_source_row(DrawingSource::Log, row, now)),
    );
    records.extend(
        yet_to_release
            .into_iter()
            .map(|row| map_source_row(DrawingSource::YetToRelease, row, now)),
    );
    records.extend(
        yet_to_return
            .into_iter()
            .map(|row| map_source_row(DrawingSource::YetToReturn, row, now)),
    );

    // Stable sort keeps concatenation order among equal dates.
    records.sort_by_key(|record| {
        std::cmp::Reverse(
            parse_submitted_date(&record.latest_submitted_date).unwrap_or(chrono::NaiveDate::MIN),
        )
    });

    records
}

// ---------------------------------------------------------------------------
// Search normalization
// ---------------------------------------------------------------------------

/// Normalize a drawing-number search key: trim and upper-case.
///
/// An empty key is a validation error rather than an empty result, so the
/// caller can answer 400 instead of 404.
pub fn normalize_dwg_no(input: &str) -> Result<String, CoreError> {
    let normalized = input.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(CoreError::Validation(
            "dwgNo query parameter must not be empty".to_string(),
        ));
    }
    Ok(normalized)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
