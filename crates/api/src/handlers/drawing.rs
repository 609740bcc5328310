//! Handlers for the aggregated drawing listing and drawing-number search.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use drawtrack_core::aggregate::{
    merge_and_sort, normalize_dwg_no, DrawingRecord, DrawingSource,
};
use drawtrack_core::error::CoreError;
use drawtrack_core::pagination::{clamp_page, clamp_page_size, paginate, PageInfo};
use drawtrack_db::repositories::{DrawingRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::response::PaginatedResponse;
use crate::state::AppState;

/// Query parameters for the drawing listing (`?page=&pageSize=`).
#[derive(Debug, Deserialize)]
pub struct DrawingListParams {
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

/// Query parameters for drawing-number search (`?dwgNo=`).
#[derive(Debug, Deserialize)]
pub struct DrawingSearchParams {
    #[serde(rename = "dwgNo")]
    pub dwg_no: Option<String>,
}

/// GET /drawings
///
/// Merge the three drawing collections into one normalized view, sorted
/// by submitted date descending across the whole merged set, then
/// paginated. The three fetches run concurrently; if any of them fails
/// the whole request fails -- the aging and status view assumes a
/// complete picture, so partial results are never returned.
pub async fn list_drawings(
    State(state): State<AppState>,
    Query(params): Query<DrawingListParams>,
) -> AppResult<Json<PaginatedResponse<DrawingRecord>>> {
    let page = clamp_page(params.page);
    let page_size = clamp_page_size(params.page_size);

    let (log, yet_to_release, yet_to_return) = tokio::try_join!(
        fetch_source("drawing_log", DrawingRepo::fetch_log(&state.pool)),
        fetch_source(
            "yet_to_release",
            DrawingRepo::fetch_yet_to_release(&state.pool)
        ),
        fetch_source(
            "yet_to_return",
            DrawingRepo::fetch_yet_to_return(&state.pool)
        ),
    )?;

    let merged = merge_and_sort(log, yet_to_release, yet_to_return, chrono::Utc::now());
    let total = merged.len() as i64;
    let data = paginate(merged, page, page_size);

    Ok(Json(PaginatedResponse {
        data,
        pagination: PageInfo::new(page, page_size, total),
    }))
}

/// Await one source fetch, tagging any failure with the source name.
async fn fetch_source<T>(
    source: &'static str,
    fut: impl std::future::Future<Output = Result<T, sqlx::Error>>,
) -> Result<T, AppError> {
    fut.await.map_err(|e| {
        tracing::error!(source, error = %e, "Drawing source fetch failed");
        AppError::Core(CoreError::UpstreamFetch(format!(
            "fetching {source}: {e}"
        )))
    })
}

/// GET /drawings/search
///
/// Case-insensitive exact match on the drawing number, probing the
/// sources in fixed priority order: log, yet-to-release, yet-to-return.
/// The first hit wins even if a later source also matches. A hit is
/// enriched with the project name when the single-row lookup succeeds;
/// enrichment failure is non-fatal.
pub async fn search_drawing(
    State(state): State<AppState>,
    Query(params): Query<DrawingSearchParams>,
) -> AppResult<Json<DrawingRecord>> {
    let raw = params
        .dwg_no
        .ok_or_else(|| AppError::BadRequest("dwgNo query parameter is required".into()))?;
    let dwg_no = normalize_dwg_no(&raw).map_err(AppError::Core)?;

    let hit = find_in_priority_order(&state, &dwg_no).await?;

    let Some((source, row)) = hit else {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            key: dwg_no,
        }));
    };

    let mut record =
        drawtrack_core::aggregate::map_source_row(source, row, chrono::Utc::now());

    if let Some(project_id) = record.project_id {
        match ProjectRepo::find_by_id(&state.pool, project_id).await {
            Ok(Some(project)) => record.project_name = Some(project.name),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(project_id, error = %e, "Project enrichment failed");
            }
        }
    }

    tracing::debug!(dwg_no = %record.dwg_no, source = source.as_str(), "Drawing search hit");

    Ok(Json(record))
}

/// Probe the three collections in priority order, returning the first
/// case-insensitive exact match.
async fn find_in_priority_order(
    state: &AppState,
    dwg_no: &str,
) -> Result<Option<(DrawingSource, drawtrack_core::aggregate::SourceRow)>, AppError> {
    if let Some(row) = DrawingRepo::find_log_by_dwg_no(&state.pool, dwg_no).await? {
        return Ok(Some((DrawingSource::Log, row)));
    }
    if let Some(row) = DrawingRepo::find_yet_to_release_by_dwg_no(&state.pool, dwg_no).await? {
        return Ok(Some((DrawingSource::YetToRelease, row)));
    }
    if let Some(row) = DrawingRepo::find_yet_to_return_by_dwg_no(&state.pool, dwg_no).await? {
        return Ok(Some((DrawingSource::YetToReturn, row)));
    }
    Ok(None)
}
