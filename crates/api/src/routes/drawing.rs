//! Route definitions for the drawing engine.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{annotation, drawing, release_status};
use crate::state::AppState;

/// Drawing routes, mounted under `/api/v1`.
///
/// ```text
/// GET   /drawings                        list_drawings
/// GET   /drawings/search                 search_drawing
/// GET   /drawings/{id}/annotations       get_latest_annotations
/// POST  /drawings/{id}/annotations       save_annotations (editor auth)
/// PATCH /drawings/{id}/release-status    update_release_status (editor auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drawings", get(drawing::list_drawings))
        .route("/drawings/search", get(drawing::search_drawing))
        .route(
            "/drawings/{id}/annotations",
            get(annotation::get_latest_annotations).post(annotation::save_annotations),
        )
        .route(
            "/drawings/{id}/release-status",
            patch(release_status::update_release_status),
        )
}
