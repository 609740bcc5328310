pub mod drawing;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /drawings                          aggregated listing (?page, ?pageSize)
/// /drawings/search                   drawing-number search (?dwgNo)
/// /drawings/{id}/annotations         latest revision (GET), save revision (POST)
/// /drawings/{id}/release-status      release-status update (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(drawing::router())
}
