//! Shared response envelope types for API handlers.
//!
//! Paginated listings use a `{ "data": ..., "pagination": ... }` envelope.
//! Use [`PaginatedResponse`] instead of ad-hoc `serde_json::json!` to get
//! compile-time type safety and consistent serialization.

use drawtrack_core::pagination::PageInfo;
use serde::Serialize;

/// Standard `{ "data": [...], "pagination": {...} }` response envelope.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}
