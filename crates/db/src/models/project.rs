//! Project lookup model (enrichment only).

use drawtrack_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: DbId,
    pub name: String,
}
