//! Repository for the `projects` lookup table.

use drawtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::Project;

/// Single-row project lookups used to enrich search hits.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Find a project by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>("SELECT id, name FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
