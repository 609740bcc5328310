//! Stateless repository structs, one per table group.

pub mod drawing_repo;
pub mod project_repo;
pub mod revision_repo;

pub use drawing_repo::DrawingRepo;
pub use project_repo::ProjectRepo;
pub use revision_repo::RevisionRepo;
