//! Request handlers for the drawing engine.
//!
//! Each submodule provides async handler functions for one operation
//! group. Handlers delegate to `drawtrack_db` repositories and the pure
//! logic in `drawtrack_core`, and map errors via [`crate::error::AppError`].

pub mod annotation;
pub mod drawing;
pub mod release_status;
