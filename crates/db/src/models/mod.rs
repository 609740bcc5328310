//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Conversions into the skew-free core shapes where aggregation needs them
//! - Insert/update DTOs for the repository layer

pub mod drawing;
pub mod project;
pub mod revision;
