//! Domain logic for the drawing revision and release-tracking engine.
//!
//! This crate is deliberately free of SQL and HTTP concerns so the same
//! logic can be exercised by the API layer, repository tests, and any
//! future CLI tooling. Each submodule owns one concern:
//!
//! - [`status`] -- drawing status codes and the release-status gate
//! - [`aging`] -- the weeks-since-sent computation
//! - [`aggregate`] -- merge/sort/search over already-fetched source rows
//! - [`annotation`] -- markup payload validation
//! - [`pagination`] -- page/page-size clamping and envelope arithmetic
//! - [`blob`] -- the blob storage backend trait and local implementation

pub mod aggregate;
pub mod aging;
pub mod annotation;
pub mod blob;
pub mod error;
pub mod pagination;
pub mod status;
pub mod types;
