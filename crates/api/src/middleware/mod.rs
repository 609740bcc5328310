//! Authentication middleware extractors.
//!
//! - [`auth::AuthEditor`] -- Extracts the resolved editor identity from a
//!   JWT Bearer token.

pub mod auth;
