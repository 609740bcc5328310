//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (and generation for tests).
//!
//! Token issuance and credential storage are an external collaborator's
//! responsibility; this service only verifies an already-issued token and
//! reads the editor identity out of it.

pub mod jwt;
