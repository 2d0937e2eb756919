//! Operation handlers
//!
//! - `schema`: Save, Get, Delete and ListVersions
//! - `validate`: configuration validation against a stored schema

pub mod schema;
pub mod validate;
