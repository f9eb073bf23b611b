//! Networking for the auth endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the login call and `types` defines the shared wire schema.

pub mod api;
pub mod types;
