//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `supabase` owns the hosted-database access behind the `UserRecords` trait;
//! `credentials` owns the verification rules on top of it, so route handlers
//! stay focused on protocol translation.

pub mod credentials;
pub mod supabase;
