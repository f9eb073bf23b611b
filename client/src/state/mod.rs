//! Client application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` is the plain session record, `session` owns it behind a signal and
//! persists it, and `gateway` drives login/logout against the verifier.

pub mod auth;
pub mod gateway;
pub mod session;
