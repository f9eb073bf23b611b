//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed configuration, the optional user store, and the verifier
//! built on top of it. There is no per-user session state on the server;
//! each login request is verified independently.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::credentials::CredentialVerifier;
use crate::services::supabase::UserRecords;

/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// `None` when Supabase settings are missing.
    pub records: Option<Arc<dyn UserRecords>>,
    pub verifier: CredentialVerifier,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, records: Option<Arc<dyn UserRecords>>) -> Self {
        let verifier = CredentialVerifier::new(records.clone());
        Self { config: Arc::new(config), records, verifier }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_state_has_no_records() {
        let state = test_helpers::unconfigured_app_state();
        assert!(state.records.is_none());
        assert!(!state.config.supabase.is_configured());
    }

    #[test]
    fn config_is_shared_between_clones() {
        let state = test_helpers::unconfigured_app_state();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.config, &clone.config));
    }
}
