//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware components to coordinate login
//! redirects and identity-dependent rendering. Mutated only by
//! [`SessionStore`](super::session::SessionStore).

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// True iff a user is present and their role equals `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == role)
    }

    /// True iff a user is present and their role is one of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| roles.contains(&u.role.as_str()))
    }
}
