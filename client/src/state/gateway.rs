//! Auth gateway: login/logout orchestration over the session store.
//!
//! DESIGN
//! ======
//! The verifier sits behind [`CredentialVerifier`] so pages use the HTTP
//! implementation while tests script outcomes. `loading` is held by a
//! [`LoadingGuard`](super::session::LoadingGuard) for the whole call, so it
//! is released on success, failure, panic, or when the future is dropped
//! mid-await. A login started while another is in flight is rejected.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use super::session::SessionStore;
use crate::net::types::{User, VerificationError};

/// Confirms a username/password pair against the account authority.
#[allow(async_fn_in_trait)]
pub trait CredentialVerifier {
    /// Verify already-trimmed credentials.
    ///
    /// # Errors
    ///
    /// Returns a [`VerificationError`] when the pair is rejected or the
    /// authority cannot be reached.
    async fn verify(&self, username: &str, password: &str) -> Result<User, VerificationError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("a login is already in progress")]
    InFlight,
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

#[derive(Clone)]
pub struct AuthGateway<V> {
    session: SessionStore,
    verifier: V,
}

impl<V: CredentialVerifier> AuthGateway<V> {
    #[must_use]
    pub fn new(session: SessionStore, verifier: V) -> Self {
        Self { session, verifier }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Log in and keep the failure reason.
    ///
    /// # Errors
    ///
    /// [`LoginError::InFlight`] if another login holds the loading flag,
    /// otherwise the verifier's error. The session is untouched on error.
    pub async fn try_login(&self, username: &str, password: &str) -> Result<User, LoginError> {
        let Some(_loading) = self.session.begin_loading() else {
            return Err(LoginError::InFlight);
        };

        let username = username.trim();
        let password = password.trim();
        let user = self.verifier.verify(username, password).await?;
        self.session.set(user.clone());
        Ok(user)
    }

    /// Log in, reporting only success or failure.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        match self.try_login(username, password).await {
            Ok(user) => {
                log::info!("login succeeded for {}", user.username);
                true
            }
            Err(e) => {
                log::info!("login failed: {e}");
                false
            }
        }
    }

    /// Sign out locally. No network interaction.
    pub fn logout(&self) {
        self.session.clear();
    }
}
