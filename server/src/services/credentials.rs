//! Credential verification against the user store.
//!
//! DESIGN
//! ======
//! Input is validated before any lookup. "No such user", "inactive", and
//! "wrong password" all surface as `InvalidCredentials`; a missing or failing
//! store surfaces as `BackendUnavailable`.
//!
//! TRADE-OFFS
//! ==========
//! The stored column is compared to the supplied password for equality. It is
//! not a salted one-way hash; replacing it with one is a schema change on the
//! store side. Digests are compared in constant time so latency does not leak
//! how much of the secret matched.

use std::sync::Arc;

use client::net::types::{LoginRequest, User, VerificationError};
use sha2::{Digest, Sha256};

use super::supabase::UserRecords;

#[derive(Clone)]
pub struct CredentialVerifier {
    records: Option<Arc<dyn UserRecords>>,
}

impl CredentialVerifier {
    /// `None` means the store is not configured; every lookup then fails as
    /// unavailable.
    #[must_use]
    pub fn new(records: Option<Arc<dyn UserRecords>>) -> Self {
        Self { records }
    }

    /// Confirm `username` / `password` and return the account.
    ///
    /// # Errors
    ///
    /// - [`VerificationError::MissingCredentials`] for empty input.
    /// - [`VerificationError::InvalidCredentials`] for unknown, inactive, or
    ///   mismatched accounts.
    /// - [`VerificationError::BackendUnavailable`] if the store is missing or
    ///   fails.
    pub async fn verify(&self, username: &str, password: &str) -> Result<User, VerificationError> {
        let request = LoginRequest::new(username, password).normalized()?;

        let Some(records) = &self.records else {
            tracing::warn!("credential store not configured");
            return Err(VerificationError::BackendUnavailable);
        };

        let record = records
            .find_active(&request.username)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed");
                VerificationError::BackendUnavailable
            })?;

        let Some(record) = record.filter(|r| r.is_active) else {
            tracing::info!(username = %request.username, "no active user");
            return Err(VerificationError::InvalidCredentials);
        };

        if !secrets_match(&record.password_hash, &request.password) {
            tracing::info!(username = %request.username, "password mismatch");
            return Err(VerificationError::InvalidCredentials);
        }

        Ok(User { id: record.id, username: record.username, role: record.role })
    }
}

fn secrets_match(stored: &str, supplied: &str) -> bool {
    let stored = Sha256::digest(stored.as_bytes());
    let supplied = Sha256::digest(supplied.as_bytes());
    stored
        .iter()
        .zip(supplied.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
