//! REST helpers for the login endpoint.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the verifier reports the backend unavailable, since
//! logging in is only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport and decoding failures map to `BackendUnavailable`; HTTP status
//! codes carry the rest of the distinction so the gateway can tell "try
//! again" from "wrong password".

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "hydrate"))]
use super::types::LoginResponse;
use super::types::{LoginRequest, User, VerificationError};
use crate::state::gateway::CredentialVerifier;

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

/// Map a non-success status from the login endpoint to a failure kind.
#[cfg(any(test, feature = "hydrate"))]
fn classify_login_status(status: u16) -> Option<VerificationError> {
    match status {
        200..=299 => None,
        400 => Some(VerificationError::MissingCredentials),
        500..=599 => Some(VerificationError::BackendUnavailable),
        _ => Some(VerificationError::InvalidCredentials),
    }
}

/// Extract the user from a successful envelope.
#[cfg(any(test, feature = "hydrate"))]
fn user_from_envelope(body: LoginResponse) -> Result<User, VerificationError> {
    if body.error.is_some() {
        return Err(VerificationError::InvalidCredentials);
    }
    body.data
        .map(|d| d.user)
        .ok_or(VerificationError::BackendUnavailable)
}

/// Verifies credentials through `POST /api/auth/login`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiVerifier;

impl CredentialVerifier for ApiVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<User, VerificationError> {
        let request = LoginRequest::new(username, password).normalized()?;
        post_login(&request).await
    }
}

async fn post_login(request: &LoginRequest) -> Result<User, VerificationError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
            .json(request)
            .map_err(|e| {
                log::warn!("login request encode failed: {e}");
                VerificationError::BackendUnavailable
            })?
            .send()
            .await
            .map_err(|e| {
                log::warn!("login request failed: {e}");
                VerificationError::BackendUnavailable
            })?;
        if let Some(err) = classify_login_status(resp.status()) {
            return Err(err);
        }
        let body: LoginResponse = resp.json().await.map_err(|e| {
            log::warn!("login response decode failed: {e}");
            VerificationError::BackendUnavailable
        })?;
        user_from_envelope(body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(VerificationError::BackendUnavailable)
    }
}
