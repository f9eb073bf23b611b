//! Shared wire DTOs for the login endpoint and the session snapshot.
//!
//! DESIGN
//! ======
//! The server links this crate with the `ssr` feature, so request/response
//! shapes are defined once here and both sides serialize the same structs.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// An authenticated account as returned by the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backing-store identifier. Absent when restored from the durable slot.
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Login name.
    pub username: String,
    /// Role name used for role checks (e.g. `"admin"`).
    pub role: String,
}

impl User {
    #[must_use]
    pub fn new(id: Option<String>, username: impl Into<String>, role: impl Into<String>) -> Self {
        Self { id, username: username.into(), role: role.into() }
    }
}

/// Accept either a JSON string or number for row identifiers.
///
/// # Errors
///
/// Returns a deserialization error for any other JSON type.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Trim the username and reject the request if either field is blank.
    ///
    /// The password is passed through untouched; it is compared byte for byte.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::MissingCredentials`] for empty or
    /// whitespace-only input.
    pub fn normalized(&self) -> Result<Self, VerificationError> {
        let username = self.username.trim();
        if username.is_empty() || self.password.trim().is_empty() {
            return Err(VerificationError::MissingCredentials);
        }
        Ok(Self::new(username, self.password.as_str()))
    }
}

/// `{ error, data }` response envelope shared by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self { error: None, data: Some(data) }
    }

    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self { error: Some(message.into()), data: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    pub user: User,
}

pub type LoginResponse = ApiEnvelope<LoginData>;

/// Why a username/password pair was not accepted.
///
/// Messages never say whether the username or the password was wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Authentication service unavailable")]
    BackendUnavailable,
}
