//! Supabase (PostgREST) adapter for the `users` table.
//!
//! Thin HTTP wrapper over `GET /rest/v1/users`. Row selection and shape
//! checks are pure functions for testability.

use std::time::Duration;

use async_trait::async_trait;
use client::net::types::deserialize_id;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::SupabaseConfig;

const RECORD_COLUMNS: &str = "id,username,password_hash,role,is_active";
const SUMMARY_COLUMNS: &str = "id,username,role,is_active";
const CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// TYPES
// =============================================================================

/// A full `users` row, including the stored secret.
#[derive(Clone, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Account listing entry without the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub username: String,
    pub role: String,
    #[serde(rename(serialize = "isActive"))]
    pub is_active: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// Read access to user accounts. Enables mocking in tests.
#[async_trait]
pub trait UserRecords: Send + Sync {
    /// Look up the single active account named `username`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be queried.
    async fn find_active(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// List up to `limit` accounts.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be queried.
    async fn list(&self, limit: usize) -> Result<Vec<UserSummary>, StoreError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseClient {
    http: reqwest::Client,
    users_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Build a client for a fully configured project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, users_url: users_url(&config.url), anon_key: config.anon_key.clone() })
    }

    async fn get_rows<T: DeserializeOwned>(&self, query: &[(&str, String)]) -> Result<Vec<T>, StoreError> {
        let resp = self
            .http
            .get(&self.users_url)
            .query(query)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        resp.json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl UserRecords for SupabaseClient {
    async fn find_active(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let rows = self.get_rows(&find_active_query(username)).await?;
        Ok(single_match(rows, username))
    }

    async fn list(&self, limit: usize) -> Result<Vec<UserSummary>, StoreError> {
        self.get_rows(&list_query(limit)).await
    }
}

fn users_url(base: &str) -> String {
    format!("{}/rest/v1/users", base.trim_end_matches('/'))
}

fn find_active_query(username: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", RECORD_COLUMNS.to_owned()),
        ("username", format!("eq.{username}")),
        ("is_active", "eq.true".to_owned()),
        // Two rows is enough to detect an ambiguous match.
        ("limit", "2".to_owned()),
    ]
}

fn list_query(limit: usize) -> Vec<(&'static str, String)> {
    vec![("select", SUMMARY_COLUMNS.to_owned()), ("limit", limit.to_string())]
}

/// Exactly one row identifies the account; zero or several do not.
fn single_match(mut rows: Vec<UserRecord>, username: &str) -> Option<UserRecord> {
    if rows.len() > 1 {
        tracing::warn!(%username, count = rows.len(), "ambiguous user lookup; treating as no match");
        return None;
    }
    rows.pop()
}

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;
