//! Auth routes — password login, configuration check, connection probe.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use client::net::types::{ApiEnvelope, LoginData, LoginRequest, LoginResponse, VerificationError};
use serde::Serialize;

use crate::services::supabase::UserSummary;
use crate::state::AppState;

const PROBE_LIMIT: usize = 10;

pub(crate) fn verification_status(err: VerificationError) -> StatusCode {
    match err {
        VerificationError::MissingCredentials => StatusCode::BAD_REQUEST,
        VerificationError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        VerificationError::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn set_or_missing(present: bool) -> &'static str {
    if present { "Set" } else { "Missing" }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login` — verify credentials and return the account.
///
/// Unreadable bodies (bad JSON, wrong content type) still answer with the
/// envelope, as a 400 missing-credentials error.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> (StatusCode, Json<LoginResponse>) {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "unreadable login body");
            let err = VerificationError::MissingCredentials;
            return (verification_status(err), Json(LoginResponse::err(err.to_string())));
        }
    };

    tracing::info!(username = %body.username.trim(), "login attempt");

    match state.verifier.verify(&body.username, &body.password).await {
        Ok(user) => {
            tracing::info!(username = %user.username, role = %user.role, "login succeeded");
            (StatusCode::OK, Json(LoginResponse::ok(LoginData { user })))
        }
        Err(e) => (verification_status(e), Json(LoginResponse::err(e.to_string()))),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigStatus {
    pub supabase_url: &'static str,
    pub supabase_key: &'static str,
    pub has_url: bool,
    pub has_key: bool,
    pub build_profile: &'static str,
}

/// `GET /api/auth/config` — report which settings are present, never their values.
pub async fn config_status(State(state): State<AppState>) -> Json<ApiEnvelope<ConfigStatus>> {
    let supabase = &state.config.supabase;
    Json(ApiEnvelope::ok(ConfigStatus {
        supabase_url: set_or_missing(supabase.has_url()),
        supabase_key: set_or_missing(supabase.has_key()),
        has_url: supabase.has_url(),
        has_key: supabase.has_key(),
        build_profile: if cfg!(debug_assertions) { "debug" } else { "release" },
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub message: &'static str,
    pub total_users: usize,
    pub users: Vec<UserSummary>,
}

/// `GET /api/auth/test` — check the store is reachable by listing accounts.
///
/// Enabled only when `AUTH_PROBE_ENABLED=true`.
pub async fn connection_probe(State(state): State<AppState>) -> Response {
    if !state.config.probe_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    let Some(records) = &state.records else {
        let body = ApiEnvelope::<ProbeReport>::err("Database configuration missing");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    };

    match records.list(PROBE_LIMIT).await {
        Ok(users) => Json(ApiEnvelope::ok(ProbeReport {
            message: "Database connection successful",
            total_users: users.len(),
            users,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "connection probe failed");
            let body = ApiEnvelope::<ProbeReport>::err("Database unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
