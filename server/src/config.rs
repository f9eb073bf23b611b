//! Server configuration parsed from environment variables.
//!
//! Missing Supabase settings do not stop startup: the login endpoint then
//! answers "unavailable" and `/api/auth/config` reports what is missing.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SUPABASE_TIMEOUT_SECS: u64 = 10;

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_string(key: &str) -> String {
    std::env::var(key).unwrap_or_default().trim().to_owned()
}

/// Hosted database settings. Empty strings mean "not set".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout_secs: u64,
}

impl SupabaseConfig {
    /// Load from `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `SUPABASE_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            url: env_string("SUPABASE_URL").trim_end_matches('/').to_owned(),
            anon_key: env_string("SUPABASE_ANON_KEY"),
            timeout_secs: env_parse("SUPABASE_TIMEOUT_SECS", DEFAULT_SUPABASE_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        !self.anon_key.is_empty()
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.has_url() && self.has_key()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub supabase: SupabaseConfig,
    /// Enables `GET /api/auth/test`, which lists user accounts.
    pub probe_enabled: bool,
}

impl ServerConfig {
    /// Build from `PORT`, `AUTH_PROBE_ENABLED`, and the Supabase variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            supabase: SupabaseConfig::from_env(),
            probe_enabled: env_bool("AUTH_PROBE_ENABLED").unwrap_or(false),
        }
    }
}
