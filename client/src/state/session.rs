//! Session store: the single owner of [`AuthState`].
//!
//! DESIGN
//! ======
//! The store is built once in `App` and handed to consumers through Leptos
//! context. Readers get a `ReadSignal`; every write goes through `set`,
//! `clear`, `initialize`, or a [`LoadingGuard`], so no caller can leave the
//! flag and the user out of step.
//!
//! The durable slot holds a snapshot (`bm-auth`). Reading it never touches
//! the signal; `initialize` copies fields across explicitly. A slot that
//! fails to parse or disagrees with itself is erased and the session falls
//! back to the unauthenticated default.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::auth::AuthState;
use crate::net::types::User;
use crate::util::storage::{BrowserStorage, DurableSlot};

/// Durable-slot key for the persisted session snapshot.
pub const STORAGE_KEY: &str = "bm-auth";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("malformed persisted session: {0}")]
    MalformedPersistedState(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    is_authenticated: bool,
    user: Option<PersistedUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedUser {
    username: String,
    role: String,
}

impl PersistedSession {
    fn signed_in(user: &User) -> Self {
        Self {
            is_authenticated: true,
            user: Some(PersistedUser { username: user.username.clone(), role: user.role.clone() }),
        }
    }
}

fn decode_persisted(raw: &str) -> Result<PersistedSession, SessionError> {
    let persisted: PersistedSession =
        serde_json::from_str(raw).map_err(|e| SessionError::MalformedPersistedState(e.to_string()))?;
    if persisted.is_authenticated != persisted.user.is_some() {
        return Err(SessionError::MalformedPersistedState(
            "isAuthenticated disagrees with user presence".to_owned(),
        ));
    }
    Ok(persisted)
}

/// Compare identities without the backing-store id, which the slot omits.
fn same_identity(a: Option<&User>, b: Option<&User>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.username == b.username && a.role == b.role,
        _ => false,
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Reactive, persisted authentication state for one running client.
#[derive(Clone)]
pub struct SessionStore {
    state: RwSignal<AuthState>,
    slot: Arc<dyn DurableSlot>,
}

impl SessionStore {
    #[must_use]
    pub fn new(slot: Arc<dyn DurableSlot>) -> Self {
        Self { state: RwSignal::new(AuthState::default()), slot }
    }

    /// Store backed by `window.localStorage` (unavailable during SSR).
    #[must_use]
    pub fn browser() -> Self {
        Self::new(Arc::new(BrowserStorage))
    }

    /// Read-only reactive view for components and effects.
    #[must_use]
    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.get_untracked()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.with_untracked(|s| s.is_authenticated)
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.with_untracked(|s| s.user.clone())
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.with_untracked(|s| s.loading)
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.state.with_untracked(|s| s.has_role(role))
    }

    #[must_use]
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.state.with_untracked(|s| s.has_any_role(roles))
    }

    /// Restore the persisted snapshot, if this context can reach the slot.
    ///
    /// Only writes the signal when the restored identity differs from the
    /// current one, so repeated calls (e.g. from an effect) are no-ops.
    pub fn initialize(&self) {
        if !self.slot.is_available() {
            return;
        }
        let Some(raw) = self.slot.read(STORAGE_KEY) else {
            return;
        };

        match decode_persisted(&raw) {
            Ok(persisted) => {
                let user = persisted.user.map(|u| User::new(None, u.username, u.role));
                let unchanged = self.state.with_untracked(|s| {
                    s.is_authenticated == persisted.is_authenticated && same_identity(s.user.as_ref(), user.as_ref())
                });
                if unchanged {
                    return;
                }
                self.state.update(|s| {
                    s.is_authenticated = persisted.is_authenticated;
                    s.user = user;
                });
            }
            Err(e) => {
                log::warn!("{e}; erasing {STORAGE_KEY}");
                self.slot.erase(STORAGE_KEY);
                self.reset();
            }
        }
    }

    /// Mark `user` as signed in and persist the snapshot.
    pub fn set(&self, user: User) {
        let persisted = PersistedSession::signed_in(&user);
        self.state.update(|s| {
            s.is_authenticated = true;
            s.user = Some(user);
        });

        if !self.slot.is_available() {
            return;
        }
        match serde_json::to_string(&persisted) {
            Ok(raw) => self.slot.write(STORAGE_KEY, &raw),
            Err(e) => log::warn!("failed to encode session snapshot: {e}"),
        }
    }

    /// Sign out locally and erase the persisted snapshot.
    pub fn clear(&self) {
        self.reset();
        if self.slot.is_available() {
            self.slot.erase(STORAGE_KEY);
        }
    }

    /// Raise `loading` for the lifetime of the returned guard.
    ///
    /// Returns `None` if another guard is already live.
    #[must_use]
    pub fn begin_loading(&self) -> Option<LoadingGuard> {
        if self.loading() {
            return None;
        }
        self.state.update(|s| s.loading = true);
        Some(LoadingGuard { state: self.state })
    }

    fn reset(&self) {
        let already_default = self.state.with_untracked(|s| !s.is_authenticated && s.user.is_none());
        if already_default {
            return;
        }
        self.state.update(|s| {
            s.is_authenticated = false;
            s.user = None;
        });
    }
}

/// Clears `loading` when dropped, on every exit path of the owning future.
#[must_use = "loading is cleared as soon as the guard is dropped"]
pub struct LoadingGuard {
    state: RwSignal<AuthState>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        // The signal may already be disposed if the owning scope tore down first.
        let _ = self.state.try_update(|s| s.loading = false);
    }
}
