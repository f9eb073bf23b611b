//! Route guard shared by every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`AuthGuard`] is mounted once inside the router. Each navigation runs
//! [`RouteGuard::evaluate`], which either allows the target or names a
//! redirect.
//!
//! TRADE-OFFS
//! ==========
//! The guard only decides on the client. A server render of a protected path
//! is produced unconditionally and the decision is made again after
//! hydration, so protected markup can reach an unauthenticated browser
//! before the redirect fires.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::session::SessionStore;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Where the current code is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    Client,
    Server,
}

impl ExecutionContext {
    /// `Client` in hydrate builds, `Server` otherwise.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(feature = "hydrate") { Self::Client } else { Self::Server }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteGuard {
    pub login_path: String,
    pub home_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self { login_path: LOGIN_PATH.to_owned(), home_path: HOME_PATH.to_owned() }
    }
}

impl RouteGuard {
    /// Decide whether navigation to `target` may proceed.
    #[must_use]
    pub fn evaluate(&self, target: &str, is_authenticated: bool, context: ExecutionContext) -> GuardOutcome {
        if context == ExecutionContext::Server {
            return GuardOutcome::Allow;
        }

        let on_login = target == self.login_path;
        match (on_login, is_authenticated) {
            (true, true) => GuardOutcome::Redirect(self.home_path.clone()),
            (false, false) => GuardOutcome::Redirect(self.login_path.clone()),
            (true, false) | (false, true) => GuardOutcome::Allow,
        }
    }

    /// Restore `session` from its durable slot, then evaluate `target`
    /// against the restored state.
    #[must_use]
    pub fn check(&self, session: &SessionStore, target: &str, context: ExecutionContext) -> GuardOutcome {
        session.initialize();
        let authed = session.state().with(|s| s.is_authenticated);
        self.evaluate(target, authed, context)
    }
}

/// Restore the session and redirect whenever the path or auth state changes.
///
/// Must be rendered inside `<Router>`.
#[component]
pub fn AuthGuard() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let location = use_location();
    let navigate = use_navigate();
    let guard = RouteGuard::default();

    Effect::new(move || {
        let path = location.pathname.get();
        if let GuardOutcome::Redirect(to) = guard.check(&session, &path, ExecutionContext::current()) {
            log::debug!("route guard: {path} -> {to}");
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
