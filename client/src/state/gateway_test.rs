use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::executor::block_on;

use super::*;
use crate::state::auth::AuthState;
use crate::state::session::STORAGE_KEY;
use crate::util::storage::MemoryStorage;

/// Recognizes `Admin` / `1234`. The first `hangs` calls never resolve.
#[derive(Clone, Default)]
struct MockVerifier {
    hangs: Arc<Mutex<usize>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockVerifier {
    fn hanging(hangs: usize) -> Self {
        Self { hangs: Arc::new(Mutex::new(hangs)), ..Self::default() }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("mock mutex should lock").clone()
    }
}

impl CredentialVerifier for MockVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<User, VerificationError> {
        self.calls
            .lock()
            .expect("mock mutex should lock")
            .push((username.to_owned(), password.to_owned()));
        let hang = {
            let mut hangs = self.hangs.lock().expect("mock mutex should lock");
            let hang = *hangs > 0;
            *hangs = hangs.saturating_sub(1);
            hang
        };
        if hang {
            std::future::pending::<()>().await;
        }
        if username == "Admin" && password == "1234" {
            Ok(User::new(Some("1".into()), "Admin", "admin"))
        } else if username == "down" {
            Err(VerificationError::BackendUnavailable)
        } else {
            Err(VerificationError::InvalidCredentials)
        }
    }
}

fn gateway(verifier: MockVerifier) -> (AuthGateway<MockVerifier>, Arc<MemoryStorage>) {
    let slot = Arc::new(MemoryStorage::new());
    (AuthGateway::new(SessionStore::new(slot.clone()), verifier), slot)
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_sets_and_persists_session() {
    let (gw, slot) = gateway(MockVerifier::default());
    assert!(block_on(gw.login("Admin", "1234")));

    let state = gw.session().snapshot();
    assert!(state.is_authenticated);
    assert_eq!(state.user.as_ref().map(|u| (u.username.as_str(), u.role.as_str())), Some(("Admin", "admin")));
    assert!(!state.loading);
    assert!(slot.peek(STORAGE_KEY).is_some());
}

#[test]
fn login_wrong_password_leaves_session_unchanged() {
    let (gw, slot) = gateway(MockVerifier::default());
    let before = gw.session().snapshot();
    assert!(!block_on(gw.login("Admin", "wrong")));
    assert_eq!(gw.session().snapshot(), before);
    assert!(slot.peek(STORAGE_KEY).is_none());
}

#[test]
fn login_trims_inputs_before_verifying() {
    let verifier = MockVerifier::default();
    let (gw, _slot) = gateway(verifier.clone());
    assert!(block_on(gw.login("  Admin ", " 1234\n")));
    assert_eq!(verifier.calls(), vec![("Admin".to_owned(), "1234".to_owned())]);
}

#[test]
fn try_login_keeps_backend_distinction() {
    let (gw, _slot) = gateway(MockVerifier::default());
    assert_eq!(
        block_on(gw.try_login("down", "x")),
        Err(LoginError::Verification(VerificationError::BackendUnavailable))
    );
    assert_eq!(
        block_on(gw.try_login("Admin", "nope")),
        Err(LoginError::Verification(VerificationError::InvalidCredentials))
    );
    assert!(!gw.session().loading());
}

#[test]
fn login_failure_collapses_to_false() {
    let (gw, _slot) = gateway(MockVerifier::default());
    assert!(!block_on(gw.login("down", "x")));
    assert!(!gw.session().loading());
}

#[test]
fn abandoned_login_releases_loading() {
    let (gw, _slot) = gateway(MockVerifier::hanging(1));
    // Polls once, then drops the pending future.
    assert!(gw.login("Admin", "1234").now_or_never().is_none());
    assert!(!gw.session().loading());
    assert!(!gw.session().is_authenticated());
}

#[test]
fn concurrent_login_is_rejected_while_in_flight() {
    let verifier = MockVerifier::hanging(1);
    let (gw, _slot) = gateway(verifier.clone());

    block_on(async {
        let mut first = Box::pin(gw.try_login("Admin", "1234"));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(gw.session().loading());

        assert_eq!(gw.try_login("Admin", "1234").await, Err(LoginError::InFlight));
        assert_eq!(verifier.calls().len(), 1);
        drop(first);
    });

    assert!(!gw.session().loading());
    assert!(block_on(gw.login("Admin", "1234")));
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_after_login_resets_to_defaults() {
    let (gw, slot) = gateway(MockVerifier::default());
    assert!(block_on(gw.login("Admin", "1234")));
    gw.logout();
    assert_eq!(gw.session().snapshot(), AuthState::default());
    assert!(slot.peek(STORAGE_KEY).is_none());
}

#[test]
fn logout_when_signed_out_is_harmless() {
    let (gw, _slot) = gateway(MockVerifier::default());
    gw.logout();
    assert_eq!(gw.session().snapshot(), AuthState::default());
}
