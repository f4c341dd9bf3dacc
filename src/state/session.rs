//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views read the session to decide between signed-in and anonymous
//! behavior; login, signup and logout flows mutate it through the store.
//!
//! DESIGN
//! ======
//! The store owns an injected [`RoadmapApi`] and a `watch` channel holding the
//! current [`Session`], so callers can either read a snapshot or await
//! changes. Every operation draws a sequence token when it starts and may
//! only commit if no later operation has started since; a slower, older
//! response is dropped instead of overwriting newer state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::net::api::{ApiError, RoadmapApi};
use crate::net::types::{SessionCheck, User};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

// =============================================================================
// SESSION
// =============================================================================

/// Authentication state. `Authenticated` always carries its user.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    /// The startup session check has not completed.
    #[default]
    Unresolved,
    Authenticated(User),
    Anonymous,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Flat `{is_authenticated, user, loading}` view.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: self.is_authenticated(),
            user: self.user().cloned(),
            loading: self.is_loading(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub loading: bool,
}

/// Result of a login or registration attempt. Failures are values, never
/// errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthOutcome {
    Success(User),
    Rejected { error: String },
    /// A later session operation started before this one finished; its
    /// result was not applied.
    Superseded,
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected { error } => Some(error),
            _ => None,
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

pub struct SessionStore {
    api: Arc<dyn RoadmapApi>,
    state: watch::Sender<Session>,
    seq: AtomicU64,
}

impl SessionStore {
    /// New store in the `Unresolved` state. Call [`SessionStore::resolve`]
    /// once at startup.
    #[must_use]
    pub fn new(api: Arc<dyn RoadmapApi>) -> Self {
        Self { api, state: watch::Sender::new(Session::Unresolved), seq: AtomicU64::new(0) }
    }

    #[must_use]
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().snapshot()
    }

    /// Receiver that observes every committed transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Run the startup session check.
    ///
    /// Only `authenticated: true` with a user present resolves to
    /// `Authenticated`; every other outcome, including errors, is `Anonymous`.
    pub async fn resolve(&self) -> SessionSnapshot {
        let token = self.begin();
        let next = match self.api.check_session().await {
            Ok(SessionCheck { authenticated: true, user: Some(user) }) => Session::Authenticated(user),
            Ok(SessionCheck { authenticated: true, user: None }) => {
                tracing::warn!("session check reported authenticated without a user");
                Session::Anonymous
            }
            Ok(_) => Session::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "auth check failed");
                Session::Anonymous
            }
        };
        self.commit(token, next);
        self.snapshot()
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let token = self.begin();
        let result = self.api.login(email, password).await;
        self.finish_auth(token, "login", result, LOGIN_FAILED)
    }

    /// Same contract as [`SessionStore::login`], against the registration
    /// endpoint.
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> AuthOutcome {
        let token = self.begin();
        let result = self.api.register(email, password, full_name).await;
        self.finish_auth(token, "register", result, REGISTRATION_FAILED)
    }

    /// Notify the server, then drop to `Anonymous` whatever it answered.
    pub async fn logout(&self) {
        let token = self.begin();
        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "logout error");
        }
        self.commit(token, Session::Anonymous);
    }

    fn finish_auth(&self, token: u64, op: &'static str, result: Result<User, ApiError>, fallback: &str) -> AuthOutcome {
        match result {
            Ok(user) => {
                if self.commit(token, Session::Authenticated(user.clone())) {
                    tracing::info!(op, email = %user.email, "signed in");
                    AuthOutcome::Success(user)
                } else {
                    AuthOutcome::Superseded
                }
            }
            Err(e) => {
                tracing::warn!(op, error = %e, "authentication rejected");
                if self.commit(token, Session::Anonymous) {
                    AuthOutcome::Rejected { error: e.user_message(fallback) }
                } else {
                    AuthOutcome::Superseded
                }
            }
        }
    }

    fn begin(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply `next` if `token` is still the newest operation.
    fn commit(&self, token: u64, next: Session) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|current| {
            if self.seq.load(Ordering::SeqCst) != token {
                return false;
            }
            applied = true;
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        if !applied {
            tracing::debug!(token, "dropping superseded session result");
        }
        applied
    }
}
