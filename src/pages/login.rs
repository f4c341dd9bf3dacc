//! Login view: validate credentials locally, then sign in through the
//! session store.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::forms::{LoginForm, ValidationError, validate_login};
use crate::net::types::User;
use crate::state::session::{AuthOutcome, SessionStore};

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";

/// Failures shown inline on an auth form.
#[derive(Debug, thiserror::Error)]
pub enum AuthFormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Server or network rejection, as the general form message.
    #[error("{0}")]
    Rejected(String),
    /// A newer sign-in or sign-out started while this one was in flight.
    #[error("superseded by a newer session request")]
    Superseded,
}

/// Convert a store outcome into the form's result. Shared with signup.
pub(crate) fn outcome_to_result(outcome: AuthOutcome) -> Result<User, AuthFormError> {
    match outcome {
        AuthOutcome::Success(user) => Ok(user),
        AuthOutcome::Rejected { error } => Err(AuthFormError::Rejected(error)),
        AuthOutcome::Superseded => Err(AuthFormError::Superseded),
    }
}

/// Validate and submit the login form. On success the caller navigates home.
///
/// # Errors
///
/// Returns field errors without a network call, or the rejection message.
pub async fn submit_login(session: &SessionStore, form: &LoginForm) -> Result<User, AuthFormError> {
    validate_login(form)?;
    outcome_to_result(session.login(form.email.trim(), &form.password).await)
}

/// Sign in with the shared demo account, skipping form validation.
///
/// # Errors
///
/// Returns the rejection message when the demo account is unavailable.
pub async fn submit_demo_login(session: &SessionStore) -> Result<User, AuthFormError> {
    outcome_to_result(session.login(DEMO_EMAIL, DEMO_PASSWORD).await)
}
