//! Signup view.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use super::login::{AuthFormError, outcome_to_result};
use crate::forms::{SignupForm, validate_signup};
use crate::net::types::User;
use crate::state::session::SessionStore;

/// Validate and submit the signup form; the new account is signed in on
/// success.
///
/// # Errors
///
/// Returns field errors without a network call, or the rejection message.
pub async fn submit_signup(session: &SessionStore, form: &SignupForm) -> Result<User, AuthFormError> {
    validate_signup(form)?;
    let outcome = session
        .register(form.email.trim(), &form.password, form.name.trim())
        .await;
    outcome_to_result(outcome)
}
