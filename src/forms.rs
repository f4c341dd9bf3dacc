//! Local form validation run before any network call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Home, login and signup flows validate here first; a non-empty
//! [`ValidationError`] blocks submission and maps field names to the message
//! shown next to that field.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::net::types::RoadmapForm;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static email pattern"));

/// Field-keyed validation failures. Field names match the wire/form keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_fields(.fields))]
pub struct ValidationError {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationError {
    fn add(&mut self, field: &'static str, message: &str) {
        self.fields.insert(field, message.to_owned());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// `field: message` pairs joined with `; `, in field order.
fn render_fields(fields: &BTreeMap<&'static str, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// ROADMAP FORM
// =============================================================================

/// Interests and education are required; skills and goal are optional.
///
/// # Errors
///
/// Returns the failing fields (`interests`, `education`).
pub fn validate_roadmap_form(form: &RoadmapForm) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    if form.interests.trim().is_empty() {
        errors.add("interests", "Please describe your interests");
    }
    if form.education.is_empty() {
        errors.add("education", "Please select your education level");
    }
    errors.into_result()
}

// =============================================================================
// AUTH FORMS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn check_email(errors: &mut ValidationError, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.add("email", "Please enter a valid email");
    }
}

/// # Errors
///
/// Returns the failing fields (`email`, `password`).
pub fn validate_login(form: &LoginForm) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    check_email(&mut errors, &form.email);
    if form.password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result()
}

/// # Errors
///
/// Returns the failing fields (`name`, `email`, `password`, `confirmPassword`).
pub fn validate_signup(form: &SignupForm) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    if form.name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
    check_email(&mut errors, &form.email);
    if form.password.is_empty() {
        errors.add("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 8 characters");
    }
    if form.password != form.confirm_password {
        errors.add("confirmPassword", "Passwords do not match");
    }
    errors.into_result()
}
