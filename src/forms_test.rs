use super::*;

fn roadmap_form(interests: &str, education: &str) -> RoadmapForm {
    RoadmapForm {
        interests: interests.to_owned(),
        education: education.to_owned(),
        ..RoadmapForm::default()
    }
}

fn signup(name: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
    SignupForm {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: confirm.to_owned(),
    }
}

// =============================================================================
// roadmap form
// =============================================================================

#[test]
fn roadmap_form_accepts_required_fields_only() {
    assert!(validate_roadmap_form(&roadmap_form("distributed systems", "bachelors")).is_ok());
}

#[test]
fn roadmap_form_rejects_blank_interests() {
    let err = validate_roadmap_form(&roadmap_form("   ", "bachelors")).unwrap_err();
    assert_eq!(err.field("interests"), Some("Please describe your interests"));
    assert!(err.field("education").is_none());
}

#[test]
fn roadmap_form_reports_every_missing_field() {
    let err = validate_roadmap_form(&RoadmapForm::default()).unwrap_err();
    let fields: Vec<_> = err.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, vec!["education", "interests"]);
    assert_eq!(
        err.to_string(),
        "education: Please select your education level; interests: Please describe your interests"
    );
}

#[test]
fn validation_error_is_a_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(validate_roadmap_form(&roadmap_form("", "phd")).unwrap_err());
    assert_eq!(err.to_string(), "interests: Please describe your interests");
    assert!(err.source().is_none());
}

// =============================================================================
// login
// =============================================================================

#[test]
fn login_requires_email_and_password() {
    let err = validate_login(&LoginForm::default()).unwrap_err();
    assert_eq!(err.field("email"), Some("Email is required"));
    assert_eq!(err.field("password"), Some("Password is required"));
}

#[test]
fn login_rejects_malformed_email() {
    for email in ["ada", "ada@example", "@.", "ada @ example.com"] {
        let form = LoginForm { email: email.to_owned(), password: "pw".to_owned() };
        let err = validate_login(&form).unwrap_err();
        assert_eq!(err.field("email"), Some("Please enter a valid email"), "email {email:?}");
    }
}

#[test]
fn login_accepts_short_password() {
    let form = LoginForm { email: "ada@example.com".to_owned(), password: "x".to_owned() };
    assert!(validate_login(&form).is_ok());
}

// =============================================================================
// signup
// =============================================================================

#[test]
fn signup_valid() {
    assert!(validate_signup(&signup("Ada", "ada@example.com", "analytical", "analytical")).is_ok());
}

#[test]
fn signup_short_password() {
    let err = validate_signup(&signup("Ada", "ada@example.com", "short", "short")).unwrap_err();
    assert_eq!(err.field("password"), Some("Password must be at least 8 characters"));
    assert!(err.field("confirmPassword").is_none());
}

#[test]
fn signup_mismatched_confirmation() {
    let err = validate_signup(&signup("Ada", "ada@example.com", "analytical", "analytic")).unwrap_err();
    assert_eq!(err.field("confirmPassword"), Some("Passwords do not match"));
    assert!(err.field("password").is_none());
}

#[test]
fn signup_blank_name_and_email() {
    let err = validate_signup(&signup(" ", "", "analytical", "analytical")).unwrap_err();
    assert_eq!(err.field("name"), Some("Name is required"));
    assert_eq!(err.field("email"), Some("Email is required"));
}
