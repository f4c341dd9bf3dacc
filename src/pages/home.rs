//! Home view: validate the learner profile and request a roadmap.
//!
//! A successful submit yields the navigation payload the results view
//! renders directly, so a fresh roadmap is never fetched twice.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use crate::forms::{ValidationError, validate_roadmap_form};
use crate::net::api::{ApiError, NETWORK_ERROR_MESSAGE, RoadmapApi};
use crate::net::types::{Roadmap, RoadmapForm};

pub const GENERATE_FAILED: &str = "Failed to generate roadmap. Please try again.";

/// State carried from the home view to the results view after generation.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsNavigation {
    pub form_data: RoadmapForm,
    pub roadmap: Roadmap,
    pub roadmap_id: Option<String>,
    pub saved: bool,
    pub user_authenticated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Local checks failed; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Inline banner text for the form.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::Api(e @ ApiError::Api { .. }) => e.to_string(),
            Self::Api(ApiError::Network(_)) => NETWORK_ERROR_MESSAGE.to_owned(),
            Self::Api(_) => GENERATE_FAILED.to_owned(),
        }
    }
}

/// Validate `form` and, if it passes, generate a roadmap for it.
///
/// # Errors
///
/// Returns [`SubmitError::Validation`] without touching the network when the
/// form is incomplete, or [`SubmitError::Api`] when generation fails.
pub async fn submit_roadmap(api: &dyn RoadmapApi, form: RoadmapForm) -> Result<ResultsNavigation, SubmitError> {
    validate_roadmap_form(&form)?;

    let response = api.generate_roadmap(&form).await?;
    tracing::info!(
        request_id = response.request_id.as_deref().unwrap_or(""),
        roadmap_id = response.roadmap_id.as_deref().unwrap_or(""),
        saved = response.saved,
        user_authenticated = response.user_authenticated,
        "roadmap generated"
    );

    Ok(ResultsNavigation {
        form_data: form,
        roadmap: response.roadmap,
        roadmap_id: response.roadmap_id,
        saved: response.saved,
        user_authenticated: response.user_authenticated,
    })
}
