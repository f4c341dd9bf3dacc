//! Per-view flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module holds one view's data logic: what it fetches, how it reports
//! failure, and where it sends the user next. Rendering stays with the
//! caller.

pub mod history;
pub mod home;
pub mod login;
pub mod results;
pub mod signup;

/// Navigation targets a view can request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Results for a saved roadmap, addressed by id.
    Results { roadmap_id: String },
    Login,
    Signup,
    History,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Results { roadmap_id } => {
                let query: String = reqwest::Url::parse_with_params("route:/results", [("roadmap_id", roadmap_id)])
                    .ok()
                    .and_then(|url| url.query().map(str::to_owned))
                    .unwrap_or_default();
                format!("/results?{query}")
            }
            Self::Login => "/login".to_owned(),
            Self::Signup => "/signup".to_owned(),
            Self::History => "/history".to_owned(),
        }
    }
}
