//! Results view: resolve the roadmap to display and export it.
//!
//! DESIGN
//! ======
//! A fresh generation arrives as an in-memory [`ResultsNavigation`] and is
//! used as-is. Otherwise a roadmap id triggers a fetch, and with neither the
//! view redirects home. A failed fetch replaces the whole view with an error;
//! retrying is calling [`load_results`] again.

#[cfg(test)]
#[path = "results_test.rs"]
mod results_test;

use super::Route;
use super::home::ResultsNavigation;
use crate::net::api::{ApiError, RoadmapApi};
use crate::net::types::{Roadmap, RoadmapForm};

pub const LOAD_FAILED: &str = "Failed to load roadmap";
pub const EXPORT_FAILED: &str = "Failed to export PDF";

/// Inputs the results view can be opened with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultsRequest {
    pub navigation: Option<ResultsNavigation>,
    pub roadmap_id: Option<String>,
}

impl ResultsRequest {
    #[must_use]
    pub fn from_navigation(navigation: ResultsNavigation) -> Self {
        Self { navigation: Some(navigation), roadmap_id: None }
    }

    #[must_use]
    pub fn from_id(roadmap_id: impl Into<String>) -> Self {
        Self { navigation: None, roadmap_id: Some(roadmap_id.into()) }
    }
}

/// A complete `{form_data, roadmap}` pair ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedRoadmap {
    pub form_data: RoadmapForm,
    pub roadmap: Roadmap,
    /// Known for saved roadmaps; needed for PDF export.
    pub roadmap_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResultsView {
    Ready(LoadedRoadmap),
    Redirect(Route),
    /// Page-level error with a retry action.
    Failed { message: String },
}

/// Resolve what the results view should show.
pub async fn load_results(api: &dyn RoadmapApi, request: &ResultsRequest) -> ResultsView {
    if let Some(navigation) = &request.navigation {
        return ResultsView::Ready(LoadedRoadmap {
            form_data: navigation.form_data.clone(),
            roadmap: navigation.roadmap.clone(),
            roadmap_id: navigation.roadmap_id.clone(),
        });
    }

    let Some(id) = request.roadmap_id.as_deref().filter(|id| !id.is_empty()) else {
        return ResultsView::Redirect(Route::Home);
    };

    match api.roadmap(id).await {
        Ok(detail) => ResultsView::Ready(LoadedRoadmap {
            form_data: detail.form_data,
            roadmap: detail.roadmap,
            roadmap_id: Some(detail.id.unwrap_or_else(|| id.to_owned())),
        }),
        Err(e) => {
            tracing::warn!(roadmap_id = id, error = %e, "error fetching roadmap");
            ResultsView::Failed { message: e.user_message(LOAD_FAILED) }
        }
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

/// The tabs of a rendered roadmap, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    SkillPath,
    Platforms,
    Certifications,
    Projects,
    Timeline,
}

impl Section {
    pub const ALL: [Section; 5] =
        [Self::SkillPath, Self::Platforms, Self::Certifications, Self::Projects, Self::Timeline];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SkillPath => "Skill Path",
            Self::Platforms => "Platforms",
            Self::Certifications => "Certifications",
            Self::Projects => "Projects",
            Self::Timeline => "Timeline",
        }
    }

    /// Number of items the section would list for `roadmap`.
    #[must_use]
    pub fn item_count(self, roadmap: &Roadmap) -> usize {
        match self {
            Self::SkillPath => roadmap.skill_path.len(),
            Self::Platforms => roadmap.platforms.len(),
            Self::Certifications => roadmap.certifications.len(),
            Self::Projects => roadmap
                .project_ideas
                .by_level()
                .iter()
                .map(|(_, ideas)| ideas.len())
                .sum(),
            Self::Timeline => roadmap.timeline.len(),
        }
    }
}

// =============================================================================
// PDF EXPORT
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfExport {
    /// Suggested download name, `career_roadmap_<id>.pdf`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[must_use]
pub fn pdf_file_name(roadmap_id: &str) -> String {
    format!("career_roadmap_{roadmap_id}.pdf")
}

/// Download the rendered PDF for a saved roadmap.
///
/// # Errors
///
/// Returns the API error when the roadmap is missing or rendering fails.
pub async fn export_pdf(api: &dyn RoadmapApi, roadmap_id: &str) -> Result<PdfExport, ApiError> {
    let bytes = api.export_pdf(roadmap_id).await?;
    tracing::info!(roadmap_id, size = bytes.len(), "pdf exported");
    Ok(PdfExport { file_name: pdf_file_name(roadmap_id), bytes })
}
