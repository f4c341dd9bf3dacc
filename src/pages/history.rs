//! History view: the signed-in user's saved roadmaps.
//!
//! DESIGN
//! ======
//! The list is fetched once per load and searched locally; the server is
//! never asked to filter. "No roadmaps at all" and "nothing matches the
//! search" are separate view states.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::net::api::{ApiError, RoadmapApi};
use crate::net::types::{HistoryEntry, Pagination};
use crate::state::session::Session;

pub const HISTORY_FAILED: &str = "Failed to load roadmaps";

#[derive(Clone, Debug, PartialEq)]
enum Load {
    SignInRequired,
    Failed(String),
    Loaded { entries: Vec<HistoryEntry>, pagination: Option<Pagination> },
}

/// What the history view should render right now.
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryView<'a> {
    SignInRequired,
    Failed { message: &'a str },
    /// The user has no saved roadmaps.
    Empty,
    /// Roadmaps exist but none match the search term.
    NoMatches { term: &'a str },
    Entries(Vec<&'a HistoryEntry>),
}

/// Header totals across every loaded roadmap, ignoring the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub total_roadmaps: usize,
    pub total_skills: u32,
    pub total_phases: u32,
    pub avg_weeks: u32,
}

pub struct HistoryPage {
    load: Load,
    page: u32,
    search: String,
}

impl HistoryPage {
    /// Load page `page` (1-based) of the history. Anonymous or unresolved
    /// sessions get [`HistoryView::SignInRequired`] without a request.
    pub async fn load(api: &dyn RoadmapApi, session: &Session, page: u32) -> Self {
        let page = page.max(1);
        let load = if session.is_authenticated() {
            fetch(api, page).await
        } else {
            Load::SignInRequired
        };
        Self { load, page, search: String::new() }
    }

    /// Re-fetch the current page, keeping the search term.
    pub async fn retry(&mut self, api: &dyn RoadmapApi, session: &Session) {
        let search = std::mem::take(&mut self.search);
        *self = Self::load(api, session, self.page).await;
        self.search = search;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn pagination(&self) -> Option<Pagination> {
        match &self.load {
            Load::Loaded { pagination, .. } => *pagination,
            _ => None,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        match &self.load {
            Load::Loaded { entries, .. } => entries,
            _ => &[],
        }
    }

    #[must_use]
    pub fn view(&self) -> HistoryView<'_> {
        match &self.load {
            Load::SignInRequired => HistoryView::SignInRequired,
            Load::Failed(message) => HistoryView::Failed { message },
            Load::Loaded { entries, .. } if entries.is_empty() => HistoryView::Empty,
            Load::Loaded { entries, .. } => {
                let matches = filter_entries(entries, &self.search);
                if matches.is_empty() {
                    HistoryView::NoMatches { term: &self.search }
                } else {
                    HistoryView::Entries(matches)
                }
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        compute_stats(self.entries())
    }

    /// Delete a saved roadmap and drop it from the loaded list.
    ///
    /// # Errors
    ///
    /// Returns the API error and leaves the list untouched when the server
    /// refuses.
    pub async fn delete(&mut self, api: &dyn RoadmapApi, roadmap_id: &str) -> Result<(), ApiError> {
        api.delete_roadmap(roadmap_id).await?;
        tracing::info!(roadmap_id, "roadmap deleted");
        if let Load::Loaded { entries, .. } = &mut self.load {
            entries.retain(|entry| entry.id != roadmap_id);
        }
        Ok(())
    }
}

async fn fetch(api: &dyn RoadmapApi, page: u32) -> Load {
    match api.history(page).await {
        Ok(response) => Load::Loaded { entries: response.roadmaps, pagination: response.pagination },
        Err(e) => {
            tracing::warn!(page, error = %e, "error fetching roadmaps");
            Load::Failed(e.user_message(HISTORY_FAILED))
        }
    }
}

// =============================================================================
// FILTER & STATS
// =============================================================================

/// Case-insensitive substring match over the summary career goal and the
/// form's interests, career goal and current skills. A blank term keeps all.
#[must_use]
pub fn filter_entries<'a>(entries: &'a [HistoryEntry], term: &str) -> Vec<&'a HistoryEntry> {
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            [
                entry.roadmap_summary.career_goal.as_str(),
                entry.form_data.interests.as_str(),
                entry.form_data.career_goal.as_str(),
                entry.form_data.current_skills.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[must_use]
pub fn compute_stats(entries: &[HistoryEntry]) -> HistoryStats {
    let total_roadmaps = entries.len();
    let total_skills = entries
        .iter()
        .map(|e| e.roadmap_summary.total_skills)
        .fold(0, u32::saturating_add);
    let total_phases = entries
        .iter()
        .map(|e| e.roadmap_summary.total_phases)
        .fold(0, u32::saturating_add);
    let total_weeks: u64 = entries
        .iter()
        .map(|e| u64::from(e.roadmap_summary.estimated_weeks))
        .fold(0, u64::saturating_add);
    let avg_weeks = match u64::try_from(total_roadmaps) {
        Ok(count) if count > 0 => {
            // Round half up without the `total * 2` overflow.
            let rounded = total_weeks / count + u64::from(total_weeks % count * 2 >= count);
            u32::try_from(rounded).unwrap_or(u32::MAX)
        }
        _ => 0,
    };
    HistoryStats { total_roadmaps, total_skills, total_phases, avg_weeks }
}

/// Render an ISO-8601 timestamp as `May 2, 2024`. Unparseable input is
/// returned unchanged.
#[must_use]
pub fn format_created_at(raw: &str) -> String {
    let display = format_description!("[month repr:short] [day padding:none], [year]");
    let date = PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
        .map(PrimitiveDateTime::date)
        .or_else(|_| OffsetDateTime::parse(raw, &Rfc3339).map(OffsetDateTime::date))
        .or_else(|_| Date::parse(raw, &Iso8601::DEFAULT));
    date.ok()
        .and_then(|date| date.format(&display).ok())
        .unwrap_or_else(|| raw.to_owned())
}
