//! Wire-protocol DTOs for the roadmap REST API.
//!
//! DESIGN
//! ======
//! The roadmap body is produced by a model on the server and treated as
//! opaque display data. Every field defaults when absent and unknown keys are
//! kept in `extra`, so a drifting schema degrades to empty sections instead of
//! a decode failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// USERS & SESSION
// =============================================================================

/// An authenticated user as returned by the auth endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: String,
    pub email: String,
    /// Display name (registered as `full_name`).
    #[serde(default)]
    pub name: String,
    /// ISO-8601 account creation time, when the endpoint includes it.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

impl User {
    /// Avatar initials: first letter of up to two name words, uppercased.
    /// Falls back to the first letter of the email when the name is blank.
    #[must_use]
    pub fn initials(&self) -> String {
        let from_name: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if !from_name.is_empty() {
            return from_name;
        }
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Body of `GET /auth/check-session`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionCheck {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Success body of `POST /auth/login` and `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
}

/// Error body carried by non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// ROADMAP FORM
// =============================================================================

/// Selectable education levels as `(value, label)` pairs.
pub const EDUCATION_LEVELS: &[(&str, &str)] = &[
    ("high-school", "High School / Secondary"),
    ("associate", "Associate Degree"),
    ("bachelors", "Bachelor's Degree"),
    ("masters", "Master's Degree"),
    ("phd", "PhD / Doctorate"),
    ("bootcamp", "Bootcamp / Certification"),
    ("self-taught", "Self-Taught"),
    ("other", "Other"),
];

/// Learner profile submitted for generation. Keys are camelCase on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapForm {
    pub interests: String,
    pub education: String,
    pub current_skills: String,
    pub career_goal: String,
}

// =============================================================================
// ROADMAP
// =============================================================================

/// A generated career roadmap.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roadmap {
    pub skill_path: Vec<SkillStep>,
    pub platforms: Vec<Platform>,
    pub certifications: Vec<Certification>,
    pub project_ideas: ProjectIdeas,
    pub timeline: Vec<TimelinePhase>,
    pub notes: Vec<String>,
    /// Keys the client does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Roadmap {
    /// Sum of all timeline phase durations, saturating at `u32::MAX`.
    #[must_use]
    pub fn total_weeks(&self) -> u32 {
        self.timeline
            .iter()
            .map(|phase| phase.duration_weeks)
            .fold(0, u32::saturating_add)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillStep {
    pub name: String,
    pub description: String,
    pub prerequisites: Vec<String>,
    #[serde(deserialize_with = "deserialize_weeks")]
    pub estimated_duration_weeks: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub name: String,
    /// Platform category (course site, documentation, community...).
    #[serde(rename = "type")]
    pub kind: String,
    pub rationale: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub provider: String,
    pub level: String,
    pub rationale: String,
}

/// Project ideas grouped by difficulty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectIdeas {
    pub beginner: Vec<ProjectIdea>,
    pub intermediate: Vec<ProjectIdea>,
    pub advanced: Vec<ProjectIdea>,
}

impl ProjectIdeas {
    /// Levels in display order, paired with their label.
    #[must_use]
    pub fn by_level(&self) -> [(&'static str, &[ProjectIdea]); 3] {
        [
            ("beginner", &self.beginner),
            ("intermediate", &self.intermediate),
            ("advanced", &self.advanced),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectIdea {
    pub title: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelinePhase {
    #[serde(deserialize_with = "deserialize_weeks")]
    pub phase_number: u32,
    pub title: String,
    #[serde(deserialize_with = "deserialize_weeks")]
    pub duration_weeks: u32,
    pub focus_skills: Vec<String>,
    pub milestones: Vec<String>,
}

// =============================================================================
// ROADMAP ENDPOINTS
// =============================================================================

/// Body of `POST /generate-roadmap`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub roadmap: Roadmap,
    #[serde(default)]
    pub roadmap_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    /// Whether the roadmap was persisted to the caller's history.
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub user_authenticated: bool,
}

/// Body of `GET /roadmaps/:id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadmapDetail {
    #[serde(default)]
    pub id: Option<String>,
    pub roadmap: Roadmap,
    #[serde(default)]
    pub form_data: RoadmapForm,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_owner: bool,
}

/// Server-computed digest of a saved roadmap.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapSummary {
    pub total_skills: u32,
    pub total_phases: u32,
    pub estimated_weeks: u32,
    pub career_goal: String,
}

/// One row of `GET /roadmaps/history`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub form_data: RoadmapForm,
    #[serde(default)]
    pub roadmap_summary: RoadmapSummary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_count: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub roadmaps: Vec<HistoryEntry>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Aggregates from `GET /roadmaps/stats`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub total_roadmaps: u32,
    pub recent_roadmaps: u32,
    pub total_estimated_learning_weeks: u32,
    pub latest_roadmap_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub stats: UserStats,
}

// =============================================================================
// HELPERS
// =============================================================================

/// Accept week counts as integers, floats, numeric strings or null.
///
/// Model output is loose about number types; fractional values round to the
/// nearest whole week and anything unusable becomes zero-or-error.
fn deserialize_weeks<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let float = match value {
        serde_json::Value::Null => return Ok(0),
        serde_json::Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom("expected finite number"))?,
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected numeric string, got {text:?}")))?,
        _ => return Err(D::Error::custom("expected number")),
    };
    if !float.is_finite() || float < 0.0 || float > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!("value {float} out of range for weeks")));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(float.round() as u32)
}
