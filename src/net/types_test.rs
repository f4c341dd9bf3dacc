use super::*;
use serde_json::json;

// =============================================================
// Helpers
// =============================================================

fn make_user(name: &str, email: &str) -> User {
    User {
        id: "u-1".to_owned(),
        email: email.to_owned(),
        name: name.to_owned(),
        created_at: None,
        last_login: None,
    }
}

// =============================================================
// User
// =============================================================

#[test]
fn initials_take_first_two_words() {
    assert_eq!(make_user("ada byron lovelace", "ada@example.com").initials(), "AB");
}

#[test]
fn initials_single_word_name() {
    assert_eq!(make_user("Grace", "grace@example.com").initials(), "G");
}

#[test]
fn initials_fall_back_to_email() {
    assert_eq!(make_user("   ", "zed@example.com").initials(), "Z");
}

#[test]
fn user_decodes_me_payload_with_null_last_login() {
    let user: User = serde_json::from_value(json!({
        "id": "64f0",
        "email": "a@b.co",
        "name": "A B",
        "created_at": "2024-03-01T10:00:00",
        "last_login": null
    }))
    .unwrap();
    assert_eq!(user.id, "64f0");
    assert_eq!(user.created_at.as_deref(), Some("2024-03-01T10:00:00"));
    assert!(user.last_login.is_none());
}

#[test]
fn session_check_defaults_to_unauthenticated() {
    let check: SessionCheck = serde_json::from_value(json!({})).unwrap();
    assert!(!check.authenticated);
    assert!(check.user.is_none());
}

#[test]
fn register_request_uses_full_name_key() {
    let body = serde_json::to_value(RegisterRequest { email: "a@b.co", password: "pw", full_name: "A B" }).unwrap();
    assert_eq!(body, json!({ "email": "a@b.co", "password": "pw", "full_name": "A B" }));
}

// =============================================================
// RoadmapForm
// =============================================================

#[test]
fn form_serializes_camel_case() {
    let form = RoadmapForm {
        interests: "web".to_owned(),
        education: "bachelors".to_owned(),
        current_skills: "rust".to_owned(),
        career_goal: "backend".to_owned(),
    };
    let value = serde_json::to_value(&form).unwrap();
    assert_eq!(
        value,
        json!({ "interests": "web", "education": "bachelors", "currentSkills": "rust", "careerGoal": "backend" })
    );
}

#[test]
fn form_decodes_empty_object() {
    let form: RoadmapForm = serde_json::from_value(json!({})).unwrap();
    assert_eq!(form, RoadmapForm::default());
}

#[test]
fn education_levels_have_unique_values() {
    let mut values: Vec<_> = EDUCATION_LEVELS.iter().map(|(value, _)| *value).collect();
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), EDUCATION_LEVELS.len());
}

// =============================================================
// Roadmap
// =============================================================

#[test]
fn roadmap_decodes_full_payload() {
    let roadmap: Roadmap = serde_json::from_value(json!({
        "skill_path": [{
            "name": "HTTP",
            "description": "Protocol basics",
            "prerequisites": ["TCP"],
            "estimated_duration_weeks": 3
        }],
        "platforms": [{ "name": "MDN", "type": "docs", "rationale": "reference" }],
        "certifications": [{ "name": "AWS CCP", "provider": "AWS", "level": "Beginner", "rationale": "cloud" }],
        "project_ideas": {
            "beginner": [{ "title": "Blog", "description": "static", "learning_objectives": ["html"] }],
            "advanced": []
        },
        "timeline": [
            { "phase_number": 1, "title": "Basics", "duration_weeks": 4, "focus_skills": ["HTTP"], "milestones": ["ship"] },
            { "phase_number": 2, "title": "Depth", "duration_weeks": 6 }
        ],
        "notes": ["keep going"]
    }))
    .unwrap();

    assert_eq!(roadmap.skill_path[0].prerequisites, vec!["TCP".to_owned()]);
    assert_eq!(roadmap.platforms[0].kind, "docs");
    assert_eq!(roadmap.project_ideas.beginner.len(), 1);
    assert!(roadmap.project_ideas.intermediate.is_empty());
    assert_eq!(roadmap.total_weeks(), 10);
    assert!(roadmap.extra.is_empty());
}

#[test]
fn roadmap_missing_sections_default_empty() {
    let roadmap: Roadmap = serde_json::from_value(json!({ "notes": ["only notes"] })).unwrap();
    assert!(roadmap.skill_path.is_empty());
    assert!(roadmap.timeline.is_empty());
    assert_eq!(roadmap.total_weeks(), 0);
}

#[test]
fn roadmap_keeps_unknown_keys() {
    let roadmap: Roadmap = serde_json::from_value(json!({ "summary": "extra", "skill_path": [] })).unwrap();
    assert_eq!(roadmap.extra.get("summary"), Some(&json!("extra")));
    let back = serde_json::to_value(&roadmap).unwrap();
    assert_eq!(back["summary"], json!("extra"));
}

#[test]
fn weeks_accept_loose_numbers() {
    let phase: TimelinePhase =
        serde_json::from_value(json!({ "phase_number": "2", "duration_weeks": 2.6, "title": "x" })).unwrap();
    assert_eq!(phase.phase_number, 2);
    assert_eq!(phase.duration_weeks, 3);

    let step: SkillStep = serde_json::from_value(json!({ "name": "x", "estimated_duration_weeks": null })).unwrap();
    assert_eq!(step.estimated_duration_weeks, 0);
}

#[test]
fn weeks_reject_negative_and_text() {
    assert!(serde_json::from_value::<TimelinePhase>(json!({ "duration_weeks": -1 })).is_err());
    assert!(serde_json::from_value::<TimelinePhase>(json!({ "duration_weeks": "soon" })).is_err());
}

#[test]
fn project_ideas_by_level_in_display_order() {
    let ideas = ProjectIdeas::default();
    let levels: Vec<_> = ideas.by_level().iter().map(|(level, _)| *level).collect();
    assert_eq!(levels, vec!["beginner", "intermediate", "advanced"]);
}

// =============================================================
// Endpoint bodies
// =============================================================

#[test]
fn generate_response_decodes() {
    let response: GenerateResponse = serde_json::from_value(json!({
        "roadmap": { "notes": [] },
        "roadmap_id": "r1",
        "request_id": "q1",
        "saved": true,
        "user_authenticated": true
    }))
    .unwrap();
    assert_eq!(response.roadmap_id.as_deref(), Some("r1"));
    assert!(response.saved);
}

#[test]
fn history_entry_tolerates_empty_form_data() {
    let history: HistoryResponse = serde_json::from_value(json!({
        "roadmaps": [{
            "id": "r1",
            "request_id": "q1",
            "created_at": "2024-05-02T08:00:00",
            "form_data": {},
            "roadmap_summary": { "total_skills": 4, "total_phases": 2, "estimated_weeks": 12, "career_goal": "Not specified" }
        }],
        "pagination": { "page": 1, "limit": 10, "total_count": 1, "total_pages": 1, "has_next": false, "has_prev": false }
    }))
    .unwrap();
    assert_eq!(history.roadmaps[0].form_data, RoadmapForm::default());
    assert_eq!(history.roadmaps[0].roadmap_summary.estimated_weeks, 12);
    assert_eq!(history.pagination.unwrap().total_count, 1);
}

#[test]
fn stats_response_decodes() {
    let stats: StatsResponse = serde_json::from_value(json!({
        "stats": { "total_roadmaps": 3, "recent_roadmaps": 1, "total_estimated_learning_weeks": 40, "latest_roadmap_date": null }
    }))
    .unwrap();
    assert_eq!(stats.stats.total_roadmaps, 3);
    assert!(stats.stats.latest_roadmap_date.is_none());
}

#[test]
fn total_weeks_saturates_on_huge_phases() {
    let roadmap: Roadmap = serde_json::from_value(json!({
        "timeline": [{ "duration_weeks": 3_000_000_000u64 }, { "duration_weeks": 3_000_000_000u64 }]
    }))
    .unwrap();
    assert_eq!(roadmap.total_weeks(), u32::MAX);
}
