//! Application root object.
//!
//! DESIGN
//! ======
//! `App` is constructed explicitly with the API client it should use and is
//! handed to each view. Nothing here is global: tests build an `App` around a
//! mock, the binary builds one around [`crate::HttpApi`].

use std::sync::Arc;

use crate::net::api::RoadmapApi;
use crate::state::session::{SessionSnapshot, SessionStore};

#[derive(Clone)]
pub struct App {
    api: Arc<dyn RoadmapApi>,
    session: Arc<SessionStore>,
}

impl App {
    #[must_use]
    pub fn new(api: Arc<dyn RoadmapApi>) -> Self {
        let session = Arc::new(SessionStore::new(Arc::clone(&api)));
        Self { api, session }
    }

    /// Resolve the session once; call before rendering the first view.
    pub async fn start(&self) -> SessionSnapshot {
        let snapshot = self.session.resolve().await;
        tracing::info!(authenticated = snapshot.is_authenticated, "session resolved");
        snapshot
    }

    #[must_use]
    pub fn api(&self) -> &dyn RoadmapApi {
        self.api.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use tokio::sync::oneshot;

    use crate::net::api::{ApiError, RoadmapApi};
    use crate::net::types::{
        GenerateResponse, HistoryEntry, HistoryResponse, Roadmap, RoadmapDetail, RoadmapForm, RoadmapSummary,
        SessionCheck, User, UserStats,
    };

    type Queue<T> = Mutex<VecDeque<Result<T, ApiError>>>;

    /// Scripted [`RoadmapApi`]. Each operation pops its next queued result;
    /// an empty queue yields a network error (logout defaults to success).
    /// `gate` holds the next call of an operation until released.
    #[derive(Default)]
    pub struct MockApi {
        calls: Mutex<Vec<&'static str>>,
        gates: Mutex<HashMap<&'static str, VecDeque<oneshot::Receiver<()>>>>,
        pub check: Queue<SessionCheck>,
        pub login: Queue<User>,
        pub register: Queue<User>,
        pub logout: Queue<()>,
        pub current_user: Queue<User>,
        pub generate: Queue<GenerateResponse>,
        pub history: Queue<HistoryResponse>,
        pub roadmap: Queue<RoadmapDetail>,
        pub delete: Queue<()>,
        pub stats: Queue<UserStats>,
        pub pdf: Queue<Vec<u8>>,
    }

    impl MockApi {
        pub fn push<T>(queue: &Queue<T>, result: Result<T, ApiError>) {
            queue.lock().unwrap().push_back(result);
        }

        /// Block the next `op` call until the returned sender fires or drops.
        pub fn gate(&self, op: &'static str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates
                .lock()
                .unwrap()
                .entry(op)
                .or_default()
                .push_back(rx);
            tx
        }

        pub fn calls(&self, op: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| **c == op)
                .count()
        }

        pub fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        async fn next<T>(&self, op: &'static str, queue: &Queue<T>) -> Result<T, ApiError> {
            self.calls.lock().unwrap().push(op);
            let result = queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network(format!("unscripted {op}"))));
            let gate = self
                .gates
                .lock()
                .unwrap()
                .get_mut(op)
                .and_then(VecDeque::pop_front);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        }
    }

    #[async_trait::async_trait]
    impl RoadmapApi for MockApi {
        async fn login(&self, _email: &str, _password: &str) -> Result<User, ApiError> {
            self.next("login", &self.login).await
        }

        async fn register(&self, _email: &str, _password: &str, _full_name: &str) -> Result<User, ApiError> {
            self.next("register", &self.register).await
        }

        async fn logout(&self) -> Result<(), ApiError> {
            if self.logout.lock().unwrap().is_empty() {
                Self::push(&self.logout, Ok(()));
            }
            self.next("logout", &self.logout).await
        }

        async fn check_session(&self) -> Result<SessionCheck, ApiError> {
            self.next("check_session", &self.check).await
        }

        async fn current_user(&self) -> Result<User, ApiError> {
            self.next("current_user", &self.current_user).await
        }

        async fn generate_roadmap(&self, _form: &RoadmapForm) -> Result<GenerateResponse, ApiError> {
            self.next("generate_roadmap", &self.generate).await
        }

        async fn history(&self, _page: u32) -> Result<HistoryResponse, ApiError> {
            self.next("history", &self.history).await
        }

        async fn roadmap(&self, _id: &str) -> Result<RoadmapDetail, ApiError> {
            self.next("roadmap", &self.roadmap).await
        }

        async fn delete_roadmap(&self, _id: &str) -> Result<(), ApiError> {
            self.next("delete_roadmap", &self.delete).await
        }

        async fn stats(&self) -> Result<UserStats, ApiError> {
            self.next("stats", &self.stats).await
        }

        async fn export_pdf(&self, _id: &str) -> Result<Vec<u8>, ApiError> {
            self.next("export_pdf", &self.pdf).await
        }
    }

    #[must_use]
    pub fn user(name: &str) -> User {
        User {
            id: format!("id-{name}"),
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.to_owned(),
            created_at: None,
            last_login: None,
        }
    }

    #[must_use]
    pub fn rejected(status: u16, message: &str) -> ApiError {
        ApiError::Api { status, message: Some(message.to_owned()) }
    }

    #[must_use]
    pub fn form(interests: &str, current_skills: &str, career_goal: &str) -> RoadmapForm {
        RoadmapForm {
            interests: interests.to_owned(),
            education: "bachelors".to_owned(),
            current_skills: current_skills.to_owned(),
            career_goal: career_goal.to_owned(),
        }
    }

    #[must_use]
    pub fn history_entry(id: &str, summary_goal: &str, form_data: RoadmapForm) -> HistoryEntry {
        HistoryEntry {
            id: id.to_owned(),
            request_id: None,
            created_at: "2024-05-02T08:00:00".to_owned(),
            form_data,
            roadmap_summary: RoadmapSummary {
                total_skills: 4,
                total_phases: 2,
                estimated_weeks: 10,
                career_goal: summary_goal.to_owned(),
            },
        }
    }

    #[must_use]
    pub fn detail(form_data: RoadmapForm) -> RoadmapDetail {
        RoadmapDetail {
            id: Some("r1".to_owned()),
            roadmap: Roadmap { notes: vec!["fetched".to_owned()], ..Roadmap::default() },
            form_data,
            created_at: None,
            is_owner: true,
        }
    }
}
