//! REST client for the roadmap API.
//!
//! DESIGN
//! ======
//! `RoadmapApi` is the seam every view and the session store depend on;
//! `HttpApi` is the reqwest implementation. Every request goes through one
//! cookie jar so the server's session cookie rides along on later calls.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Api`] carrying the body's `error`
//! string when present. Requests that never produce a response become
//! [`ApiError::Network`]. Nothing is retried and no timeout is applied unless
//! the config asks for one.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::types::{
    AuthResponse, ErrorBody, GenerateResponse, HistoryResponse, LoginRequest, RegisterRequest, RoadmapDetail,
    RoadmapForm, SessionCheck, StatsResponse, User, UserStats,
};
use crate::config::ClientConfig;

/// Message shown when a request never reached the server.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{}", api_error_text(*status, message.as_deref()))]
    Api { status: u16, message: Option<String> },

    /// The request did not complete (connect failure, reset, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A success body could not be decoded into the expected type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The configured base URL does not parse.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status for server-side rejections.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to surface inline in a form: the server message, the network
    /// message, or `fallback` for everything else.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message: Some(message), .. } => message.clone(),
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_owned(),
            _ => fallback.to_owned(),
        }
    }
}

fn api_error_text(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_owned(),
        None => format!("HTTP error! status: {status}"),
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Operations offered by the roadmap backend.
#[async_trait::async_trait]
pub trait RoadmapApi: Send + Sync {
    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] when the credentials are rejected.
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError>;

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] when the server refuses the registration.
    async fn register(&self, email: &str, password: &str, full_name: &str) -> Result<User, ApiError>;

    /// `POST /auth/logout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server could not be notified.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /auth/check-session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the check itself fails.
    async fn check_session(&self) -> Result<SessionCheck, ApiError>;

    /// `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 401 when not signed in.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// `POST /generate-roadmap`.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails server-side or the body is malformed.
    async fn generate_roadmap(&self, form: &RoadmapForm) -> Result<GenerateResponse, ApiError>;

    /// `GET /roadmaps/history` for the 1-based `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 401 when not signed in.
    async fn history(&self, page: u32) -> Result<HistoryResponse, ApiError>;

    /// `GET /roadmaps/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 404 for unknown or foreign roadmaps.
    async fn roadmap(&self, id: &str) -> Result<RoadmapDetail, ApiError>;

    /// `DELETE /roadmaps/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] when the roadmap is missing or not owned.
    async fn delete_roadmap(&self, id: &str) -> Result<(), ApiError>;

    /// `GET /roadmaps/stats`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 401 when not signed in.
    async fn stats(&self) -> Result<UserStats, ApiError>;

    /// `GET /pdf/export/:id`, returning the raw PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] when the roadmap is missing or rendering fails.
    async fn export_pdf(&self, id: &str) -> Result<Vec<u8>, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// [`RoadmapApi`] over HTTP. One reqwest client and one cookie jar are
/// shared by every call, so the session cookie set by login rides along on
/// later requests.
pub struct HttpApi {
    http: reqwest::Client,
    jar: Arc<Jar>,
    /// API root; also the URL the session cookie is scoped to.
    base: Url,
    page_size: u32,
}

impl HttpApi {
    /// Build a client from config, seeding the cookie jar when a session
    /// cookie is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base =
            Url::parse(&config.base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.session_cookie {
            jar.add_cookie_str(cookie, &base);
        }

        let mut builder = reqwest::Client::builder().cookie_provider(Arc::clone(&jar));
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            jar,
            base,
            page_size: config.history_page_size,
        })
    }

    /// Current `Cookie` header value for the API origin, if any cookie is set.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.base)
            .and_then(|value| value.to_str().ok().map(str::to_owned))
            .filter(|value| !value.is_empty())
    }

    /// Build a request for the path `segments` under the API root. Each
    /// segment is percent-encoded, so ids cannot escape their position.
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = endpoint_url(&self.base, segments);
        tracing::debug!(%method, %url, "api request");
        self.http.request(method, url)
    }

    /// Send and return `(status, body)`, mapping transport failures.
    async fn send(&self, request: RequestBuilder) -> Result<(u16, Vec<u8>), ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok((status, body.to_vec()))
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.send(request).await?;
        decode_response(status, &body)
    }

    async fn call_unit(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let (status, body) = self.send(request).await?;
        check_status(status, &body)
    }
}

#[async_trait::async_trait]
impl RoadmapApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = self
            .request(Method::POST, &["auth", "login"])
            .json(&LoginRequest { email, password });
        let response: AuthResponse = self.call(request).await?;
        Ok(response.user)
    }

    async fn register(&self, email: &str, password: &str, full_name: &str) -> Result<User, ApiError> {
        let request = self
            .request(Method::POST, &["auth", "register"])
            .json(&RegisterRequest { email, password, full_name });
        let response: AuthResponse = self.call(request).await?;
        Ok(response.user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.call_unit(self.request(Method::POST, &["auth", "logout"]))
            .await
    }

    async fn check_session(&self) -> Result<SessionCheck, ApiError> {
        self.call(self.request(Method::GET, &["auth", "check-session"]))
            .await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.call(self.request(Method::GET, &["auth", "me"])).await
    }

    async fn generate_roadmap(&self, form: &RoadmapForm) -> Result<GenerateResponse, ApiError> {
        let request = self
            .request(Method::POST, &["generate-roadmap"])
            .json(form);
        self.call(request).await
    }

    async fn history(&self, page: u32) -> Result<HistoryResponse, ApiError> {
        let request = self
            .request(Method::GET, &["roadmaps", "history"])
            .query(&[("page", page.max(1)), ("limit", self.page_size)]);
        self.call(request).await
    }

    async fn roadmap(&self, id: &str) -> Result<RoadmapDetail, ApiError> {
        self.call(self.request(Method::GET, &["roadmaps", id]))
            .await
    }

    async fn delete_roadmap(&self, id: &str) -> Result<(), ApiError> {
        self.call_unit(self.request(Method::DELETE, &["roadmaps", id]))
            .await
    }

    async fn stats(&self) -> Result<UserStats, ApiError> {
        let response: StatsResponse = self
            .call(self.request(Method::GET, &["roadmaps", "stats"]))
            .await?;
        Ok(response.stats)
    }

    async fn export_pdf(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let (status, body) = self
            .send(self.request(Method::GET, &["pdf", "export", id]))
            .await?;
        check_status(status, &body)?;
        Ok(body)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn endpoint_url(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // `HttpApi::new` rejects cannot-be-a-base URLs, so this always succeeds.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn check_status(status: u16, body: &[u8]) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.trim().is_empty());
    tracing::warn!(status, error = message.as_deref().unwrap_or(""), "api error response");
    Err(ApiError::Api { status, message })
}

fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    check_status(status, body)?;
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
