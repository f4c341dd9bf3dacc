//! # career-roadmap
//!
//! Typed client for the career roadmap service. Collects a learner profile,
//! submits it for roadmap generation, and loads, lists, deletes and exports
//! the resulting roadmaps over the cookie-session REST API.
//!
//! This crate contains the API client, the session store, local form
//! validation, and the per-view flows (home, results, history, login,
//! signup). Rendering is left to the caller; the `roadmap` binary is one such
//! caller.

pub mod app;
pub mod config;
pub mod forms;
pub mod net;
pub mod pages;
pub mod state;

pub use app::App;
pub use config::ClientConfig;
pub use net::api::{ApiError, HttpApi, RoadmapApi};
pub use state::session::{AuthOutcome, Session, SessionSnapshot, SessionStore};
