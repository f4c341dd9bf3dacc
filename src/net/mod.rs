//! Networking modules for the roadmap REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and error normalization, and `types` defines the
//! wire schema shared by every view.

pub mod api;
pub mod types;
