//! Application state shared across views.

pub mod session;
