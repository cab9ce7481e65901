//! # dbc-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the person resources under `/dbc`
//!   (`/dbc/create`, `/dbc/create/person`, `/dbc/retrieve/{name}`)
//! - Expose request counters and timers at `/metrics` and liveness at `/health`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses (status codes and JSON)
//!
//! ## Dependency rule
//! Depends on `dbc-app` (for port traits, services and metrics) and
//! `dbc-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
