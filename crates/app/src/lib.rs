//! # dbc-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement:
//!   - `PersonRepository` — insert and look up persons
//! - Define the **driving/inbound** use-case struct:
//!   - `PersonService` — create the default person, create a supplied person,
//!     retrieve a person by first name
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (request counters and timers)
//!
//! ## Dependency rule
//! Depends on `dbc-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod metrics;
pub mod ports;
pub mod services;
