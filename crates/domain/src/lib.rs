//! # dbc-domain
//!
//! Pure domain model for the dbc person service.
//!
//! ## Responsibilities
//! - Foundational types: the datastore-assigned identifier and error conventions
//! - Define the **Person** entity and the **`NewPerson`** value used to create one
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod person;
