//! # dbc-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port trait defined in `dbc-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle (open on startup, close on shutdown)
//! - Run database migrations (using sqlx embedded migrations)
//! - Wrap every repository call in its own transaction
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `dbc-app` (for port traits) and `dbc-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod person_repo;
pub mod pool;

pub use error::StorageError;
pub use person_repo::SqlitePersonRepository;
pub use pool::{Config, Database};
