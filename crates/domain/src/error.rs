//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DbcError`]
//! via `From`, so use-cases only ever deal with a single error type.

/// Top-level error returned by application services and ports.
#[derive(Debug, thiserror::Error)]
pub enum DbcError {
    /// The datastore failed (connection, constraint, decode, …).
    #[error("storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}
