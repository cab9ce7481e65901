//! Typed identifier for persisted records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a [`Person`](crate::person::Person).
///
/// Assigned by the datastore on insert and never changed afterwards, so there
/// is no way to generate one in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    /// Wrap a raw key read back from storage.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
