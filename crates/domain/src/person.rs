//! Person — the only persisted record of the service.

use serde::{Deserialize, Serialize};

use crate::id::PersonId;

/// A person as stored in the datastore.
///
/// Serialized in camelCase (`firstName`, `lastName`) to match the JSON
/// contract of the HTTP resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl Person {
    /// Attach a datastore-assigned identity to a [`NewPerson`].
    #[must_use]
    pub fn with_id(id: PersonId, person: NewPerson) -> Self {
        Self {
            id,
            first_name: person.first_name,
            last_name: person.last_name,
            age: person.age,
        }
    }
}

/// Attributes of a person that has not been persisted yet.
///
/// Any `id` present in an incoming payload is ignored during deserialization:
/// identity is only ever assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl NewPerson {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: i32) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }
}
