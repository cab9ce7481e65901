//! Storage port — repository trait for person persistence.

use std::future::Future;

use dbc_domain::error::DbcError;
use dbc_domain::person::{NewPerson, Person};

/// Repository for persisting and querying [`Person`]s.
///
/// Every call is expected to run inside its own transaction: it either
/// commits fully or leaves the datastore untouched.
pub trait PersonRepository {
    /// Insert a new person and return it with its datastore-assigned identity.
    fn insert(&self, person: NewPerson) -> impl Future<Output = Result<Person, DbcError>> + Send;

    /// Find the person whose first name equals `first_name` exactly.
    ///
    /// When several rows share the name, the most recently inserted one wins.
    fn find_by_first_name(
        &self,
        first_name: &str,
    ) -> impl Future<Output = Result<Option<Person>, DbcError>> + Send;
}
