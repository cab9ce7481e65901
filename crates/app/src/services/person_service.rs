//! Person service — use-cases behind the create and retrieve resources.

use dbc_domain::error::DbcError;
use dbc_domain::person::{NewPerson, Person};

use crate::ports::PersonRepository;

/// First name of the person stored by [`PersonService::create_default_person`].
pub const DEFAULT_FIRST_NAME: &str = "John";
/// Last name of the person stored by [`PersonService::create_default_person`].
pub const DEFAULT_LAST_NAME: &str = "Connor";
/// Age of the person stored by [`PersonService::create_default_person`].
pub const DEFAULT_AGE: i32 = 26;

/// Application service for person persistence.
pub struct PersonService<R> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Store a new John Connor, aged 26.
    ///
    /// Every call inserts a fresh row; only the identity differs between them.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn create_default_person(&self) -> Result<Person, DbcError> {
        let person = NewPerson::new(DEFAULT_FIRST_NAME, DEFAULT_LAST_NAME, DEFAULT_AGE);
        let created = self.repo.insert(person).await?;
        tracing::debug!(id = %created.id, "default person persisted");
        Ok(created)
    }

    /// Store the supplied person, if any.
    ///
    /// Returns `None` without touching storage when `person` is absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn create_person(
        &self,
        person: Option<NewPerson>,
    ) -> Result<Option<Person>, DbcError> {
        let Some(person) = person else {
            tracing::debug!("no person supplied, nothing persisted");
            return Ok(None);
        };
        let created = self.repo.insert(person).await?;
        tracing::debug!(id = %created.id, "person persisted");
        Ok(Some(created))
    }

    /// Look up a person by exact first name.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn find_by_first_name(&self, first_name: &str) -> Result<Option<Person>, DbcError> {
        let found = self.repo.find_by_first_name(first_name).await?;
        if found.is_none() {
            tracing::debug!(first_name, "no person with that first name");
        }
        Ok(found)
    }
}
