//! `SQLite` implementation of [`PersonRepository`].
//!
//! Each call opens a transaction on the pool and commits it before returning.
//! An early `?` drops the transaction, which rolls it back.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use dbc_app::ports::PersonRepository;
use dbc_domain::error::DbcError;
use dbc_domain::id::PersonId;
use dbc_domain::person::{NewPerson, Person};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Person`].
struct Wrapper(Person);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Person> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Person {
            id: PersonId::from_raw(row.try_get("id")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            age: row.try_get("age")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO person (first_name, last_name, age) VALUES (?, ?, ?)";
const SELECT_LATEST_BY_FIRST_NAME: &str =
    "SELECT * FROM person WHERE first_name = ? ORDER BY id DESC LIMIT 1";

/// `SQLite`-backed person repository.
pub struct SqlitePersonRepository {
    pool: SqlitePool,
}

impl SqlitePersonRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PersonRepository for SqlitePersonRepository {
    fn insert(&self, person: NewPerson) -> impl Future<Output = Result<Person, DbcError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let result = sqlx::query(INSERT)
                .bind(&person.first_name)
                .bind(&person.last_name)
                .bind(person.age)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;

            Ok(Person::with_id(
                PersonId::from_raw(result.last_insert_rowid()),
                person,
            ))
        }
    }

    fn find_by_first_name(
        &self,
        first_name: &str,
    ) -> impl Future<Output = Result<Option<Person>, DbcError>> + Send {
        let pool = self.pool.clone();
        let first_name = first_name.to_string();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let row: Option<Wrapper> = sqlx::query_as(SELECT_LATEST_BY_FIRST_NAME)
                .bind(first_name)
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqlitePersonRepository {
        let db = Config::in_memory().build().await.unwrap();
        SqlitePersonRepository::new(db.pool().clone())
    }

    async fn row_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM person")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_insert_and_find_person_when_valid() {
        let repo = setup().await;

        let created = repo
            .insert(NewPerson::new("Sarah", "Connor", 30))
            .await
            .unwrap();

        let fetched = repo.find_by_first_name("Sarah").await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.last_name, "Connor");
        assert_eq!(fetched.age, 30);
    }

    #[tokio::test]
    async fn should_return_none_when_person_not_found() {
        let repo = setup().await;
        let result = repo.find_by_first_name("Unknown").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_assign_distinct_ids_to_identical_people() {
        let repo = setup().await;

        let a = repo.insert(NewPerson::new("John", "Connor", 26)).await.unwrap();
        let b = repo.insert(NewPerson::new("John", "Connor", 26)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(row_count(&repo.pool).await, 2);
    }

    #[tokio::test]
    async fn should_return_latest_insert_when_first_names_collide() {
        let repo = setup().await;
        repo.insert(NewPerson::new("Sarah", "Connor", 30))
            .await
            .unwrap();
        let latest = repo
            .insert(NewPerson::new("Sarah", "Reese", 31))
            .await
            .unwrap();

        let fetched = repo.find_by_first_name("Sarah").await.unwrap().unwrap();
        assert_eq!(fetched.id, latest.id);
        assert_eq!(fetched.last_name, "Reese");
    }

    #[tokio::test]
    async fn should_match_first_name_case_sensitively() {
        let repo = setup().await;
        repo.insert(NewPerson::new("Sarah", "Connor", 30))
            .await
            .unwrap();

        assert!(repo.find_by_first_name("sarah").await.unwrap().is_none());
        assert!(repo.find_by_first_name("Sar").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_fail_with_storage_error_when_pool_closed() {
        let db = Config::in_memory().build().await.unwrap();
        let repo = SqlitePersonRepository::new(db.pool().clone());
        db.close().await;

        let result = repo.insert(NewPerson::new("John", "Connor", 26)).await;
        assert!(matches!(result, Err(DbcError::Storage(_))));
    }

    #[tokio::test]
    async fn should_leave_table_untouched_when_transaction_dropped() {
        let db = Config::in_memory().build().await.unwrap();
        let repo = SqlitePersonRepository::new(db.pool().clone());

        {
            let mut tx = db.pool().begin().await.unwrap();
            sqlx::query(INSERT)
                .bind("Kyle")
                .bind("Reese")
                .bind(29)
                .execute(&mut *tx)
                .await
                .unwrap();
        }

        assert_eq!(row_count(db.pool()).await, 0);
        assert!(repo.find_by_first_name("Kyle").await.unwrap().is_none());
    }
}
