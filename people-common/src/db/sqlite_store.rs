//! SQLite-backed `PersonRepository`
//!
//! Rows live in the `people` table created by [`super::init_database`].
//! Error mapping:
//! - no row on lookup, or zero rows affected by UPDATE/DELETE -> `NotFound`
//! - primary key violation on INSERT -> `AlreadyExists`
//! - anything else -> `Internal`

use crate::{Error, Person, PersonRepository, Result};
use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

/// Relational person store over a SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    db: SqlitePool,
}

#[derive(FromRow)]
struct PersonRow {
    id: String,
    name: String,
    age: i64,
    job: String,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: row.id,
            name: row.name,
            age: row.age,
            job: row.job,
        }
    }
}

impl SqliteStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl PersonRepository for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(&self, person: Person) -> Result<()> {
        if person.id.is_empty() {
            return Err(Error::InvalidInput("person ID cannot be empty".to_string()));
        }

        let result = sqlx::query("INSERT INTO people (id, name, age, job) VALUES (?, ?, ?, ?)")
            .bind(&person.id)
            .bind(&person.name)
            .bind(person.age)
            .bind(&person.job)
            .execute(&self.db)
            .await;

        match result {
            Ok(_) => {
                debug!(id = %person.id, "Inserted person row");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::AlreadyExists(person.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Person> {
        let row = sqlx::query_as::<_, PersonRow>(
            "SELECT id, name, age, job FROM people WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(Person::from)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn update(&self, person: Person) -> Result<()> {
        let result = sqlx::query("UPDATE people SET name = ?, age = ?, job = ? WHERE id = ?")
            .bind(&person.name)
            .bind(person.age)
            .bind(&person.job)
            .bind(&person.id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(person.id));
        }

        debug!(id = %person.id, "Updated person row");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM people WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        debug!(id, "Deleted person row");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Person>> {
        let rows = sqlx::query_as::<_, PersonRow>("SELECT id, name, age, job FROM people")
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Person::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;
    use std::collections::HashSet;

    async fn store() -> SqliteStore {
        SqliteStore::new(init_memory_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = store().await;
        let ada = Person::new("42", "Ada", 30, "engineer");

        store.create(ada.clone()).await.unwrap();
        assert_eq!(store.get_by_id("42").await.unwrap(), ada);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_already_exists() {
        let store = store().await;
        store.create(Person::new("42", "Ada", 30, "engineer")).await.unwrap();

        let err = store
            .create(Person::new("42", "Grace", 40, "admiral"))
            .await
            .unwrap_err();
        assert_eq!(err, Error::AlreadyExists("42".to_string()));
        assert_eq!(store.get_by_id("42").await.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let store = store().await;

        let err = store.create(Person::new("", "x", 1, "y")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let store = store().await;

        assert!(store.get_by_id("nope").await.unwrap_err().is_not_found());
        assert!(store
            .update(Person::new("nope", "x", 1, "y"))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store.delete("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_and_delete_removes() {
        let store = store().await;
        store.create(Person::new("42", "Ada", 30, "engineer")).await.unwrap();

        let updated = Person::new("42", "Ada L.", 31, "");
        store.update(updated.clone()).await.unwrap();
        assert_eq!(store.get_by_id("42").await.unwrap(), updated);

        store.delete("42").await.unwrap();
        assert!(store.get_by_id("42").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_returns_every_row() {
        let store = store().await;
        assert!(store.list().await.unwrap().is_empty());

        for id in ["3", "1", "2"] {
            store.create(Person::new(id, "p", 1, "j")).await.unwrap();
        }

        let ids: HashSet<String> = store.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("1") && ids.contains("2") && ids.contains("3"));
    }
}
