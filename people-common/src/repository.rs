//! Storage contract for person records
//!
//! Every backend (in-memory, SQLite) implements [`PersonRepository`]; the HTTP
//! layer only ever holds an `Arc<dyn PersonRepository>`.

use async_trait::async_trait;

use crate::{Person, Result};

/// Repository trait - all person storage backends implement this
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Short backend identifier (e.g., "memory", "sqlite")
    fn backend_name(&self) -> &'static str;

    /// Insert a new person
    ///
    /// # Returns
    /// * `Err(Error::InvalidInput)` - `person.id` is empty
    /// * `Err(Error::AlreadyExists)` - a person with that ID is stored
    async fn create(&self, person: Person) -> Result<()>;

    /// Fetch a person by ID, or `Err(Error::NotFound)`
    async fn get_by_id(&self, id: &str) -> Result<Person>;

    /// Replace the stored person with the same ID
    ///
    /// Whole-record replacement, not a merge. `Err(Error::NotFound)` if no
    /// person has `person.id`.
    async fn update(&self, person: Person) -> Result<()>;

    /// Remove a person by ID, or `Err(Error::NotFound)`
    async fn delete(&self, id: &str) -> Result<()>;

    /// All stored people, in no particular order
    async fn list(&self) -> Result<Vec<Person>>;
}
