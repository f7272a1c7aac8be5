use crate::{Error, Person, PersonRepository, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Thread-safe in-memory person store
///
/// `MemoryStore` keeps every record in a `HashMap` keyed by ID, wrapped in
/// `Arc<RwLock<_>>`. Cloning the store yields another handle to the same map,
/// so one instance can be shared between the router and tests.
///
/// ## Thread Safety
///
/// - **Reads** (`get`, `snapshot`): shared lock, any number concurrently
/// - **Writes** (`insert`, `replace`, `remove`): exclusive lock
///
/// Every critical section is a plain map operation. The lock is never held
/// across an `.await` or a call into another component.
#[derive(Default, Clone)]
pub struct MemoryStore {
    people: Arc<RwLock<HashMap<String, Person>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            people: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Person>>> {
        self.people
            .read()
            .map_err(|_| Error::Internal("person store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Person>>> {
        self.people
            .write()
            .map_err(|_| Error::Internal("person store lock poisoned".to_string()))
    }

    /// Insert a new person, rejecting empty and duplicate IDs
    pub fn insert(&self, person: Person) -> Result<()> {
        if person.id.is_empty() {
            return Err(Error::InvalidInput("person ID cannot be empty".to_string()));
        }

        let mut people = self.write()?;
        if people.contains_key(&person.id) {
            return Err(Error::AlreadyExists(person.id));
        }

        debug!(id = %person.id, "Inserted person");
        people.insert(person.id.clone(), person);
        Ok(())
    }

    /// Owned copy of the person with `id`
    pub fn get(&self, id: &str) -> Result<Person> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Replace an existing person wholesale
    pub fn replace(&self, person: Person) -> Result<()> {
        let mut people = self.write()?;
        match people.get_mut(&person.id) {
            Some(slot) => {
                debug!(id = %person.id, "Replaced person");
                *slot = person;
                Ok(())
            }
            None => Err(Error::NotFound(person.id)),
        }
    }

    /// Remove the person with `id`
    pub fn remove(&self, id: &str) -> Result<()> {
        match self.write()?.remove(id) {
            Some(_) => {
                debug!(id, "Removed person");
                Ok(())
            }
            None => Err(Error::NotFound(id.to_string())),
        }
    }

    /// Point-in-time copy of every stored person
    ///
    /// The returned `Vec` is detached from the store: later mutations do not
    /// affect it and callers may modify it freely.
    pub fn snapshot(&self) -> Result<Vec<Person>> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Number of stored people
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }
}

#[async_trait]
impl PersonRepository for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, person: Person) -> Result<()> {
        self.insert(person)
    }

    async fn get_by_id(&self, id: &str) -> Result<Person> {
        self.get(id)
    }

    async fn update(&self, person: Person) -> Result<()> {
        self.replace(person)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.remove(id)
    }

    async fn list(&self) -> Result<Vec<Person>> {
        self.snapshot()
    }
}
