//! Person entity model

use serde::{Deserialize, Serialize};

/// A person record, keyed by a caller-supplied `id`
///
/// Decoding is lenient: missing fields take their zero value and unknown
/// fields are ignored. `PUT /people/{id}` bodies rely on this since they
/// usually omit `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub job: String,
}

impl Person {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: i64,
        job: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            job: job.into(),
        }
    }

    /// Replace the ID, keeping every other field
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
