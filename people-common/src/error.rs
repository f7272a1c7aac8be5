//! Common error types for the people service

use thiserror::Error;

/// Common result type for repository operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds returned by every `PersonRepository` backend
///
/// The set is closed: callers branch on the variant, never on the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested person ID is absent
    #[error("person not found: {0}")]
    NotFound(String),

    /// A person with this ID is already stored
    #[error("person already exists: {0}")]
    AlreadyExists(String),

    /// Empty ID or malformed payload
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected backend failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for Error {
    /// Database failures are opaque to callers.
    ///
    /// Backends translate `RowNotFound` and unique violations before this
    /// conversion runs, so anything reaching here is internal.
    fn from(err: sqlx::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_are_distinguishable() {
        let not_found = Error::NotFound("1".to_string());
        let exists = Error::AlreadyExists("1".to_string());

        assert!(not_found.is_not_found());
        assert!(!not_found.is_already_exists());
        assert!(exists.is_already_exists());
        assert_ne!(not_found, exists);
    }

    #[test]
    fn test_display_includes_id() {
        let err = Error::NotFound("42".to_string());
        assert_eq!(err.to_string(), "person not found: 42");
    }
}
