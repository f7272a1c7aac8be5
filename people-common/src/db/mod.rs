//! Database access layer
//!
//! SQLite bootstrap and the relational `PersonRepository` backend.

pub mod init;
pub mod sqlite_store;

pub use init::{init_database, init_memory_database};
pub use sqlite_store::SqliteStore;
