//! # People Common Library
//!
//! Shared code for the people service including:
//! - The `Person` entity model
//! - The error taxonomy returned by every storage backend
//! - The `PersonRepository` contract and its backends
//! - Configuration loading
//! - Database bootstrap

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod memory_store;
pub mod person;
pub mod repository;

pub use error::{Error, Result};
pub use memory_store::MemoryStore;
pub use person::Person;
pub use repository::PersonRepository;

#[cfg(feature = "sqlx")]
pub use db::SqliteStore;
