//! HTTP API handlers for people-server

pub mod health;
pub mod people;

pub use health::health_routes;
pub use people::{people_routes, ApiError};
