//! # Taskboard Shared Library
//!
//! This crate contains the domain types, storage interface and business logic
//! behind the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Accounts, tasks and their outward-facing shapes
//! - `store`: Storage interface with PostgreSQL and in-memory backends
//! - `auth`: Password hashing, JWT tokens, identity claims, ownership guard
//! - `services`: Account and task services (registration, login, task lifecycle)
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
