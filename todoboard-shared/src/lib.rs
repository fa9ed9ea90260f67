//! # Todoboard Shared Library
//!
//! Domain core of the shared task list, used by the API server.
//!
//! ## Module Organization
//!
//! - `auth`: credential hashing, per-request authentication, ownership checks
//! - `models`: User and Todo records and their repositories
//! - `store`: persistence traits with PostgreSQL and in-memory backends
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
