pub mod backend;
pub mod events;
pub mod repository;
pub mod schema;
pub mod settings;
pub mod website;

pub use backend::DuckDbBackend;

/// Re-export the `duckdb` crate so tests can reach `duckdb::params!` without
/// an extra dependency.
pub use duckdb;
