//! SQLite-Backend-Implementierungen fuer alle Repository-Traits

pub mod pool;
pub mod roles;
pub mod users;

pub use pool::SqliteDb;
