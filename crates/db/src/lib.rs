//! kurswerk-db – Credential-Store
//!
//! Dieses Crate stellt das Repository-Pattern fuer Benutzer, Rollen und
//! Berechtigungen bereit. Die Geschaeftslogik kennt nur die Traits aus
//! [`repository`]; [`SqliteDb`] ist die mitgelieferte Implementierung.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use repository::{DatabaseConfig, RoleRepository, UserRepository};
pub use sqlite::SqliteDb;
