//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Auth-Workflows von der konkreten
//! Datenbank-Implementierung. Tests koennen eigene In-Memory-Repositories
//! einsetzen.
//!
//! Konvention: ein nicht gefundener Datensatz ist `Ok(None)`, jeder `Err`
//! ist ein technischer Fehlschlag.

use std::collections::BTreeSet;

use async_trait::async_trait;

use kurswerk_core::{PermissionId, RoleId, UserId};

use crate::error::DbResult;
use crate::models::{BenutzerMitRollen, BenutzerRecord, BenutzerSuche, NeuerBenutzer, RolleRecord};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://kurswerk.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://kurswerk.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Einen Benutzer anhand eines Feldes laden
    async fn get_by(&self, suche: BenutzerSuche<'_>) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer samt Rollen (sortiert nach Position) laden
    async fn get_with_roles(&self, suche: BenutzerSuche<'_>) -> DbResult<Option<BenutzerMitRollen>>;

    /// Einen neuen Benutzer anlegen
    ///
    /// Ein bereits vergebener Benutzername ergibt `DbError::Eindeutigkeit`.
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Rollen anhaengen; die Reihenfolge bestimmt die Position
    async fn assign_roles(&self, user_id: UserId, rollen: &[RoleId]) -> DbResult<()>;

    /// Einen Benutzer endgueltig loeschen
    async fn delete(&self, user_id: UserId) -> DbResult<bool>;
}

/// Repository fuer Rollen und Rollen-Berechtigungen
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Alle Berechtigungen einer Rolle (unbekannte Rolle = leere Menge)
    async fn permissions_for_role(&self, role_id: RoleId) -> DbResult<BTreeSet<PermissionId>>;

    /// Eine Rolle laden
    async fn get_role(&self, role_id: RoleId) -> DbResult<Option<RolleRecord>>;

    /// Eine Rolle anlegen oder umbenennen
    async fn upsert_role(&self, rolle: &RolleRecord) -> DbResult<()>;

    /// Berechtigungen einer Rolle hinzufuegen (vorhandene bleiben bestehen)
    async fn grant_permissions(&self, role_id: RoleId, permissions: &[PermissionId]) -> DbResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_config_standard() {
        let cfg = DatabaseConfig::default();
        assert!(cfg.sqlite_wal);
        assert_eq!(cfg.max_verbindungen, 5);
        assert!(cfg.url.starts_with("sqlite://"));
    }
}
