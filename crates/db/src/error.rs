//! Fehlertypen fuer das Datenbank-Crate
//!
//! Abwesenheit eines Datensatzes ist kein Fehler: Lookups liefern
//! `Ok(None)`. Alles was hier landet ist ein technischer Fehlschlag oder
//! eine Constraint-Verletzung.

use thiserror::Error;

/// Datenbank-Fehlertypen
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Eindeutigkeitsverletzung: {0}")]
    Eindeutigkeit(String),

    #[error("SQLx-Fehler: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration-Fehler: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Interner DB-Fehler: {0}")]
    Intern(String),
}

impl DbError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Gibt true zurueck wenn es sich um einen Eindeutigkeitsfehler handelt
    pub fn ist_eindeutigkeit(&self) -> bool {
        match self {
            Self::Eindeutigkeit(_) => true,
            Self::Sqlx(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

/// Result-Alias fuer alle Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eindeutigkeit_wird_erkannt() {
        assert!(DbError::Eindeutigkeit("user_name".into()).ist_eindeutigkeit());
        assert!(!DbError::intern("kaputt").ist_eindeutigkeit());
        assert!(!DbError::Sqlx(sqlx::Error::RowNotFound).ist_eindeutigkeit());
    }

    #[test]
    fn fehler_anzeige() {
        let e = DbError::Eindeutigkeit("Benutzername 'alice' bereits vergeben".into());
        assert_eq!(
            e.to_string(),
            "Eindeutigkeitsverletzung: Benutzername 'alice' bereits vergeben"
        );
        assert_eq!(DbError::intern("weg").to_string(), "Interner DB-Fehler: weg");
    }
}
