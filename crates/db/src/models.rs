//! Datenbankmodelle fuer Kurswerk
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den Antwort-Typen des Auth-Service getrennt und dienen als
//! reine Datenuebertragungsobjekte.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kurswerk_core::{RoleId, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenutzerRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// PHC-String (Argon2id), niemals Klartext
    pub password_hash: String,
    /// Anzeigename
    pub name: String,
    pub description: String,
    pub avatar: String,
    /// 0 = unbekannt, 1 = maennlich, 2 = weiblich
    pub sex: i32,
    pub created_at: DateTime<Utc>,
}

/// Benutzer zusammen mit seinen Rollen (nach Zuweisungs-Position sortiert)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenutzerMitRollen {
    pub benutzer: BenutzerRecord,
    pub rollen: Vec<RolleRecord>,
}

impl BenutzerMitRollen {
    /// Primaere Rolle: die erste zugewiesene
    pub fn primaere_rolle(&self) -> Option<&RolleRecord> {
        self.rollen.first()
    }
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Suchkriterium fuer Benutzer-Lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenutzerSuche<'a> {
    Id(UserId),
    Username(&'a str),
    Email(&'a str),
}

impl BenutzerSuche<'_> {
    /// Spaltenname fuer die WHERE-Klausel
    pub fn spalte(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Username(_) => "user_name",
            Self::Email(_) => "email",
        }
    }
}

impl std::fmt::Display for BenutzerSuche<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => write!(f, "user_name={name}"),
            Self::Email(email) => write!(f, "email={email}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rollen
// ---------------------------------------------------------------------------

/// Rollen-Datensatz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolleRecord {
    pub id: RoleId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn benutzer() -> BenutzerRecord {
        BenutzerRecord {
            id: UserId(1),
            username: "alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$...".into(),
            name: String::new(),
            description: String::new(),
            avatar: String::new(),
            sex: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn primaere_rolle_ist_erste() {
        let bmr = BenutzerMitRollen {
            benutzer: benutzer(),
            rollen: vec![
                RolleRecord { id: RoleId(3), name: "Student".into() },
                RolleRecord { id: RoleId(2), name: "Lehrer".into() },
            ],
        };
        assert_eq!(bmr.primaere_rolle().map(|r| r.id), Some(RoleId(3)));
    }

    #[test]
    fn ohne_rollen_keine_primaere() {
        let bmr = BenutzerMitRollen { benutzer: benutzer(), rollen: vec![] };
        assert!(bmr.primaere_rolle().is_none());
    }

    #[test]
    fn suche_spalten() {
        assert_eq!(BenutzerSuche::Id(UserId(1)).spalte(), "id");
        assert_eq!(BenutzerSuche::Username("x").spalte(), "user_name");
        assert_eq!(BenutzerSuche::Email("x").spalte(), "email");
    }
}
