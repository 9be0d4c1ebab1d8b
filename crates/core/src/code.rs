//! Rueckgabecodes der Auth-Workflows
//!
//! Jeder Workflow liefert statt roher Fehler einen Wert aus dieser
//! geschlossenen Aufzaehlung. Die REST-Schicht uebersetzt den Code in
//! HTTP-Status und Antwort-Umschlag; Interna verlassen den Service nie.

use serde::{Serialize, Serializer};

/// Geschlossene Menge aller Geschaeftsergebnisse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Ok,
    /// Anfrageparameter ungueltig (Validierung in der REST-Schicht)
    RequestParamError,
    UserNotExist,
    PasswordWrong,
    /// Benutzername bereits vergeben
    DuplicateUser,
    /// Benutzer hat keine zugewiesene Rolle
    UserNoRole,
    TokenCreateError,
    /// Token fehlt, ist ungueltig oder abgelaufen
    TokenInvalid,
    DbOperationError,
    PasswordHashError,
}

impl Code {
    /// Alle Codes, z.B. fuer Dokumentation und Tests
    pub const ALLE: [Code; 10] = [
        Code::Ok,
        Code::RequestParamError,
        Code::UserNotExist,
        Code::PasswordWrong,
        Code::DuplicateUser,
        Code::UserNoRole,
        Code::TokenCreateError,
        Code::TokenInvalid,
        Code::DbOperationError,
        Code::PasswordHashError,
    ];

    /// Stabiler numerischer Wert fuer Clients
    pub fn wert(self) -> u32 {
        match self {
            Self::Ok => 0,
            Self::RequestParamError => 1001,
            Self::UserNotExist => 2001,
            Self::PasswordWrong => 2002,
            Self::DuplicateUser => 2003,
            Self::UserNoRole => 2004,
            Self::TokenCreateError => 3001,
            Self::TokenInvalid => 3002,
            Self::DbOperationError => 5001,
            Self::PasswordHashError => 5002,
        }
    }

    /// Lesbare Meldung zum Code (ohne interne Details)
    pub fn nachricht(self) -> &'static str {
        match self {
            Self::Ok => "Erfolg",
            Self::RequestParamError => "Ungueltige Anfrageparameter",
            Self::UserNotExist => "Benutzer existiert nicht",
            Self::PasswordWrong => "Passwort falsch",
            Self::DuplicateUser => "Benutzername bereits vergeben",
            Self::UserNoRole => "Benutzer hat keine Rolle",
            Self::TokenCreateError => "Token konnte nicht erstellt werden",
            Self::TokenInvalid => "Token ungueltig oder abgelaufen",
            Self::DbOperationError => "Datenbankoperation fehlgeschlagen",
            Self::PasswordHashError => "Passwort konnte nicht verarbeitet werden",
        }
    }

    /// HTTP-Statuscode fuer die REST-Schicht
    pub fn http_status(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::RequestParamError => 400,
            Self::UserNotExist | Self::PasswordWrong | Self::TokenInvalid => 401,
            Self::UserNoRole => 403,
            Self::DuplicateUser => 409,
            Self::TokenCreateError | Self::DbOperationError | Self::PasswordHashError => 500,
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.nachricht(), self.wert())
    }
}

impl std::error::Error for Code {}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.wert())
    }
}
